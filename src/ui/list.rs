use crate::app::{ActiveFilter, App, InputMode};
use crate::ui::category_color;
use crate::view::CardView;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

const NAME_WIDTH: usize = 16;

/// header(3) + search(3) + list(min) + status(1)
fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Row of the visible page under a screen position, if any.
pub fn card_row_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    let list = layout(area)[2];
    let inner_top = list.y + 1;
    let inner_bottom = list.y + list.height.saturating_sub(1);
    if column <= list.x || column >= list.x + list.width.saturating_sub(1) {
        return None;
    }
    if row < inner_top || row >= inner_bottom {
        return None;
    }
    Some((row - inner_top) as usize)
}

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let chunks = layout(area);

    // ── Header ──
    let mut header_spans = vec![Span::styled(
        format!(" Dex Explorer   [{} loaded]", app.all_entities.len()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let ActiveFilter::Category(code) = &app.active_filter {
        header_spans.push(Span::raw("  "));
        header_spans.push(Span::styled(
            format!(" {} ", crate::translate::category_label(code, app.locale)),
            Style::default().fg(Color::Black).bg(category_color(code)),
        ));
    }
    if app.loading {
        header_spans.push(Span::styled(
            "   ⟳ Loading...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Search bar ──
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let search_label = if app.input_mode == InputMode::Editing {
        " 🔍 Name or number (Enter to search, Esc to cancel): "
    } else {
        " 🔍 Search (/): "
    };
    let search_text = format!("{}{}", search_label, app.search_input);
    let search_bar = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(" Search "),
    );
    frame.render_widget(search_bar, chunks[1]);

    if app.input_mode == InputMode::Editing {
        let cursor_x = chunks[1].x
            + 1
            + search_label.width() as u16
            + app.search_input.width() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    // ── Cards ──
    let items: Vec<ListItem> = app
        .visible_indices()
        .iter()
        .map(|&i| {
            let card = CardView::from_entity(&app.all_entities[i], app.locale);
            let mut spans = vec![
                Span::styled(
                    format!("{:>6} ", card.number),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    pad_to_width(&card.name, NAME_WIDTH),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ];
            for badge in &card.badges {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!(" {} ", badge.label),
                    Style::default().fg(Color::Black).bg(category_color(&badge.code)),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let page_info = format!(
        " {}-{} of {} ",
        if app.filtered.is_empty() { 0 } else { app.list_offset + 1 },
        app.list_offset + app.visible_indices().len(),
        app.filtered.len()
    );

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Catalog ")
        .title_bottom(Line::from(page_info).alignment(Alignment::Right));
    if app.pagination_visible() && !app.loading {
        block = block.title_bottom(
            Line::from(Span::styled(
                " [m] Load more ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );
    }

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if !app.filtered.is_empty() {
        list_state.select(Some(app.list_selected));
    }
    frame.render_stateful_widget(list_widget, chunks[2], &mut list_state);

    // ── Status bar ──
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ↑↓"),
        Span::raw(" Navigate  "),
        key("/"),
        Span::raw(" Search  "),
        key("t"),
        Span::raw(" Type  "),
        key("r"),
        Span::raw(" Surprise  "),
        key("Enter"),
        Span::raw(" Detail  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

/// Pad or truncate to a display width, adding "…" if truncated.
pub fn pad_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 1 >= width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    let w = out.width();
    out + &" ".repeat(width.saturating_sub(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("Pikachu", 9), "Pikachu  ");
        assert_eq!(pad_to_width("Fletchinder", 6), "Fletc…");
        assert_eq!(pad_to_width("", 2), "  ");
    }

    #[test]
    fn test_card_row_at() {
        let area = Rect::new(0, 0, 80, 30);
        // List block starts at y=6; its first inner row is y=7.
        assert_eq!(card_row_at(area, 10, 7), Some(0));
        assert_eq!(card_row_at(area, 10, 9), Some(2));
        assert_eq!(card_row_at(area, 10, 6), None);
        assert_eq!(card_row_at(area, 0, 8), None);
        assert_eq!(card_row_at(area, 10, 29), None);
    }
}
