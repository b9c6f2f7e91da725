use crate::app::App;
use crate::translate::{CATEGORY_CODES, Locale, category_label};
use crate::ui::{category_color, centered_rect};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

/// Category picker overlay, the terminal stand-in for a select control.
pub fn render(app: &App, frame: &mut Frame) {
    let Some(cursor) = app.category_picker else {
        return;
    };
    let area = centered_rect(40, 80, frame.area());
    frame.render_widget(Clear, area);

    let all_label = match app.locale {
        Locale::Pt => "Todos os tipos",
        Locale::En => "All types",
    };
    let mut items = vec![ListItem::new(Line::from(Span::styled(
        format!(" {} ", all_label),
        Style::default().fg(Color::White),
    )))];
    for code in CATEGORY_CODES {
        let marker = if app.selected_category() == Some(code) { "● " } else { "  " };
        items.push(ListItem::new(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!(" {} ", category_label(code, app.locale)),
                Style::default().fg(Color::Black).bg(category_color(code)),
            ),
        ])));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Filter by type ")
                .title_bottom(
                    Line::from(" Enter select  Esc cancel ")
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}
