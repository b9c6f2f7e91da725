use crate::app::App;
use crate::ui::{category_color, centered_rect};
use crate::view::{DetailView, TextLabels};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

/// Screen area covered by the modal. Clicks outside it dismiss the modal.
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(70, 80, area)
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

pub fn render(app: &App, frame: &mut Frame) {
    let entity = match app.detail_entity() {
        Some(e) => e,
        None => return,
    };
    let view = DetailView::from_entity(entity, app.locale);
    let labels = TextLabels::for_locale(app.locale);

    let area = modal_area(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Detail ")
        .title_bottom(
            Line::from(" [x/Esc] Close  ↑↓ Scroll ")
                .alignment(Alignment::Right)
                .style(Style::default().fg(Color::DarkGray)),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stats_height = view.stats.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(stats_height)])
        .split(inner);

    // ── Text sections ──
    let mut badge_spans = Vec::new();
    for badge in &view.badges {
        badge_spans.push(Span::styled(
            format!(" {} ", badge.label),
            Style::default().fg(Color::Black).bg(category_color(&badge.code)),
        ));
        badge_spans.push(Span::raw(" "));
    }

    let mut lines = vec![
        Line::from(Span::styled(
            view.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(badge_spans).alignment(Alignment::Center),
    ];
    if let Some(url) = &view.image_url {
        lines.push(
            Line::from(Span::styled(
                url.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ))
            .alignment(Alignment::Center),
        );
    }
    lines.push(Line::from(""));
    lines.push(heading(labels.description));
    lines.push(Line::from(view.description.clone()));
    lines.push(Line::from(""));
    lines.push(heading(labels.info));
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", labels.height), Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} m", view.height_m)),
        Span::raw("   "),
        Span::styled(format!("{}: ", labels.weight), Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} kg", view.weight_kg)),
        Span::raw("   "),
        Span::styled(
            format!("{}: ", labels.base_experience),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(
            view.base_experience
                .map(|x| x.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(heading(labels.abilities));
    let mut ability_spans = Vec::new();
    for ability in &view.abilities {
        ability_spans.push(Span::styled(
            format!(" {} ", ability),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ));
        ability_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(ability_spans));

    let text = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(text, chunks[0]);

    // ── Stat bars ──
    let stats_block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", labels.stats));
    let stats_inner = stats_block.inner(chunks[1]);
    frame.render_widget(stats_block, chunks[1]);

    let label_width = view
        .stats
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(view.stats.iter().map(|_| Constraint::Length(1)))
        .split(stats_inner);

    for (stat, row) in view.stats.iter().zip(rows.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(label_width + 2),
                Constraint::Min(10),
                Constraint::Length(5),
            ])
            .split(*row);

        frame.render_widget(
            Paragraph::new(format!("{}:", stat.label)).style(Style::default().add_modifier(Modifier::BOLD)),
            cols[0],
        );
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
                .ratio(stat.percent / 100.0)
                .label(""),
            cols[1],
        );
        frame.render_widget(
            Paragraph::new(stat.value.to_string()).alignment(Alignment::Right),
            cols[2],
        );
    }
}
