use crate::ui::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("  Global"),
        binding("    ?         ", "Toggle this help"),
        binding("    q         ", "Quit application"),
        binding("    Ctrl+C    ", "Quit from anywhere"),
        Line::from(""),
        section("  Catalog"),
        binding("    ↑/k ↓/j   ", "Navigate up/down"),
        binding("    PgUp/PgDn ", "Previous/next page of cards"),
        binding("    g/G       ", "Jump to first/last card"),
        binding("    Enter     ", "Open detail (or click a card)"),
        binding("    /         ", "Search by name or number"),
        binding("    t         ", "Filter by type"),
        binding("    Esc       ", "Clear search and filters"),
        binding("    r         ", "Surprise me: open a random entry"),
        binding("    m         ", "Load more entries"),
        Line::from(""),
        section("  Detail"),
        binding("    ↑/↓       ", "Scroll content"),
        binding("    x/Esc     ", "Close (or click outside)"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help — Keybindings ")
                .title_bottom(
                    Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
