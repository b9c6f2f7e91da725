use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Toast in the top-right corner while a notice is live.
pub fn render(app: &App, frame: &mut Frame) {
    let Some(notice) = &app.notice else {
        return;
    };
    let screen = frame.area();
    let width = (notice.message.width() as u16 + 4).min(screen.width);
    let area = Rect {
        x: screen.x + screen.width.saturating_sub(width + 1),
        y: screen.y + 1,
        width,
        height: 3.min(screen.height),
    };

    frame.render_widget(Clear, area);
    let toast = Paragraph::new(notice.message.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White).bg(Color::Red)),
        );
    frame.render_widget(toast, area);
}
