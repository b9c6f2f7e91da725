pub mod detail;
mod filters;
mod help;
pub mod list;
mod notice;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    list::render(app, frame);

    if app.detail.is_some() {
        detail::render(app, frame);
    }

    if app.category_picker.is_some() {
        filters::render(app, frame);
    }

    notice::render(app, frame);

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// Badge colour for a category code.
pub fn category_color(code: &str) -> Color {
    match code {
        "normal" => Color::Gray,
        "fire" => Color::LightRed,
        "water" => Color::Blue,
        "electric" => Color::Yellow,
        "grass" => Color::Green,
        "ice" => Color::LightCyan,
        "fighting" => Color::Red,
        "poison" => Color::Magenta,
        "ground" => Color::Rgb(226, 191, 101),
        "flying" => Color::LightBlue,
        "psychic" => Color::LightMagenta,
        "bug" => Color::LightGreen,
        "rock" => Color::Rgb(182, 161, 54),
        "ghost" => Color::Rgb(115, 87, 151),
        "dragon" => Color::Rgb(111, 53, 252),
        "dark" => Color::DarkGray,
        "steel" => Color::Rgb(183, 183, 206),
        "fairy" => Color::Rgb(214, 133, 173),
        _ => Color::White,
    }
}

/// Create a centered rectangle using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
