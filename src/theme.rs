//! Theme
//!
//! Shared colors for the widgets.

use ratatui::style::{Color, Modifier, Style};

pub fn hex_color(rgb: u32) -> Color {
    Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    )
}

pub const ACCENT: Color = Color::Magenta;
pub const MUTED: Color = Color::DarkGray;
pub const ERROR: Color = Color::Red;

pub fn header_style() -> Style {
    Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
}

pub fn selected_row_style() -> Style {
    Style::default().bg(hex_color(0x1E3A5F))
}

pub fn cursor_row_style() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(0x4C566A), Color::Rgb(0x4C, 0x56, 0x6A));
    }
}
