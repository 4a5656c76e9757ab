//! Theme and styling for the Datascope TUI.
//!
//! A dark theme with a teal accent. All styling goes through these helpers so
//! panels stay visually consistent.

use ratatui::style::{Color, Modifier, Style};

/// Accent color for focus indicators and highlighted values.
pub const ACCENT: Color = Color::Rgb(38, 166, 154);

/// Primary foreground color for normal text.
pub const FG: Color = Color::Rgb(224, 224, 230);

/// Muted foreground for hints, bounds, and secondary information.
pub const FG_MUTED: Color = Color::Rgb(150, 150, 158);

/// Border color for unfocused panels.
pub const BORDER: Color = Color::Rgb(72, 72, 80);

/// Border color for the focused panel.
pub const BORDER_FOCUS: Color = ACCENT;

/// Warning color for error lines in the status log.
pub const WARN: Color = Color::Rgb(235, 160, 80);

pub fn text_style() -> Style {
    Style::default().fg(FG)
}

pub fn text_muted() -> Style {
    Style::default().fg(FG_MUTED)
}

pub fn title_style() -> Style {
    Style::default().fg(FG).add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn accent_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn warn_style() -> Style {
    Style::default().fg(WARN)
}

/// Row style for the cursor line in lists and the form.
pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn list_highlight_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}
