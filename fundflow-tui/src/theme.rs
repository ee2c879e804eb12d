//! Neon-on-charcoal style tokens for the FundFlow dashboard.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights, the primary series)
//! - **Positive**: Neon green (up days, gains)
//! - **Negative**: Hot pink (down days, losses, failures)
//! - **Warning**: Neon orange (alerts, elevated volatility, trigger ticks)
//! - **Neutral**: Cool purple (secondary series, hints)
//! - **Muted**: Steel blue (labels, disabled text)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 165, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::Rgb(235, 235, 235);

/// Line colors for peer series, in peer order.
pub const PEER_COLORS: [Color; 3] = [NEUTRAL, WARNING, Color::Rgb(255, 255, 0)];

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

/// Green for zero and up, pink for down.
pub fn change_color(value: f64) -> Style {
    if value >= 0.0 {
        positive()
    } else {
        negative()
    }
}

pub fn peer_color(index: usize) -> Color {
    PEER_COLORS[index % PEER_COLORS.len()]
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

pub fn selected_row() -> Style {
    Style::default()
        .fg(Color::Rgb(18, 18, 20))
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}
