//! Theme tokens — neon accents on a dark terminal background.
//!
//! Style lookups are free functions so render code stays terse:
//! `theme::accent()`, `theme::muted()`, and so on.

use ratatui::style::{Color, Modifier, Style};

const ACCENT: Color = Color::Rgb(0, 255, 255);
const WARNING: Color = Color::Rgb(255, 140, 0);
const NEGATIVE: Color = Color::Rgb(255, 20, 147);
const NEUTRAL: Color = Color::Rgb(147, 112, 219);
const MUTED: Color = Color::Rgb(100, 149, 237);
const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

/// Primary text.
pub fn text() -> Style {
    Style::default().fg(Color::White)
}

/// Secondary text.
pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

/// Disabled or de-emphasized elements.
pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Focus and highlights.
pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

/// Transient warnings (out-of-range values).
pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

/// Hard problems (bad configuration, failed actions).
pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
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

/// Style for the inline alert region. Configuration problems and action
/// failures are hard errors; value-range drift is only a warning.
pub fn alert(hard: bool) -> Style {
    if hard {
        negative()
    } else {
        warning()
    }
}

/// Style for a slider handle glyph.
pub fn handle(active: bool) -> Style {
    if active {
        accent_bold().add_modifier(Modifier::REVERSED)
    } else {
        accent()
    }
}
