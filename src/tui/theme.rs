//! Color scheme for the dashboard TUI.

use ratatui::prelude::*;

/// Semantic colors for the dashboard's UI elements.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub primary: Color,
    pub accent: Color,
    pub border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,
}

/// The dashboard's dark scheme.
const DARK: ColorScheme = ColorScheme {
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,

    primary: Color::Cyan,
    accent: Color::Yellow,
    border: Color::DarkGray,
    text: Color::White,
    text_muted: Color::Gray,
    selection: Color::DarkGray,
};

/// Access the active color scheme.
#[must_use]
pub const fn colors() -> &'static ColorScheme {
    &DARK
}

/// Style a compliance-ish status string with a semantic color.
#[must_use]
pub fn status_color(status: &str) -> Color {
    match status {
        "Compliant" | "OK" | "Enabled" | "success" => colors().success,
        "Outdated" | "Skipped" | "pending" => colors().warning,
        "Noncompliant" | "Vulnerable" | "failure" | "error" => colors().error,
        "Missing" | "None" => colors().text_muted,
        _ => colors().text,
    }
}
