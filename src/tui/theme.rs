//! Theme and Styling
//!
//! Defines colors and styles for the TUI interface.

use ratatui::style::{Color, Modifier, Style};

/// Application theme
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Primary accent color (blue)
    pub const ACCENT: Color = Color::Rgb(96, 165, 250);

    /// Secondary accent (violet)
    pub const VIOLET: Color = Color::Rgb(167, 139, 250);

    /// Success color (green)
    pub const SUCCESS: Color = Color::Rgb(34, 197, 94);

    /// Warning color (yellow/amber)
    pub const WARNING: Color = Color::Rgb(251, 191, 36);

    /// Error color (red)
    pub const ERROR: Color = Color::Rgb(248, 113, 113);

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 231, 235);
    pub const TEXT_SECONDARY: Color = Color::Rgb(156, 163, 175);
    pub const TEXT_DIM: Color = Color::Rgb(75, 85, 99);

    // === Border Colors ===

    pub const BORDER: Color = Color::Rgb(55, 65, 81);
    pub const BORDER_FOCUSED: Color = Color::Rgb(59, 130, 246);

    // === Styles ===

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Secondary/muted text style
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Dimmed text style
    pub fn text_dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    /// Title style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Heading style
    pub fn heading() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Default border style
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border style
    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Links
    pub fn link() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Keyboard shortcut style
    pub fn shortcut_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Shortcut description style
    pub fn shortcut_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Active/in-progress indicator
    pub fn active() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Complete indicator
    pub fn complete() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    /// Neutral badge (year, date)
    pub fn badge() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BORDER)
    }

    /// Category badge
    pub fn badge_category() -> Style {
        Style::default().fg(Color::Black).bg(Self::VIOLET)
    }

    /// Source-name badge
    pub fn badge_source() -> Style {
        Style::default().fg(Color::Black).bg(Self::ACCENT)
    }
}

/// Status and list icons
pub struct Icons;

impl Icons {
    pub const ERROR: &'static str = "✗";
    pub const LINK: &'static str = "↗";
    pub const SELECTED: &'static str = "▶";
    pub const DOT: &'static str = "•";
}
