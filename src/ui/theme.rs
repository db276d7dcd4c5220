//! Theme system
//!
//! Provides:
//! - `ThemeMode` - the persisted light/dark flag
//! - `Theme` struct with all UI colors
//! - Built-in presets (midnight, catppuccin, nord, gruvbox)
//! - Hex color parsing for config overrides

use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Light or dark appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Glyph for the toggle: shows the mode you would switch to
    pub fn toggle_icon(self) -> &'static str {
        match self {
            ThemeMode::Light => "🌙",
            ThemeMode::Dark => "☀️",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme mode `{0}` (expected \"dark\" or \"light\")")]
pub struct ParseThemeModeError(String);

impl FromStr for ThemeMode {
    type Err = ParseThemeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(ParseThemeModeError(other.to_string())),
        }
    }
}

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Primary text color
    pub foreground: Color,
    /// Background under the keyboard cursor
    pub selection_bg: Color,
    /// Text color under the keyboard cursor
    pub selection_fg: Color,
    /// Accent color (borders, active tab)
    pub accent: Color,
    /// Dimmed text (hints, disabled buttons)
    pub dimmed: Color,
    /// More dimmed text (borders of inactive panes)
    pub dimmed_alt: Color,
    /// Back of a face-down card
    pub card_back: Color,
    /// Matched cards and correct answers
    pub correct: Color,
    /// Wrong answers
    pub incorrect: Color,
    /// Countdown running low, chosen option
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

impl Theme {
    /// Midnight theme - default dark preset
    pub fn midnight() -> Self {
        Self {
            background: Color::Rgb(13, 17, 22),     // #0d1116
            foreground: Color::Rgb(229, 234, 241),  // #e5eaf1
            selection_bg: Color::Rgb(20, 28, 42),   // #141c2a
            selection_fg: Color::Rgb(229, 234, 241),
            accent: Color::Rgb(180, 83, 9),         // #b45309 (amber)
            dimmed: Color::Rgb(156, 163, 175),      // #9ca3af
            dimmed_alt: Color::Rgb(107, 114, 128),  // #6b7280
            card_back: Color::Rgb(30, 41, 59),      // #1e293b
            correct: Color::Rgb(34, 197, 94),       // #22c55e
            incorrect: Color::Rgb(239, 68, 68),     // #ef4444
            warning: Color::Rgb(234, 179, 8),       // #eab308
        }
    }

    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            background: Color::Rgb(30, 30, 46),     // base
            foreground: Color::Rgb(205, 214, 244),  // text
            selection_bg: Color::Rgb(49, 50, 68),   // surface0
            selection_fg: Color::Rgb(205, 214, 244),
            accent: Color::Rgb(137, 180, 250),      // blue
            dimmed: Color::Rgb(166, 173, 200),      // subtext0
            dimmed_alt: Color::Rgb(147, 153, 178),  // overlay2
            card_back: Color::Rgb(69, 71, 90),      // surface1
            correct: Color::Rgb(166, 227, 161),     // green
            incorrect: Color::Rgb(243, 139, 168),   // red
            warning: Color::Rgb(249, 226, 175),     // yellow
        }
    }

    /// Catppuccin Latte theme - default light preset
    pub fn catppuccin_latte() -> Self {
        Self {
            background: Color::Rgb(239, 241, 245),  // base
            foreground: Color::Rgb(76, 79, 105),    // text
            selection_bg: Color::Rgb(204, 208, 218), // surface0
            selection_fg: Color::Rgb(76, 79, 105),
            accent: Color::Rgb(30, 102, 245),       // blue
            dimmed: Color::Rgb(108, 111, 133),      // subtext0
            dimmed_alt: Color::Rgb(140, 143, 161),  // overlay2
            card_back: Color::Rgb(188, 192, 204),   // surface1
            correct: Color::Rgb(64, 160, 43),       // green
            incorrect: Color::Rgb(210, 15, 57),     // red
            warning: Color::Rgb(223, 142, 29),      // yellow
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),     // nord0
            foreground: Color::Rgb(236, 239, 244),  // nord6
            selection_bg: Color::Rgb(67, 76, 94),   // nord2
            selection_fg: Color::Rgb(236, 239, 244),
            accent: Color::Rgb(136, 192, 208),      // nord8
            dimmed: Color::Rgb(216, 222, 233),      // nord4
            dimmed_alt: Color::Rgb(76, 86, 106),    // nord3
            card_back: Color::Rgb(59, 66, 82),      // nord1
            correct: Color::Rgb(163, 190, 140),     // nord14
            incorrect: Color::Rgb(191, 97, 106),    // nord11
            warning: Color::Rgb(235, 203, 139),     // nord13
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            background: Color::Rgb(40, 40, 40),     // bg
            foreground: Color::Rgb(235, 219, 178),  // fg
            selection_bg: Color::Rgb(60, 56, 54),   // bg1
            selection_fg: Color::Rgb(235, 219, 178),
            accent: Color::Rgb(215, 153, 33),       // yellow
            dimmed: Color::Rgb(168, 153, 132),      // gray
            dimmed_alt: Color::Rgb(146, 131, 116),  // gray
            card_back: Color::Rgb(80, 73, 69),      // bg2
            correct: Color::Rgb(152, 151, 26),      // green
            incorrect: Color::Rgb(204, 36, 29),     // red
            warning: Color::Rgb(250, 189, 47),      // bright yellow
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "midnight" | "default" => Some(Self::midnight()),
            "catppuccin-mocha" | "catppuccin_mocha" | "catppuccin" => Some(Self::catppuccin_mocha()),
            "catppuccin-latte" | "catppuccin_latte" => Some(Self::catppuccin_latte()),
            "nord" => Some(Self::nord()),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some(Self::gruvbox()),
            _ => None,
        }
    }

    /// Fallback preset for a mode when the configured name is unknown
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::midnight(),
            ThemeMode::Light => Self::catppuccin_latte(),
        }
    }

    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, rrggbb, rgb
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or(ColorError::InvalidHex)
    };

    match s.len() {
        // #rgb -> #rrggbb
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        // #rrggbb, or #rrggbbaa with alpha ignored
        6 | 8 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => Err(ColorError::InvalidLength),
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3, 6, or 8 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}
