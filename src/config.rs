use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::memory::MemorySettings;
use crate::quiz::QuizSettings;
use crate::ui::theme::{parse_hex_color, Theme, ThemeMode};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub memory: MemoryConfig,
    pub quiz: QuizConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Preset used in dark mode
    pub dark_theme: String,
    /// Preset used in light mode
    pub light_theme: String,
    /// Optional accent override, hex (`#rrggbb`)
    pub accent: Option<String>,
    /// Glyph printed on face-down cards
    pub hidden_card: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Countdown length in seconds
    pub duration_secs: u32,
    /// Pause before the result screen after the last pair
    pub match_end_delay_ms: u64,
    /// How long a mismatched pair stays visible
    pub mismatch_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Countdown length in seconds
    pub duration_secs: u32,
    /// Pause before moving to the next question after answering
    pub advance_delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where the theme flag is kept (defaults to the XDG data dir)
    pub prefs_path: Option<PathBuf>,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            dark_theme: "midnight".to_string(),
            light_theme: "catppuccin-latte".to_string(),
            accent: None,
            hidden_card: "?".to_string(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        let defaults = MemorySettings::default();
        Self {
            duration_secs: defaults.duration_secs,
            match_end_delay_ms: defaults.match_end_delay.as_millis() as u64,
            mismatch_delay_ms: defaults.mismatch_delay.as_millis() as u64,
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        let defaults = QuizSettings::default();
        Self {
            duration_secs: defaults.duration_secs,
            advance_delay_ms: defaults.advance_delay.as_millis() as u64,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn memory_settings(&self) -> MemorySettings {
        MemorySettings {
            duration_secs: self.memory.duration_secs.max(1),
            match_end_delay: Duration::from_millis(self.memory.match_end_delay_ms),
            mismatch_delay: Duration::from_millis(self.memory.mismatch_delay_ms),
        }
    }

    pub fn quiz_settings(&self) -> QuizSettings {
        QuizSettings {
            duration_secs: self.quiz.duration_secs.max(1),
            advance_delay: Duration::from_millis(self.quiz.advance_delay_ms),
        }
    }

    /// Theme for a mode, with the accent override applied.
    /// Unknown presets and bad colors fall back with a warning.
    pub fn resolve_theme(&self, mode: ThemeMode) -> Theme {
        let preset = match mode {
            ThemeMode::Dark => &self.appearance.dark_theme,
            ThemeMode::Light => &self.appearance.light_theme,
        };
        let theme = Theme::from_preset(preset).unwrap_or_else(|| {
            tracing::warn!("Unknown theme preset '{}', using default", preset);
            Theme::for_mode(mode)
        });

        match self.appearance.accent.as_deref().map(parse_hex_color) {
            Some(Ok(color)) => theme.with_accent(color),
            Some(Err(e)) => {
                tracing::warn!("Ignoring accent color: {}", e);
                theme
            }
            None => theme,
        }
    }

    pub fn prefs_path(&self) -> Option<PathBuf> {
        self.storage
            .prefs_path
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_defaults_match_engines() {
        let config = Config::default();
        assert_eq!(config.memory_settings(), MemorySettings::default());
        assert_eq!(config.quiz_settings(), QuizSettings::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r##"
            [memory]
            duration_secs = 60

            [appearance]
            accent = "#ff0000"
            "##,
        )
        .unwrap();

        assert_eq!(config.memory_settings().duration_secs, 60);
        assert_eq!(
            config.memory_settings().mismatch_delay,
            Duration::from_millis(1000)
        );
        assert_eq!(config.quiz.duration_secs, 900);
        assert_eq!(config.appearance.dark_theme, "midnight");
        assert_eq!(
            config.resolve_theme(ThemeMode::Dark).accent,
            Color::Rgb(255, 0, 0)
        );
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let mut config = Config::default();
        config.appearance.light_theme = "nope".to_string();
        config.appearance.accent = Some("zzz".to_string());
        assert_eq!(
            config.resolve_theme(ThemeMode::Light),
            Theme::catppuccin_latte()
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load(&path.to_string_lossy()).unwrap();
        assert!(config.storage.prefs_path.is_none());
    }

    #[test]
    fn test_bad_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[memory\nduration_secs = ").unwrap();
        assert!(Config::load(&path.to_string_lossy()).is_err());
    }
}
