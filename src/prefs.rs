//! Persisted user preferences.
//!
//! A tiny versioned key-value file. The only key the app writes is
//! `theme`, holding `"dark"` or `"light"`.
//!
//! Saves write a temp file next to the target and rename it into place,
//! so a reader never sees a half-written file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ui::theme::ThemeMode;

/// Key under which the theme flag is stored
pub const THEME_KEY: &str = "theme";

/// Prefs file format
#[derive(Debug, Serialize, Deserialize)]
struct PrefsFile {
    version: u32,
    values: BTreeMap<String, String>,
}

impl Default for PrefsFile {
    fn default() -> Self {
        Self {
            version: 1,
            values: BTreeMap::new(),
        }
    }
}

/// Preference store backed by a JSON file
#[derive(Debug, Clone)]
pub struct Prefs {
    values: BTreeMap<String, String>,
    path: PathBuf,
}

impl Prefs {
    pub fn new(path: PathBuf) -> Self {
        Self {
            values: BTreeMap::new(),
            path,
        }
    }

    /// Open the prefs at `path`. An unreadable or corrupt file is logged
    /// and treated as empty.
    pub fn open(path: PathBuf) -> Self {
        let mut prefs = Self::new(path);
        if let Err(e) = prefs.load() {
            tracing::warn!("Ignoring prefs at {}: {:#}", prefs.path.display(), e);
        }
        prefs
    }

    /// Default prefs file location
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("memquiz")
            .join("prefs.json")
    }

    /// Load prefs from disk. A missing file is not an error.
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            tracing::debug!("No prefs file found, starting fresh");
            return Ok(());
        }

        let content = fs::read_to_string(&self.path).context("Failed to read prefs file")?;
        let file: PrefsFile =
            serde_json::from_str(&content).context("Failed to parse prefs file")?;

        self.values = file.values;
        tracing::debug!("Loaded {} prefs", self.values.len());
        Ok(())
    }

    /// Write prefs to disk, creating the parent directory if needed
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).context("Failed to create prefs directory")?;

        let file = PrefsFile {
            values: self.values.clone(),
            ..PrefsFile::default()
        };
        let content = serde_json::to_string_pretty(&file).context("Failed to serialize prefs")?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).context("Failed to create temp prefs file")?;
        tmp.write_all(content.as_bytes())
            .context("Failed to write prefs file")?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .context("Failed to replace prefs file")?;

        tracing::debug!(path = %self.path.display(), "Saved prefs");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Stored theme. Only an explicit `"dark"` selects dark mode.
    pub fn theme_mode(&self) -> ThemeMode {
        match self.get(THEME_KEY).map(str::parse::<ThemeMode>) {
            Some(Ok(mode)) => mode,
            Some(Err(e)) => {
                tracing::debug!("{}", e);
                ThemeMode::Light
            }
            None => ThemeMode::Light,
        }
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.set(THEME_KEY, mode.to_string());
    }
}
