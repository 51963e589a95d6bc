//! User settings persistence and UI configuration.
//!
//! This module handles loading and saving user preferences for the
//! annotator: interaction modes and overlay toggles.

use crate::error::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User-configurable settings persisted between sessions.
///
/// Settings are stored as JSON in the user's config directory
/// (e.g., `~/.config/landmarker/settings.json` on Linux).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Mesh clicks re-point the hovered target landmark.
    pub snap_mode: bool,
    /// Show a resizable box around multi-landmark selections.
    pub group_selection: bool,
    /// Draw lines from the cursor to the target and its neighbours.
    #[serde(default = "default_true")]
    pub show_targeting_lines: bool,
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Creates the config directory if it doesn't exist.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "landmarker", "landmarker").map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("settings.json")
        })
    }

    /// Loads settings from disk, falling back to defaults if not found.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|content| Self::from_json(&content))
            .unwrap_or_default()
    }

    fn from_json(content: &str) -> Option<Self> {
        match serde_json::from_str(content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings file: {}", e);
                None
            }
        }
    }

    /// Persists settings to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            let json = serde_json::to_string_pretty(self)?;
            fs::write(path, json)?;
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snap_mode: false,
            group_selection: true,
            show_targeting_lines: true,
        }
    }
}
