//! Settings persistence
//!
//! [`EngineSettings`] live in `settings.json` under the user's configuration directory.
//! A missing or unreadable file is not an error: the defaults are used and a warning is logged.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chess_engine::SearchConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const SETTINGS_FILENAME: &str = "settings.json";

/// Default number of plies taken from each plain-text book line.
pub const DEFAULT_BOOK_MAX_PLIES: usize = 8;

/// Everything the front end remembers between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub search: SearchConfig,
    /// Opening book loaded at startup, if any.
    pub book_path: Option<PathBuf>,
    /// Cap on the plies read from each plain-text book line.
    pub book_max_plies: usize,
    /// Cap on the plies read from each CSV book line; `None` keeps whole lines.
    pub csv_max_plies: Option<usize>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            book_path: None,
            book_max_plies: DEFAULT_BOOK_MAX_PLIES,
            csv_max_plies: None,
        }
    }
}

/// `settings.json` in the platform config directory, or in the working directory when
/// no home directory can be resolved.
pub fn settings_path() -> PathBuf {
    match ProjectDirs::from("com", "chess-search", "chess-search") {
        Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
        None => PathBuf::from(SETTINGS_FILENAME),
    }
}

/// Reads settings from `path`, falling back to defaults.
pub fn load_settings(path: &Path) -> EngineSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings at {:?}, using defaults", path);
        return EngineSettings::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("[SETTINGS] Failed to read {:?}: {}. Using defaults.", path, e);
            return EngineSettings::default();
        }
    };

    match serde_json::from_str::<EngineSettings>(&contents) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("[SETTINGS] Failed to parse {:?}: {}. Using defaults.", path, e);
            EngineSettings::default()
        }
    }
}

/// Writes settings as pretty JSON, creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &EngineSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating settings directory {:?}", parent))?;
        }
    }
    let json = serde_json::to_string_pretty(settings).context("serializing settings")?;
    fs::write(path, json).with_context(|| format!("writing settings to {:?}", path))?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
