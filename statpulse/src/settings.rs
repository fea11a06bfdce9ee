//! Saved defaults: a small JSON file of session settings.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/statpulse/settings.json
//! (fallback ~/.config/statpulse/settings.json)

use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};
use tracing::warn;

use crate::config::SessionConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub user: bool,
    #[serde(default)]
    pub graphics: bool,
    #[serde(default)]
    pub sequential: bool,
    #[serde(default)]
    pub version: u32,
}

impl From<&SessionConfig> for Settings {
    fn from(cfg: &SessionConfig) -> Self {
        Self {
            samples: Some(cfg.sample_count),
            interval_secs: Some(cfg.interval_secs),
            system: cfg.show_system,
            user: cfg.show_user,
            graphics: cfg.show_graphics,
            sequential: cfg.sequential,
            version: 1,
        }
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("statpulse")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("statpulse")
    }
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Missing file means defaults; a malformed one is reported and ignored.
pub fn load_settings() -> Settings {
    let path = settings_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            warn!(path = %path.display(), "ignoring malformed settings file: {e}");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

pub fn save_settings(s: &Settings) -> io::Result<()> {
    let path = settings_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(s).map_err(io::Error::other)?;
    fs::write(path, data)
}
