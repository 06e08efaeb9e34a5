//! User settings (`settings.json`) and the directories zdialog writes to.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::kernel::{DialogError, Result};

const APP_NAME: &str = "zdialog";
const SETTINGS_FILE: &str = "settings.json";
const LOG_DIR: &str = "logs";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Alternate row background.
    #[serde(default)]
    pub rules_hint: bool,
    /// Select the first row as soon as it exists.
    #[serde(default)]
    pub always_selected: bool,
    /// Default result separator when `--separator` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Searched before the system icon directories.
    #[serde(default)]
    pub icon_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub theme: ThemeSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            header_fg: Some("cyan".to_string()),
            selected_bg: Some("dark_gray".to_string()),
            selected_fg: Some("white".to_string()),
            cursor_fg: Some("yellow".to_string()),
            rule_bg: Some("black".to_string()),
            accent_fg: Some("yellow".to_string()),
        }
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

/// Reads settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&data).map_err(|source| DialogError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads settings, logging and falling back to defaults on any failure.
pub fn load_settings_or_default(path: Option<&Path>) -> Settings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match get_settings_path() {
            Some(path) => path,
            None => return Settings::default(),
        },
    };

    match load_settings(&path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "using default settings");
            Settings::default()
        }
    }
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_state_dir().map(|dir| dir.join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return home_dir().map(|home| {
            home.join("Library/Application Support")
                .join(APP_NAME)
        });
    }

    #[cfg(not(target_os = "macos"))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(xdg).join(APP_NAME));
        }
        home_dir().map(|home| home.join(".config").join(APP_NAME))
    }
}

fn get_state_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return home_dir().map(|home| home.join("Library/Logs").join(APP_NAME));
    }

    #[cfg(not(target_os = "macos"))]
    {
        if let Some(xdg) = std::env::var_os("XDG_STATE_HOME").filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(xdg).join(APP_NAME));
        }
        home_dir().map(|home| home.join(".local/state").join(APP_NAME))
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
