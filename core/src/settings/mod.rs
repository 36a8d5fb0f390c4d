//! User-facing application settings, persisted as `settings.toml`.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(test)]
mod tests;

pub const SETTINGS_FILE_NAME: &str = "settings.toml";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub paste: PasteSettings,
    #[serde(default)]
    pub shortcuts: ShortcutSettings,
    #[serde(default)]
    pub window: WindowSettings,
}

impl AppSettings {
    /// Returns the settings file path within the given data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE_NAME)
    }

    /// Loads settings from a TOML file. Returns defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates values and returns the list of problems found.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.general.status_timeout_ms == 0 {
            errors.push("status_timeout_ms must be at least 1".to_string());
        }
        if self.paste.delay_ms > MAX_PASTE_DELAY_MS {
            errors.push(format!("paste delay_ms must be at most {MAX_PASTE_DELAY_MS}"));
        }
        if self.window.width < MIN_WINDOW_WIDTH || self.window.height < MIN_WINDOW_HEIGHT {
            errors.push(format!(
                "window must be at least {MIN_WINDOW_WIDTH}x{MIN_WINDOW_HEIGHT}"
            ));
        }

        errors
    }

    /// Returns a copy with invalid values replaced by their defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let general = GeneralSettings::default();
        let paste = PasteSettings::default();
        let window = WindowSettings::default();
        Self {
            general: GeneralSettings {
                always_on_top: self.general.always_on_top,
                status_timeout_ms: if self.general.status_timeout_ms == 0 {
                    general.status_timeout_ms
                } else {
                    self.general.status_timeout_ms
                },
            },
            paste: PasteSettings {
                enabled: self.paste.enabled,
                delay_ms: if self.paste.delay_ms > MAX_PASTE_DELAY_MS {
                    paste.delay_ms
                } else {
                    self.paste.delay_ms
                },
            },
            shortcuts: self.shortcuts.clone(),
            window: if self.window.width < MIN_WINDOW_WIDTH
                || self.window.height < MIN_WINDOW_HEIGHT
            {
                WindowSettings {
                    x: self.window.x,
                    y: self.window.y,
                    ..window
                }
            } else {
                self.window.clone()
            },
        }
    }
}

/// Paste delays beyond this would freeze the UI noticeably.
pub const MAX_PASTE_DELAY_MS: u64 = 1000;
pub const MIN_WINDOW_WIDTH: i32 = 160;
pub const MIN_WINDOW_HEIGHT: i32 = 120;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default = "default_true")]
    pub always_on_top: bool,
    #[serde(default = "default_status_timeout_ms")]
    pub status_timeout_ms: u64,
}

impl GeneralSettings {
    pub fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            always_on_top: true,
            status_timeout_ms: default_status_timeout_ms(),
        }
    }
}

/// Auto-paste into the last external window after copying.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_paste_delay_ms")]
    pub delay_ms: u64,
}

impl PasteSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for PasteSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: default_paste_delay_ms(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutSettings {
    /// Global shortcut that shows or hides the panel. Empty disables it.
    #[serde(default = "default_toggle_panel")]
    pub toggle_panel: String,
}

impl Default for ShortcutSettings {
    fn default() -> Self {
        Self {
            toggle_panel: default_toggle_panel(),
        }
    }
}

/// Last window placement. The origin is in screen pixels, the size in
/// 96-DPI pixels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_window_x")]
    pub x: i32,
    #[serde(default = "default_window_y")]
    pub y: i32,
    #[serde(default = "default_window_width")]
    pub width: i32,
    #[serde(default = "default_window_height")]
    pub height: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            x: default_window_x(),
            y: default_window_y(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_status_timeout_ms() -> u64 {
    2000
}

fn default_paste_delay_ms() -> u64 {
    100
}

fn default_toggle_panel() -> String {
    "Ctrl+Alt+Q".to_string()
}

fn default_window_x() -> i32 {
    100
}

fn default_window_y() -> i32 {
    70
}

fn default_window_width() -> i32 {
    280
}

fn default_window_height() -> i32 {
    750
}
