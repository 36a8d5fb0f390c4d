//! Data directory resolution and settings persistence.

use snippetpad_core::settings::AppSettings;
use snippetpad_core::store::SNIPPETS_FILE_NAME;
use std::path::{Path, PathBuf};

/// Overrides the data directory.
const DATA_DIR_VAR: &str = "SNIPPETPAD_DATA_DIR";

/// Files the launcher reads and writes.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub dir: PathBuf,
    pub snippets: PathBuf,
    pub settings: PathBuf,
}

impl DataPaths {
    pub fn resolve() -> Self {
        Self::in_dir(data_dir())
    }

    fn in_dir(dir: PathBuf) -> Self {
        Self {
            snippets: dir.join(SNIPPETS_FILE_NAME),
            settings: AppSettings::path(&dir),
            dir,
        }
    }
}

/// `SNIPPETPAD_DATA_DIR`, else the directory holding the executable.
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_VAR)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Loads settings, falling back to defaults for anything missing or invalid.
pub fn load_settings(paths: &DataPaths) -> AppSettings {
    let settings = match AppSettings::load(&paths.settings) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(
                path = %paths.settings.display(),
                error = %err,
                "settings unreadable, using defaults"
            );
            return AppSettings::default();
        }
    };

    let problems = settings.validate();
    if problems.is_empty() {
        return settings;
    }
    for problem in &problems {
        tracing::warn!(%problem, "invalid setting replaced by default");
    }
    settings.with_defaults_for_invalid()
}

pub fn save_settings(paths: &DataPaths, settings: &AppSettings) {
    if let Err(err) = std::fs::create_dir_all(&paths.dir) {
        tracing::warn!(dir = %paths.dir.display(), error = %err, "cannot create data directory");
        return;
    }
    match settings.save(&paths.settings) {
        Ok(()) => tracing::debug!(path = %paths.settings.display(), "settings saved"),
        Err(err) => {
            tracing::warn!(path = %paths.settings.display(), error = %err, "settings not saved")
        }
    }
}
