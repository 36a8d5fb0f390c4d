use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("hotkey error: {0}")]
    Hotkey(#[from] HotkeyError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(serde_json::Error),

    #[error("serialize error: {0}")]
    Serialize(serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard access failed: {0}")]
    Access(String),

    #[error("clipboard unavailable after {attempts} attempts: {last}")]
    Unavailable { attempts: u32, last: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HotkeyError {
    #[error("shortcut is empty")]
    Empty,

    #[error("shortcut has no key: {0}")]
    MissingKey(String),

    #[error("shortcut has more than one key: {0}")]
    MultipleKeys(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("global shortcut must include Ctrl or Alt: {0}")]
    NeedsCtrlOrAlt(String),
}
