use thiserror::Error;

use crate::types::WindowSlot;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("hotkey error: {0}")]
    Hotkey(#[from] HotkeyError),

    #[error("window error: {0}")]
    Window(#[from] WindowError),

    #[error("tray error: {0}")]
    Tray(#[from] TrayError),

    #[error("shell error: {0}")]
    Shell(#[from] ShellError),
}

/// Reasons an accelerator string cannot be turned into a key combination.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcceleratorError {
    #[error("accelerator is empty")]
    Empty,

    #[error("accelerator has no key, only modifiers")]
    NoKey,

    #[error("accelerator has more than one key: {0}")]
    MultipleKeys(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("accelerator is not a string")]
    NotText,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HotkeyError {
    #[error("invalid accelerator '{accelerator}': {source}")]
    InvalidAccelerator {
        accelerator: String,
        source: AcceleratorError,
    },

    #[error("'{0}' is already registered by another application")]
    AlreadyInUse(String),

    #[error("'{accelerator}' cannot be bound on this platform")]
    Unsupported { accelerator: String },

    #[error("OS rejected hotkey: {0}")]
    Os(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("failed to create {slot} window: {reason}")]
    Create { slot: WindowSlot, reason: String },
}

#[derive(Error, Debug)]
pub enum TrayError {
    #[error("failed to install tray icon: {0}")]
    Install(String),
}

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("shell already started")]
    AlreadyStarted,

    #[error("primary window unavailable: {0}")]
    PrimaryWindow(#[source] WindowError),

    #[error("shell is not running")]
    NotRunning,

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
