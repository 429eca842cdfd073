pub mod bridge;
pub mod error;
pub mod hotkey;
pub mod settings;
pub mod shell;
pub mod tray;
pub mod types;
pub mod window;

pub use bridge::{IncomingMessage, OutgoingMessage};
pub use error::{
    AcceleratorError, Error, HotkeyError, Result, SettingsError, ShellError, TrayError,
    WindowError,
};
pub use hotkey::{ApplyReport, HotkeyBackend, HotkeyId, LiveBinding, ShortcutRegistrar};
pub use settings::SettingsStore;
pub use shell::{Command, Flow, Shell, ShellEvent};
pub use tray::{MenuEntry, TrayBackend, TrayController, TrayEvent, TrayItem, TrayMenu};
pub use types::{
    Accelerator, Key, Modifiers, ShellOptions, ShortcutAction, ShortcutConfig, WindowSlot,
    WindowSpec,
};
pub use window::{CloseOutcome, WindowBackend, WindowController, WindowState};
