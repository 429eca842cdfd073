//! Win32 platform layer.

pub mod hotkey;
pub mod single_instance;
pub mod tray;
pub mod window;
pub mod wm;
