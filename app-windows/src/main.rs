//! Smart NoteDB desktop shell for Windows.
//!
//! Hosts the reader and memo pages in WebView2 windows, with a tray icon and global
//! hotkeys owned by a hidden host window.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(windows)]
mod app;
#[cfg(windows)]
mod logging;
#[cfg(windows)]
mod platform;
#[cfg(windows)]
mod storage;
#[cfg(windows)]
mod templates;
#[cfg(windows)]
mod webview;

#[cfg(windows)]
fn main() -> windows::core::Result<()> {
    let data_dir = storage::data_dir();
    logging::init(&data_dir);
    log::info!(
        "Smart NoteDB {} starting, data at {}",
        env!("CARGO_PKG_VERSION"),
        data_dir.display()
    );

    let Some(_instance) = platform::single_instance::acquire() else {
        log::info!("Another instance is running; asked it to come forward");
        return Ok(());
    };

    platform::window::run(&data_dir, storage::options_from_env())
}

#[cfg(not(windows))]
fn main() {
    eprintln!("notedb only runs on Windows");
    std::process::exit(1);
}
