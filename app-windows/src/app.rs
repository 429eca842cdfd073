//! Application coordinator.
//!
//! The [`App`] lives in a thread-local on the UI thread. Win32 can re-enter a window
//! procedure while a shell transition is running (showing or destroying a window sends
//! messages synchronously), so [`dispatch`] defers any event that arrives mid-transition
//! to the host window's message queue instead of handling it nested.

use std::cell::{Cell, RefCell};

use log::debug;
use notedb_core::{Flow, Shell, ShellError, ShellEvent};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::PostQuitMessage;

use crate::platform::hotkey::Win32Hotkeys;
use crate::platform::tray::Win32Tray;
use crate::platform::window::Win32Windows;
use crate::platform::wm;

pub type Win32Shell = Shell<Win32Hotkeys, Win32Windows, Win32Tray>;

/// Application coordinator, owns the shell and the host window it reports to.
pub struct App {
    shell: Win32Shell,
    host: HWND,
}

impl App {
    pub fn new(host: HWND, shell: Win32Shell) -> Self {
        Self { shell, host }
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static HOST: Cell<HWND> = const { Cell::new(HWND(std::ptr::null_mut())) };
}

pub fn install(app: App) {
    HOST.with(|h| h.set(app.host));
    APP.with(|cell| *cell.borrow_mut() = Some(app));
}

pub fn uninstall() -> Option<App> {
    APP.with(|cell| cell.borrow_mut().take())
}

pub fn startup() -> Result<(), ShellError> {
    APP.with(|cell| match cell.borrow_mut().as_mut() {
        Some(app) => app.shell.startup().map(|_| ()),
        None => Ok(()),
    })
}

/// Runs `event` through the shell, or queues it if a transition is in progress.
pub fn dispatch(event: ShellEvent) {
    let outcome = APP.with(|cell| match cell.try_borrow_mut() {
        Ok(mut app) => Ok(app.as_mut().map(|app| app.shell.handle(event))),
        Err(_) => Err(event),
    });

    match outcome {
        Ok(Some(Flow::Exit)) => unsafe { PostQuitMessage(0) },
        Ok(_) => {}
        Err(event) => {
            debug!("Deferring {:?}", event);
            wm::post_event(HOST.with(Cell::get), event);
        }
    }
}
