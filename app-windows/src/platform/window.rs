//! Window creation and message handling.
//!
//! Two window classes: the hidden host window that owns the tray icon and hotkeys for
//! the life of the process, and the managed windows that host web content. Window
//! procedures never touch shell state directly; they hand events to [`app::dispatch`].

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use log::{error, info};
use notedb_core::{
    HotkeyId, SettingsStore, Shell, ShellEvent, ShellOptions, TrayEvent, TrayItem, WindowBackend,
    WindowError, WindowSlot, WindowSpec,
};
use windows::{
    Win32::{
        Foundation::{E_FAIL, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM},
        System::{
            Com::{COINIT_APARTMENTTHREADED, CoInitializeEx},
            LibraryLoader::GetModuleHandleW,
        },
        UI::WindowsAndMessaging::{
            CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW,
            DestroyWindow, DispatchMessageW, GWLP_USERDATA, GetMessageW, GetWindowLongPtrW,
            IDC_ARROW, IsIconic, LoadCursorW, MSG, RegisterClassW, RegisterWindowMessageW,
            SW_HIDE, SW_RESTORE, SW_SHOW, SetForegroundWindow, SetWindowLongPtrW, ShowWindow,
            TranslateMessage, WINDOW_EX_STYLE, WM_CLOSE, WM_COMMAND, WM_CONTEXTMENU, WM_DESTROY,
            WM_HOTKEY, WM_LBUTTONDBLCLK, WM_NCDESTROY, WM_RBUTTONUP, WM_SETFOCUS, WM_SIZE,
            WNDCLASSW, WS_EX_TOOLWINDOW, WS_OVERLAPPED, WS_OVERLAPPEDWINDOW,
        },
    },
    core::{Error, HSTRING, PCWSTR, Result, w},
};

use super::hotkey::Win32Hotkeys;
use super::tray::{self, Win32Tray};
use super::wm;
use crate::app::{self, App};
use crate::webview::{WebView, bridge::post_message, init_webview};

pub const HOST_CLASS: PCWSTR = w!("SmartNoteDBHostWindow");
const MANAGED_CLASS: PCWSTR = w!("SmartNoteDBWindow");

/// Broadcast by Explorer when the taskbar is recreated.
static TASKBAR_CREATED: AtomicU32 = AtomicU32::new(0);

/// Per-window state of a managed window, owned through GWLP_USERDATA.
struct ManagedWindow {
    slot: WindowSlot,
    webview: Option<WebView>,
    /// Set before the shell destroys the window itself.
    destroying: bool,
}

/// Runs the application until the quit command.
pub fn run(data_dir: &Path, options: ShellOptions) -> Result<()> {
    unsafe {
        CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()?;
        // Keep browser profile data next to the settings.
        std::env::set_var("WEBVIEW2_USER_DATA_FOLDER", data_dir.join("WebView2"));

        let instance: HINSTANCE = GetModuleHandleW(None)?.into();
        register_classes(instance)?;

        let host = CreateWindowExW(
            WS_EX_TOOLWINDOW,
            HOST_CLASS,
            w!("Smart NoteDB"),
            WS_OVERLAPPED,
            0,
            0,
            0,
            0,
            None,
            None,
            Some(instance),
            None,
        )?;
        TASKBAR_CREATED.store(RegisterWindowMessageW(w!("TaskbarCreated")), Ordering::Relaxed);

        let shell = Shell::new(
            SettingsStore::new(data_dir),
            options,
            Win32Hotkeys::new(host),
            Win32Windows::new(instance),
            Win32Tray::new(host),
        );
        app::install(App::new(host, shell));

        if let Err(e) = app::startup() {
            error!("Startup failed: {}", e);
            drop(app::uninstall());
            let _ = DestroyWindow(host);
            return Err(Error::new(E_FAIL, e.to_string()));
        }

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).into() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        drop(app::uninstall());
        let _ = DestroyWindow(host);
        info!("Exited cleanly");
        Ok(())
    }
}

unsafe fn register_classes(instance: HINSTANCE) -> Result<()> {
    unsafe {
        let cursor = LoadCursorW(None, IDC_ARROW)?;

        let host = WNDCLASSW {
            lpfnWndProc: Some(host_wndproc),
            hInstance: instance,
            lpszClassName: HOST_CLASS,
            ..Default::default()
        };
        let managed = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(managed_wndproc),
            hInstance: instance,
            hCursor: cursor,
            lpszClassName: MANAGED_CLASS,
            ..Default::default()
        };

        for class in [&host, &managed] {
            if RegisterClassW(class) == 0 {
                return Err(Error::from_hresult(E_FAIL));
            }
        }
        Ok(())
    }
}

/// Native top-level windows hosting WebView2 content.
pub struct Win32Windows {
    instance: HINSTANCE,
}

impl Win32Windows {
    pub fn new(instance: HINSTANCE) -> Self {
        Self { instance }
    }
}

impl WindowBackend for Win32Windows {
    type Handle = HWND;

    fn create(&mut self, slot: WindowSlot, spec: &WindowSpec) -> std::result::Result<HWND, WindowError> {
        let title = HSTRING::from(spec.title.as_str());
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                MANAGED_CLASS,
                &title,
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                spec.width as i32,
                spec.height as i32,
                None,
                None,
                Some(self.instance),
                None,
            )
        }
        .map_err(|e| WindowError::Create {
            slot,
            reason: e.message(),
        })?;

        let data = Box::new(ManagedWindow {
            slot,
            webview: None,
            destroying: false,
        });
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(data) as isize) };

        init_webview(hwnd, slot, spec.url.clone());
        Ok(hwnd)
    }

    fn show(&mut self, hwnd: HWND) {
        unsafe {
            let cmd = if IsIconic(hwnd).as_bool() { SW_RESTORE } else { SW_SHOW };
            let _ = ShowWindow(hwnd, cmd);
        }
    }

    fn hide(&mut self, hwnd: HWND) {
        unsafe {
            let _ = ShowWindow(hwnd, SW_HIDE);
        }
    }

    fn focus(&mut self, hwnd: HWND) {
        unsafe {
            let _ = SetForegroundWindow(hwnd);
            if let Some(webview) = window_data(hwnd).and_then(|d| d.webview.as_ref()) {
                webview.focus();
            }
        }
    }

    fn destroy(&mut self, hwnd: HWND) {
        unsafe {
            if let Some(data) = window_data(hwnd) {
                data.destroying = true;
            }
            let _ = DestroyWindow(hwnd);
        }
    }

    fn post(&mut self, hwnd: HWND, message: &notedb_core::OutgoingMessage) {
        match unsafe { window_data(hwnd) }.and_then(|d| d.webview.as_ref()) {
            Some(webview) => post_message(&webview.webview, message),
            None => log::debug!("Dropping {:?}: content not loaded yet", message),
        }
    }
}

/// Hands a finished WebView to its window, or closes it if the window is gone.
pub fn attach_webview(hwnd: HWND, webview: WebView) {
    match unsafe { window_data(hwnd) } {
        Some(data) => {
            webview.fit_to(hwnd);
            data.webview = Some(webview);
        }
        None => webview.close(),
    }
}

/// Gets the managed window state from the window's user data.
///
/// # Safety
///
/// Caller must ensure only one mutable reference exists at a time.
/// Calling this twice without dropping the first reference is UB.
unsafe fn window_data(hwnd: HWND) -> Option<&'static mut ManagedWindow> {
    unsafe {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut ManagedWindow;
        if ptr.is_null() { None } else { Some(&mut *ptr) }
    }
}

extern "system" fn managed_wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_CLOSE => match window_data(hwnd) {
                Some(data) => {
                    let slot = data.slot;
                    app::dispatch(ShellEvent::CloseRequested(slot));
                    LRESULT(0)
                }
                None => DefWindowProcW(hwnd, msg, wparam, lparam),
            },
            WM_SIZE => {
                if let Some(webview) = window_data(hwnd).and_then(|d| d.webview.as_ref()) {
                    webview.fit_to(hwnd);
                }
                LRESULT(0)
            }
            WM_SETFOCUS => {
                if let Some(webview) = window_data(hwnd).and_then(|d| d.webview.as_ref()) {
                    webview.focus();
                }
                LRESULT(0)
            }
            WM_DESTROY => {
                if let Some(data) = window_data(hwnd) {
                    if let Some(webview) = data.webview.take() {
                        webview.close();
                    }
                    if !data.destroying {
                        let slot = data.slot;
                        app::dispatch(ShellEvent::WindowDestroyed(slot));
                    }
                }
                LRESULT(0)
            }
            WM_NCDESTROY => {
                let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut ManagedWindow;
                if !ptr.is_null() {
                    SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                    drop(Box::from_raw(ptr));
                }
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

extern "system" fn host_wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_HOTKEY => {
                app::dispatch(ShellEvent::Hotkey(HotkeyId(wparam.0 as i32)));
                LRESULT(0)
            }
            wm::TRAY_ICON => {
                // lparam contains the mouse message
                match (lparam.0 & 0xFFFF) as u32 {
                    WM_LBUTTONDBLCLK => app::dispatch(ShellEvent::Tray(TrayEvent::DoubleClick)),
                    WM_RBUTTONUP | WM_CONTEXTMENU => tray::show_menu(hwnd),
                    _ => {}
                }
                LRESULT(0)
            }
            WM_COMMAND => {
                let cmd_id = (wparam.0 & 0xFFFF) as u32;
                if let Some(item) = TrayItem::from_id(cmd_id) {
                    app::dispatch(ShellEvent::Tray(TrayEvent::Menu(item)));
                }
                LRESULT(0)
            }
            wm::SHELL_EVENT => {
                if let Some(event) = wm::take_event(lparam) {
                    app::dispatch(event);
                }
                LRESULT(0)
            }
            wm::ACTIVATE_INSTANCE => {
                app::dispatch(ShellEvent::Reactivate);
                LRESULT(0)
            }
            _ if msg != 0 && msg == TASKBAR_CREATED.load(Ordering::Relaxed) => {
                tray::restore_icon(hwnd);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
