//! System tray icon management.

use std::cell::RefCell;
use std::mem::size_of;

use log::warn;
use notedb_core::{MenuEntry, TrayBackend, TrayError, TrayMenu};
use windows::Win32::{
    Foundation::{HWND, POINT},
    UI::{
        Shell::{
            NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
            Shell_NotifyIconW,
        },
        WindowsAndMessaging::{
            AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, IDI_APPLICATION, LoadIconW,
            MF_SEPARATOR, MF_STRING, PostMessageW, SetForegroundWindow, TPM_BOTTOMALIGN,
            TPM_LEFTALIGN, TPM_RIGHTBUTTON, TrackPopupMenu, WM_NULL,
        },
    },
};
use windows::core::{HSTRING, PCWSTR};

use super::wm;

/// Tray icon ID.
const TRAY_ICON_ID: u32 = 1;

thread_local! {
    /// Menu of the installed icon, read when the icon is right-clicked.
    static MENU: RefCell<Option<TrayMenu>> = const { RefCell::new(None) };
}

/// Tray icon owned by the host window. Callbacks arrive as [`wm::TRAY_ICON`].
pub struct Win32Tray {
    hwnd: HWND,
}

impl Win32Tray {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

impl TrayBackend for Win32Tray {
    fn install(&mut self, menu: &TrayMenu) -> Result<(), TrayError> {
        add_icon(self.hwnd, &menu.tooltip)?;
        MENU.with(|m| *m.borrow_mut() = Some(menu.clone()));
        Ok(())
    }

    fn remove(&mut self) {
        remove_icon(self.hwnd);
        MENU.with(|m| m.borrow_mut().take());
    }
}

fn add_icon(hwnd: HWND, tooltip: &str) -> Result<(), TrayError> {
    unsafe {
        let icon = LoadIconW(None, IDI_APPLICATION).map_err(|e| TrayError::Install(e.message()))?;
        let mut nid = NOTIFYICONDATAW {
            cbSize: size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd,
            uID: TRAY_ICON_ID,
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: wm::TRAY_ICON,
            hIcon: icon,
            ..Default::default()
        };

        // Truncated to leave room for the terminator
        let max = nid.szTip.len() - 1;
        for (slot, c) in nid.szTip.iter_mut().zip(tooltip.encode_utf16()).take(max) {
            *slot = c;
        }

        if Shell_NotifyIconW(NIM_ADD, &nid).as_bool() {
            Ok(())
        } else {
            Err(TrayError::Install(std::io::Error::last_os_error().to_string()))
        }
    }
}

fn remove_icon(hwnd: HWND) {
    let nid = NOTIFYICONDATAW {
        cbSize: size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ICON_ID,
        ..Default::default()
    };
    unsafe {
        let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
    }
}

/// Re-adds the icon after Explorer restarts, if one was installed.
pub fn restore_icon(hwnd: HWND) {
    let tooltip = MENU.with(|m| m.borrow().as_ref().map(|menu| menu.tooltip.clone()));
    if let Some(tooltip) = tooltip
        && let Err(e) = add_icon(hwnd, &tooltip)
    {
        warn!("Failed to restore tray icon: {}", e);
    }
}

/// Shows the context menu at the cursor. The chosen item arrives as WM_COMMAND.
pub fn show_menu(hwnd: HWND) {
    let Some(menu) = MENU.with(|m| m.borrow().clone()) else {
        return;
    };

    unsafe {
        let Ok(hmenu) = CreatePopupMenu() else {
            return;
        };

        for entry in &menu.entries {
            match entry {
                MenuEntry::Item(item) => {
                    let label = HSTRING::from(item.label());
                    let _ = AppendMenuW(
                        hmenu,
                        MF_STRING,
                        item.id() as usize,
                        PCWSTR(label.as_ptr()),
                    );
                }
                MenuEntry::Separator => {
                    let _ = AppendMenuW(hmenu, MF_SEPARATOR, 0, None);
                }
            }
        }

        let mut pt = POINT::default();
        let _ = GetCursorPos(&mut pt);

        // Required to make the menu dismiss when clicking outside
        let _ = SetForegroundWindow(hwnd);

        let _ = TrackPopupMenu(
            hmenu,
            TPM_LEFTALIGN | TPM_BOTTOMALIGN | TPM_RIGHTBUTTON,
            pt.x,
            pt.y,
            None,
            hwnd,
            None,
        );
        let _ = PostMessageW(Some(hwnd), WM_NULL, Default::default(), Default::default());

        let _ = DestroyMenu(hmenu);
    }
}
