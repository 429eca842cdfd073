//! Global hotkey registration using Win32 RegisterHotKey.
//!
//! Keys are resolved through their DOM `KeyboardEvent.code` spelling: the `keycode`
//! crate maps e.code to a Windows scan code, then `MapVirtualKeyW` maps that to a
//! virtual key code for the current keyboard layout.

use keycode::{KeyMap, KeyMappingCode};
use log::debug;
use notedb_core::{Accelerator, HotkeyBackend, HotkeyError, HotkeyId, Key, Modifiers};
use windows::Win32::Foundation::{ERROR_HOTKEY_ALREADY_REGISTERED, HWND};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MAPVK_VSC_TO_VK, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN,
    MapVirtualKeyW, RegisterHotKey, UnregisterHotKey,
};
use windows::core::HRESULT;

/// Hotkeys bound to the host window; WM_HOTKEY arrives there with the [`HotkeyId`].
pub struct Win32Hotkeys {
    hwnd: HWND,
}

impl Win32Hotkeys {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

impl HotkeyBackend for Win32Hotkeys {
    fn register(&mut self, id: HotkeyId, accelerator: &Accelerator) -> Result<(), HotkeyError> {
        let vk = virtual_key(accelerator.key).ok_or_else(|| HotkeyError::Unsupported {
            accelerator: accelerator.to_string(),
        })?;
        // MOD_NOREPEAT prevents repeated WM_HOTKEY while the combination is held
        let modifiers = hotkey_modifiers(accelerator.modifiers) | MOD_NOREPEAT;

        unsafe { RegisterHotKey(Some(self.hwnd), id.0, modifiers, vk) }.map_err(|e| {
            if e.code() == HRESULT::from_win32(ERROR_HOTKEY_ALREADY_REGISTERED.0) {
                HotkeyError::AlreadyInUse(accelerator.to_string())
            } else {
                HotkeyError::Os(e.message())
            }
        })?;
        debug!("RegisterHotKey id={} vk={:#04x}", id.0, vk);
        Ok(())
    }

    fn unregister(&mut self, id: HotkeyId) -> Result<(), HotkeyError> {
        unsafe { UnregisterHotKey(Some(self.hwnd), id.0) }.map_err(|e| HotkeyError::Os(e.message()))
    }
}

fn hotkey_modifiers(modifiers: Modifiers) -> HOT_KEY_MODIFIERS {
    let mut flags = HOT_KEY_MODIFIERS(0);
    if modifiers.ctrl {
        flags |= MOD_CONTROL;
    }
    if modifiers.alt {
        flags |= MOD_ALT;
    }
    if modifiers.shift {
        flags |= MOD_SHIFT;
    }
    if modifiers.meta {
        flags |= MOD_WIN;
    }
    flags
}

/// Converts a key to a Windows virtual key code.
fn virtual_key(key: Key) -> Option<u32> {
    let key_code: KeyMappingCode = key.dom_code().parse().ok()?;
    let scan_code = KeyMap::from(key_code).win as u32;
    if scan_code == 0 {
        return None;
    }

    let vk = unsafe { MapVirtualKeyW(scan_code, MAPVK_VSC_TO_VK) };
    if vk == 0 {
        return None;
    }
    Some(vk)
}
