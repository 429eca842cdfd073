//! Single instance enforcement using a named mutex.

use log::warn;
use windows::Win32::{
    Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError, HANDLE},
    System::Threading::{CreateMutexW, ReleaseMutex},
    UI::WindowsAndMessaging::{ASFW_ANY, AllowSetForegroundWindow, FindWindowW, PostMessageW},
};
use windows::core::PCWSTR;
use windows_strings::w;

use super::window::HOST_CLASS;
use super::wm;

#[cfg(debug_assertions)]
const MUTEX_NAME: PCWSTR = w!("Local\\SmartNoteDB_SingleInstance_Debug");

#[cfg(not(debug_assertions))]
const MUTEX_NAME: PCWSTR = w!("Local\\SmartNoteDB_SingleInstance");

/// Guard that releases the mutex when dropped.
pub struct SingleInstanceGuard(HANDLE);

impl Drop for SingleInstanceGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = ReleaseMutex(self.0);
            let _ = CloseHandle(self.0);
        }
    }
}

/// Claims the single-instance mutex.
///
/// Returns `None` if another instance holds it, after asking that instance to
/// bring itself forward.
pub fn acquire() -> Option<SingleInstanceGuard> {
    let handle = match unsafe { CreateMutexW(None, false, MUTEX_NAME) } {
        Ok(handle) => handle,
        Err(e) => {
            // Run unguarded.
            warn!("Single-instance check unavailable: {}", e.message());
            return Some(SingleInstanceGuard(HANDLE::default()));
        }
    };

    if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
        let _ = unsafe { CloseHandle(handle) };
        activate_existing_instance();
        return None;
    }

    Some(SingleInstanceGuard(handle))
}

fn activate_existing_instance() {
    let Ok(hwnd) = (unsafe { FindWindowW(HOST_CLASS, None) }) else {
        return;
    };
    if hwnd.is_invalid() {
        return;
    }

    unsafe {
        // Lets the running instance take the foreground on our behalf.
        let _ = AllowSetForegroundWindow(ASFW_ANY);
        let _ = PostMessageW(Some(hwnd), wm::ACTIVATE_INSTANCE, Default::default(), Default::default());
    }
}
