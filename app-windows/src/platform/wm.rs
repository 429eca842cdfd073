//! Custom window messages (WM_APP + N) handled by the host window.

use log::error;
use notedb_core::ShellEvent;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{PostMessageW, WM_APP};

/// A deferred shell event. LPARAM contains a `Box<ShellEvent>` pointer.
pub const SHELL_EVENT: u32 = WM_APP + 1;

/// Sent by a second launch to the running instance.
pub const ACTIVATE_INSTANCE: u32 = WM_APP + 2;

/// Tray icon callback message.
pub const TRAY_ICON: u32 = WM_APP + 3;

/// Queues `event` on the host window's message queue.
pub fn post_event(host: HWND, event: ShellEvent) {
    let ptr = Box::into_raw(Box::new(event));
    let posted = unsafe { PostMessageW(Some(host), SHELL_EVENT, WPARAM(0), LPARAM(ptr as isize)) };
    if let Err(e) = posted {
        // Never delivered, so ownership is still ours.
        let event = unsafe { Box::from_raw(ptr) };
        error!("Dropping {:?}: {}", event, e);
    }
}

/// Reclaims an event posted with [`post_event`].
///
/// # Safety
///
/// `lparam` must come from a `SHELL_EVENT` message and be taken exactly once.
pub unsafe fn take_event(lparam: LPARAM) -> Option<ShellEvent> {
    let ptr = lparam.0 as *mut ShellEvent;
    if ptr.is_null() {
        None
    } else {
        Some(*unsafe { Box::from_raw(ptr) })
    }
}
