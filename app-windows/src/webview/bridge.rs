//! WebView message bridge.

use std::ffi::c_void;

use log::{debug, error, warn};
use notedb_core::{IncomingMessage, OutgoingMessage, ShellEvent, WindowSlot};
use webview2_com::Microsoft::Web::WebView2::Win32::ICoreWebView2;
use windows::Win32::System::Com::CoTaskMemFree;
use windows::core::{HSTRING, PWSTR};

use crate::app;

/// Turns a JSON message from `slot`'s content into a shell event.
pub fn handle_webview_message(json: &str, slot: WindowSlot) {
    match IncomingMessage::parse(json) {
        Ok(message) => {
            debug!("{} content sent {:?}", slot, message);
            app::dispatch(ShellEvent::Content { slot, message });
        }
        Err(e) => warn!("Ignoring unrecognised message from {} content: {}", slot, e),
    }
}

pub fn post_message(wv: &ICoreWebView2, msg: &OutgoingMessage) {
    let json = match msg.to_json() {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize {:?}: {}", msg, e);
            return;
        }
    };
    let json = HSTRING::from(json);
    if let Err(e) = unsafe { wv.PostWebMessageAsJson(&json) } {
        warn!("PostWebMessageAsJson failed: {}", e.message());
    }
}

/// Copies a WebView2-allocated string and frees it.
pub fn take_pwstr(pwstr: PWSTR) -> String {
    if pwstr.is_null() {
        return String::new();
    }
    unsafe {
        let s = pwstr.to_string().unwrap_or_default();
        CoTaskMemFree(Some(pwstr.as_ptr() as *const c_void));
        s
    }
}
