//! WebView2 hosting for managed windows.

pub mod bridge;
mod init;

pub use init::init_webview;

use webview2_com::Microsoft::Web::WebView2::Win32::{
    COREWEBVIEW2_MOVE_FOCUS_REASON_PROGRAMMATIC, ICoreWebView2, ICoreWebView2Controller,
};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

/// A WebView2 controller and its web view, filling one managed window.
pub struct WebView {
    pub controller: ICoreWebView2Controller,
    pub webview: ICoreWebView2,
}

impl WebView {
    /// Resizes the web view to cover the parent's client area.
    pub fn fit_to(&self, hwnd: HWND) {
        unsafe {
            let mut rect = RECT::default();
            if GetClientRect(hwnd, &mut rect).is_ok() {
                let _ = self.controller.SetBounds(rect);
            }
        }
    }

    pub fn focus(&self) {
        unsafe {
            let _ = self
                .controller
                .MoveFocus(COREWEBVIEW2_MOVE_FOCUS_REASON_PROGRAMMATIC);
        }
    }

    pub fn close(&self) {
        unsafe {
            let _ = self.controller.Close();
        }
    }
}
