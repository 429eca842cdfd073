//! Managed window lifecycle.
//!
//! Each [`WindowSlot`] moves through `Absent -> Visible <-> Hidden`, and only the quit
//! sequence (or the OS tearing a window down) moves it to `Destroyed`. A destroyed slot
//! is never revived; the next demand constructs a fresh native window.

use std::fmt;

use log::{debug, info, warn};

use crate::bridge::OutgoingMessage;
use crate::error::WindowError;
use crate::types::{ShellOptions, WindowSlot, WindowSpec};

/// Native windowing facility hosting web content.
pub trait WindowBackend {
    type Handle: Copy + Eq + fmt::Debug;

    /// Creates an unshown native window and starts loading `spec.url`.
    fn create(&mut self, slot: WindowSlot, spec: &WindowSpec) -> Result<Self::Handle, WindowError>;

    fn show(&mut self, handle: Self::Handle);

    fn hide(&mut self, handle: Self::Handle);

    fn focus(&mut self, handle: Self::Handle);

    fn destroy(&mut self, handle: Self::Handle);

    fn post(&mut self, handle: Self::Handle, message: &OutgoingMessage);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowState {
    Absent,
    Visible,
    Hidden,
    Destroyed,
}

/// What a close-button press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    Hidden,
    Destroyed,
    /// No live window in the slot.
    Ignored,
}

struct ManagedWindow<H> {
    spec: WindowSpec,
    handle: Option<H>,
    state: WindowState,
    /// Constructed but waiting for content before the native window is shown.
    awaiting_content: bool,
}

impl<H> ManagedWindow<H> {
    fn new(spec: WindowSpec) -> Self {
        Self {
            spec,
            handle: None,
            state: WindowState::Absent,
            awaiting_content: false,
        }
    }
}

pub struct WindowController<W: WindowBackend> {
    backend: W,
    primary: ManagedWindow<W::Handle>,
    memo: ManagedWindow<W::Handle>,
}

impl<W: WindowBackend> WindowController<W> {
    pub fn new(backend: W, options: &ShellOptions) -> Self {
        Self {
            backend,
            primary: ManagedWindow::new(options.primary.clone()),
            memo: ManagedWindow::new(options.memo.clone()),
        }
    }

    fn window(&self, slot: WindowSlot) -> &ManagedWindow<W::Handle> {
        match slot {
            WindowSlot::Primary => &self.primary,
            WindowSlot::Memo => &self.memo,
        }
    }

    fn parts(&mut self, slot: WindowSlot) -> (&mut W, &mut ManagedWindow<W::Handle>) {
        let window = match slot {
            WindowSlot::Primary => &mut self.primary,
            WindowSlot::Memo => &mut self.memo,
        };
        (&mut self.backend, window)
    }

    pub fn state(&self, slot: WindowSlot) -> WindowState {
        self.window(slot).state
    }

    pub fn handle(&self, slot: WindowSlot) -> Option<W::Handle> {
        self.window(slot).handle
    }

    pub fn is_visible(&self, slot: WindowSlot) -> bool {
        self.state(slot) == WindowState::Visible
    }

    /// Number of slots backed by a live native window.
    pub fn live_count(&self) -> usize {
        WindowSlot::ALL
            .into_iter()
            .filter(|&slot| self.window(slot).handle.is_some())
            .count()
    }

    /// Brings the slot to the foreground, constructing it if needed.
    pub fn open(&mut self, slot: WindowSlot) -> Result<(), WindowError> {
        match self.state(slot) {
            WindowState::Absent | WindowState::Destroyed => self.construct(slot),
            WindowState::Hidden => {
                self.reveal(slot);
                Ok(())
            }
            WindowState::Visible => {
                let (backend, window) = self.parts(slot);
                if let Some(handle) = window.handle
                    && !window.awaiting_content
                {
                    backend.focus(handle);
                }
                Ok(())
            }
        }
    }

    /// Flips visibility, constructing the window on first demand.
    pub fn toggle(&mut self, slot: WindowSlot) -> Result<(), WindowError> {
        match self.state(slot) {
            WindowState::Absent | WindowState::Destroyed => self.construct(slot),
            WindowState::Hidden => {
                self.reveal(slot);
                Ok(())
            }
            WindowState::Visible => {
                self.hide(slot);
                Ok(())
            }
        }
    }

    pub fn hide(&mut self, slot: WindowSlot) {
        let (backend, window) = self.parts(slot);
        if window.state != WindowState::Visible {
            return;
        }
        if let Some(handle) = window.handle {
            backend.hide(handle);
        }
        window.state = WindowState::Hidden;
        debug!("{slot} window hidden");
    }

    /// Handles the window's own close button.
    ///
    /// Unless the process is quitting, closing only hides the window.
    pub fn close_requested(&mut self, slot: WindowSlot, quitting: bool) -> CloseOutcome {
        match self.state(slot) {
            WindowState::Absent | WindowState::Destroyed => CloseOutcome::Ignored,
            WindowState::Visible | WindowState::Hidden if quitting => {
                self.destroy(slot);
                CloseOutcome::Destroyed
            }
            WindowState::Visible | WindowState::Hidden => {
                self.hide(slot);
                CloseOutcome::Hidden
            }
        }
    }

    /// Content in the slot finished loading; shows a window that was waiting for it.
    pub fn content_ready(&mut self, slot: WindowSlot) {
        let (backend, window) = self.parts(slot);
        if !window.awaiting_content {
            return;
        }
        window.awaiting_content = false;
        if window.state == WindowState::Visible
            && let Some(handle) = window.handle
        {
            backend.show(handle);
            backend.focus(handle);
            debug!("{slot} window shown after content load");
        }
    }

    /// The OS destroyed the native window without us asking.
    pub fn native_destroyed(&mut self, slot: WindowSlot) {
        let window = self.parts(slot).1;
        if window.handle.take().is_some() {
            warn!("{slot} window was destroyed outside the quit sequence");
        }
        window.state = WindowState::Destroyed;
        window.awaiting_content = false;
    }

    /// Forces every slot to `Destroyed`, bypassing the hide-on-close redirect.
    pub fn destroy_all(&mut self) {
        for slot in WindowSlot::ALL {
            self.destroy(slot);
        }
    }

    /// Sends a message to the slot's content if the window exists, visible or not.
    pub fn post(&mut self, slot: WindowSlot, message: &OutgoingMessage) -> bool {
        let (backend, window) = self.parts(slot);
        match window.handle {
            Some(handle) => {
                backend.post(handle, message);
                true
            }
            None => false,
        }
    }

    pub fn backend(&self) -> &W {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut W {
        &mut self.backend
    }

    fn construct(&mut self, slot: WindowSlot) -> Result<(), WindowError> {
        let (backend, window) = self.parts(slot);
        let handle = backend.create(slot, &window.spec)?;
        window.handle = Some(handle);
        window.state = WindowState::Visible;
        if window.spec.show_when_ready {
            window.awaiting_content = true;
        } else {
            backend.show(handle);
            backend.focus(handle);
        }
        info!("{slot} window constructed for {}", window.spec.url);
        Ok(())
    }

    fn reveal(&mut self, slot: WindowSlot) {
        let (backend, window) = self.parts(slot);
        let Some(handle) = window.handle else {
            return;
        };
        window.state = WindowState::Visible;
        if !window.awaiting_content {
            backend.show(handle);
            backend.focus(handle);
        }
        debug!("{slot} window revealed");
    }

    fn destroy(&mut self, slot: WindowSlot) {
        let (backend, window) = self.parts(slot);
        if let Some(handle) = window.handle.take() {
            backend.destroy(handle);
            info!("{slot} window destroyed");
        }
        window.state = WindowState::Destroyed;
        window.awaiting_content = false;
    }
}
