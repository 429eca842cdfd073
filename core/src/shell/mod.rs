//! Top-level shell state machine.
//!
//! Every OS-originated input reaches [`Shell::handle`] as a [`ShellEvent`], one at a time.
//! The shell owns the settings, the registrar, the window controller and the tray, and
//! is the only place that moves between them.

use log::{debug, error, info, warn};

use crate::bridge::{IncomingMessage, OutgoingMessage};
use crate::error::ShellError;
use crate::hotkey::{ApplyReport, HotkeyBackend, HotkeyId, ShortcutRegistrar};
use crate::settings::SettingsStore;
use crate::tray::{TrayBackend, TrayController, TrayEvent, TrayMenu};
use crate::types::{ShellOptions, ShortcutAction, ShortcutConfig, WindowSlot};
use crate::window::{WindowBackend, WindowController};

/// Something the user asked the shell to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePrimary,
    OpenPrimary,
    ToggleMemo,
    OpenMemo,
    StopSpeech,
    Quit,
}

impl Command {
    pub fn for_action(action: ShortcutAction) -> Self {
        match action {
            ShortcutAction::BossKey => Command::TogglePrimary,
            ShortcutAction::StopSpeech => Command::StopSpeech,
            ShortcutAction::Memo => Command::ToggleMemo,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    Hotkey(HotkeyId),
    Tray(TrayEvent),
    /// The user pressed a managed window's close button.
    CloseRequested(WindowSlot),
    /// A managed window's content finished its first load.
    ContentReady(WindowSlot),
    /// A managed window was torn down by the OS.
    WindowDestroyed(WindowSlot),
    Content {
        slot: WindowSlot,
        message: IncomingMessage,
    },
    /// A second launch or taskbar re-invocation.
    Reactivate,
}

/// Whether the event loop should keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<H: HotkeyBackend, W: WindowBackend, T: TrayBackend> {
    store: SettingsStore,
    options: ShellOptions,
    config: ShortcutConfig,
    registrar: ShortcutRegistrar<H>,
    windows: WindowController<W>,
    tray: TrayController<T>,
    started: bool,
    quitting: bool,
}

impl<H: HotkeyBackend, W: WindowBackend, T: TrayBackend> Shell<H, W, T> {
    pub fn new(store: SettingsStore, options: ShellOptions, hotkeys: H, windows: W, tray: T) -> Self {
        let mut actions = vec![ShortcutAction::BossKey, ShortcutAction::StopSpeech];
        if options.memo_enabled {
            actions.push(ShortcutAction::Memo);
        }
        let menu = TrayMenu::new(options.tray_tooltip.clone(), options.memo_enabled);
        Self {
            store,
            config: ShortcutConfig::default(),
            registrar: ShortcutRegistrar::new(hotkeys, actions),
            windows: WindowController::new(windows, &options),
            tray: TrayController::new(tray, menu),
            options,
            started: false,
            quitting: false,
        }
    }

    /// Brings the shell up: settings, primary window, tray, then hotkeys.
    ///
    /// Runs at most once per process. A missing tray icon is logged and tolerated;
    /// a missing primary window is not.
    pub fn startup(&mut self) -> Result<ApplyReport, ShellError> {
        if self.started {
            return Err(ShellError::AlreadyStarted);
        }
        self.started = true;

        self.config = self.store.load();
        self.windows
            .open(WindowSlot::Primary)
            .map_err(ShellError::PrimaryWindow)?;
        if let Err(e) = self.tray.install() {
            error!("Running without a tray icon: {}", e);
        }
        let report = self.registrar.apply_all(&self.config);
        info!(
            "Shell started with {} of {} shortcuts bound",
            report.bound.len(),
            report.bound.len() + report.failed.len()
        );
        Ok(report)
    }

    pub fn handle(&mut self, event: ShellEvent) -> Flow {
        debug!("Handling {:?}", event);
        match event {
            ShellEvent::CloseRequested(slot) => {
                self.windows.close_requested(slot, self.quitting);
            }
            ShellEvent::ContentReady(slot) => self.windows.content_ready(slot),
            ShellEvent::WindowDestroyed(slot) => self.windows.native_destroyed(slot),
            _ if self.quitting => debug!("Ignoring event while quitting"),
            ShellEvent::Hotkey(id) => match self.registrar.action_for(id) {
                Some(action) => return self.dispatch(Command::for_action(action)),
                None => warn!("Hotkey {:?} fired with no live binding", id),
            },
            ShellEvent::Tray(tray_event) => {
                if let Some(command) = self.tray.command_for(tray_event) {
                    return self.dispatch(command);
                }
            }
            ShellEvent::Content { slot, message } => self.on_content(slot, message),
            ShellEvent::Reactivate => self.reactivate(),
        }
        if self.quitting { Flow::Exit } else { Flow::Continue }
    }

    pub fn dispatch(&mut self, command: Command) -> Flow {
        if self.quitting {
            return Flow::Exit;
        }
        let result = match command {
            Command::TogglePrimary => self.windows.toggle(WindowSlot::Primary),
            Command::OpenPrimary => self.windows.open(WindowSlot::Primary),
            Command::ToggleMemo if self.options.memo_enabled => {
                self.windows.toggle(WindowSlot::Memo)
            }
            Command::OpenMemo if self.options.memo_enabled => self.windows.open(WindowSlot::Memo),
            Command::ToggleMemo | Command::OpenMemo => {
                debug!("Memo window is disabled");
                Ok(())
            }
            Command::StopSpeech => {
                if !self
                    .windows
                    .post(WindowSlot::Primary, &OutgoingMessage::StopTts)
                {
                    debug!("No primary window to stop speech in");
                }
                Ok(())
            }
            Command::Quit => return self.quit(),
        };
        if let Err(e) = result {
            error!("{:?} failed: {}", command, e);
        }
        Flow::Continue
    }

    /// Full current config, defaults included.
    pub fn get_shortcuts(&self) -> &ShortcutConfig {
        &self.config
    }

    /// Merges `partial` into the config, persists it and rebinds every hotkey.
    ///
    /// The merged config and its bindings stay in effect even when saving fails. On
    /// failure the live set is still available from [`ShortcutRegistrar::live_bindings`].
    ///
    /// Rejected with [`ShellError::NotRunning`] before startup and after quit, leaving
    /// the settings file and the OS bindings untouched.
    pub fn update_shortcuts(&mut self, partial: ShortcutConfig) -> Result<ApplyReport, ShellError> {
        if !self.started || self.quitting {
            warn!("Ignoring shortcut update while the shell is not running");
            return Err(ShellError::NotRunning);
        }
        self.config.merge(partial);
        let saved = self.store.save(&self.config);
        let report = self.registrar.apply_all(&self.config);
        saved?;
        Ok(report)
    }

    /// Shuts everything down. Only the quit command ends the process.
    pub fn quit(&mut self) -> Flow {
        if self.quitting {
            return Flow::Exit;
        }
        info!("Quitting");
        self.quitting = true;
        self.registrar.unregister_all();
        self.windows.destroy_all();
        self.tray.remove();
        Flow::Exit
    }

    /// Surfaces the shell after a second launch without re-running startup.
    pub fn reactivate(&mut self) {
        if !self.started || self.quitting {
            return;
        }
        let any_visible = WindowSlot::ALL
            .into_iter()
            .any(|slot| self.windows.is_visible(slot));
        if any_visible {
            return;
        }
        info!("Reactivated with no visible window");
        if let Err(e) = self.windows.open(WindowSlot::Primary) {
            error!("Failed to reopen primary window: {}", e);
        }
    }

    fn on_content(&mut self, slot: WindowSlot, message: IncomingMessage) {
        match message {
            IncomingMessage::GetShortcuts { request_id } => {
                let reply = OutgoingMessage::Shortcuts {
                    request_id,
                    shortcuts: self.config.clone(),
                };
                self.windows.post(slot, &reply);
            }
            IncomingMessage::UpdateShortcuts { shortcuts } => {
                if let Err(e) = self.update_shortcuts(shortcuts) {
                    let reply = OutgoingMessage::ShortcutsSaveFailed {
                        message: e.to_string(),
                    };
                    self.windows.post(slot, &reply);
                }
            }
        }
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn registrar(&self) -> &ShortcutRegistrar<H> {
        &self.registrar
    }

    pub fn windows(&self) -> &WindowController<W> {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowController<W> {
        &mut self.windows
    }

    pub fn tray(&self) -> &TrayController<T> {
        &self.tray
    }
}
