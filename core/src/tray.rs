//! System tray menu.
//!
//! The tray has no state of its own: every item and icon gesture maps straight to a
//! shell [`Command`].

use log::{info, warn};

use crate::error::TrayError;
use crate::shell::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrayItem {
    OpenPrimary,
    OpenMemo,
    Quit,
}

impl TrayItem {
    /// Stable menu identifier handed to the native menu.
    pub fn id(self) -> u32 {
        match self {
            TrayItem::OpenPrimary => 1001,
            TrayItem::OpenMemo => 1002,
            TrayItem::Quit => 1003,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        [TrayItem::OpenPrimary, TrayItem::OpenMemo, TrayItem::Quit]
            .into_iter()
            .find(|item| item.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            TrayItem::OpenPrimary => "Open Reader",
            TrayItem::OpenMemo => "Open Memo",
            TrayItem::Quit => "Quit",
        }
    }

    pub fn command(self) -> Command {
        match self {
            TrayItem::OpenPrimary => Command::OpenPrimary,
            TrayItem::OpenMemo => Command::OpenMemo,
            TrayItem::Quit => Command::Quit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Item(TrayItem),
    Separator,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrayMenu {
    pub tooltip: String,
    pub entries: Vec<MenuEntry>,
}

impl TrayMenu {
    pub fn new(tooltip: impl Into<String>, memo_enabled: bool) -> Self {
        let mut entries = vec![MenuEntry::Item(TrayItem::OpenPrimary)];
        if memo_enabled {
            entries.push(MenuEntry::Item(TrayItem::OpenMemo));
        }
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::Item(TrayItem::Quit));
        Self {
            tooltip: tooltip.into(),
            entries,
        }
    }

    pub fn contains(&self, item: TrayItem) -> bool {
        self.entries.contains(&MenuEntry::Item(item))
    }
}

/// User interaction with the tray icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayEvent {
    Menu(TrayItem),
    DoubleClick,
}

impl TrayEvent {
    pub fn command(self) -> Command {
        match self {
            TrayEvent::Menu(item) => item.command(),
            // Same as the boss key.
            TrayEvent::DoubleClick => Command::TogglePrimary,
        }
    }
}

/// Native notification-area icon.
pub trait TrayBackend {
    fn install(&mut self, menu: &TrayMenu) -> Result<(), TrayError>;

    fn remove(&mut self);
}

pub struct TrayController<T: TrayBackend> {
    backend: T,
    menu: TrayMenu,
    installed: bool,
}

impl<T: TrayBackend> TrayController<T> {
    pub fn new(backend: T, menu: TrayMenu) -> Self {
        Self {
            backend,
            menu,
            installed: false,
        }
    }

    pub fn install(&mut self) -> Result<(), TrayError> {
        if self.installed {
            warn!("Tray icon already installed");
            return Ok(());
        }
        self.backend.install(&self.menu)?;
        self.installed = true;
        info!("Tray icon installed");
        Ok(())
    }

    pub fn remove(&mut self) {
        if self.installed {
            self.backend.remove();
            self.installed = false;
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn menu(&self) -> &TrayMenu {
        &self.menu
    }

    /// Resolves an event to a command, dropping items the menu does not offer.
    pub fn command_for(&self, event: TrayEvent) -> Option<Command> {
        match event {
            TrayEvent::Menu(item) if !self.menu.contains(item) => None,
            _ => Some(event.command()),
        }
    }

    pub fn backend(&self) -> &T {
        &self.backend
    }
}
