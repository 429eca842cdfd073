#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use notedb_core::{
    Accelerator, HotkeyBackend, HotkeyError, HotkeyId, OutgoingMessage, SettingsStore, Shell,
    ShellOptions, TrayBackend, TrayError, TrayMenu, WindowBackend, WindowError, WindowSlot,
    WindowSpec,
};

pub type TestShell = Shell<FakeHotkeys, FakeWindows, FakeTray>;

/// Hotkeys held in memory. Accelerators in `taken` behave as if another
/// application owns them.
#[derive(Default)]
pub struct FakeHotkeys {
    pub taken: BTreeSet<String>,
    pub live: BTreeMap<HotkeyId, Accelerator>,
}

impl FakeHotkeys {
    pub fn taking(accelerators: &[&str]) -> Self {
        Self {
            taken: accelerators.iter().map(|a| a.to_string()).collect(),
            live: BTreeMap::new(),
        }
    }

    pub fn is_bound(&self, accelerator: &str) -> bool {
        self.live.values().any(|a| a.to_string() == accelerator)
    }
}

impl HotkeyBackend for FakeHotkeys {
    fn register(&mut self, id: HotkeyId, accelerator: &Accelerator) -> Result<(), HotkeyError> {
        let display = accelerator.to_string();
        if self.taken.contains(&display) || self.live.values().any(|a| a == accelerator) {
            return Err(HotkeyError::AlreadyInUse(display));
        }
        if self.live.contains_key(&id) {
            return Err(HotkeyError::Os(format!("id {} already registered", id.0)));
        }
        self.live.insert(id, *accelerator);
        Ok(())
    }

    fn unregister(&mut self, id: HotkeyId) -> Result<(), HotkeyError> {
        self.live
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| HotkeyError::Os(format!("id {} not registered", id.0)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeWindow {
    pub slot: WindowSlot,
    pub url: String,
    pub shown: bool,
    pub focus_count: usize,
    pub destroyed: bool,
}

/// Windows that record what was done to them. Handles index into `windows`.
#[derive(Default)]
pub struct FakeWindows {
    pub windows: Vec<FakeWindow>,
    pub posted: Vec<(WindowSlot, OutgoingMessage)>,
    pub fail_create: Option<WindowSlot>,
}

impl FakeWindows {
    /// The most recent native window constructed for `slot`, if it is still alive.
    pub fn live(&self, slot: WindowSlot) -> Option<&FakeWindow> {
        self.windows
            .iter()
            .rev()
            .find(|w| w.slot == slot)
            .filter(|w| !w.destroyed)
    }

    pub fn created(&self, slot: WindowSlot) -> usize {
        self.windows.iter().filter(|w| w.slot == slot).count()
    }

    pub fn shown(&self, slot: WindowSlot) -> bool {
        self.live(slot).is_some_and(|w| w.shown)
    }

    pub fn posted_to(&self, slot: WindowSlot) -> Vec<&OutgoingMessage> {
        self.posted
            .iter()
            .filter(|(s, _)| *s == slot)
            .map(|(_, m)| m)
            .collect()
    }
}

impl WindowBackend for FakeWindows {
    type Handle = usize;

    fn create(&mut self, slot: WindowSlot, spec: &WindowSpec) -> Result<usize, WindowError> {
        if self.fail_create == Some(slot) {
            return Err(WindowError::Create {
                slot,
                reason: "refused by test".to_string(),
            });
        }
        self.windows.push(FakeWindow {
            slot,
            url: spec.url.clone(),
            shown: false,
            focus_count: 0,
            destroyed: false,
        });
        Ok(self.windows.len() - 1)
    }

    fn show(&mut self, handle: usize) {
        self.windows[handle].shown = true;
    }

    fn hide(&mut self, handle: usize) {
        self.windows[handle].shown = false;
    }

    fn focus(&mut self, handle: usize) {
        self.windows[handle].focus_count += 1;
    }

    fn destroy(&mut self, handle: usize) {
        let window = &mut self.windows[handle];
        window.shown = false;
        window.destroyed = true;
    }

    fn post(&mut self, handle: usize, message: &OutgoingMessage) {
        let slot = self.windows[handle].slot;
        self.posted.push((slot, message.clone()));
    }
}

#[derive(Default)]
pub struct FakeTray {
    pub installs: usize,
    pub removes: usize,
    pub menu: Option<TrayMenu>,
    pub fail: bool,
}

impl TrayBackend for FakeTray {
    fn install(&mut self, menu: &TrayMenu) -> Result<(), TrayError> {
        if self.fail {
            return Err(TrayError::Install("no notification area".to_string()));
        }
        self.installs += 1;
        self.menu = Some(menu.clone());
        Ok(())
    }

    fn remove(&mut self) {
        self.removes += 1;
    }
}

pub fn shell(data_dir: &Path) -> TestShell {
    shell_with(data_dir, ShellOptions::default(), FakeHotkeys::default())
}

pub fn shell_with(data_dir: &Path, options: ShellOptions, hotkeys: FakeHotkeys) -> TestShell {
    Shell::new(
        SettingsStore::new(data_dir),
        options,
        hotkeys,
        FakeWindows::default(),
        FakeTray::default(),
    )
}

pub fn started(data_dir: &Path) -> TestShell {
    let mut shell = shell(data_dir);
    shell.startup().unwrap();
    shell
}
