//! Global hotkey registration.
//!
//! [`ShortcutRegistrar`] is the only code that touches live OS bindings. Every
//! reconfiguration releases everything it holds before binding the new set, so the
//! live bindings are always a projection of the last config handed to
//! [`ShortcutRegistrar::apply_all`].

use std::collections::BTreeMap;

use log::{info, warn};
use serde_json::Value;

use crate::error::{AcceleratorError, HotkeyError};
use crate::types::{Accelerator, ShortcutAction, ShortcutConfig};

/// Identifier the OS hands back when a registered hotkey fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HotkeyId(pub i32);

impl HotkeyId {
    pub fn for_action(action: ShortcutAction) -> Self {
        match action {
            ShortcutAction::BossKey => HotkeyId(1),
            ShortcutAction::StopSpeech => HotkeyId(2),
            ShortcutAction::Memo => HotkeyId(3),
        }
    }
}

/// OS-global hotkey facility.
pub trait HotkeyBackend {
    fn register(&mut self, id: HotkeyId, accelerator: &Accelerator) -> Result<(), HotkeyError>;

    fn unregister(&mut self, id: HotkeyId) -> Result<(), HotkeyError>;
}

/// A binding currently held with the OS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveBinding {
    pub id: HotkeyId,
    pub accelerator: Accelerator,
}

/// Outcome of one [`ShortcutRegistrar::apply_all`] call.
///
/// A report with failures is still a valid terminal state: the failed actions are
/// simply left unbound.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub bound: Vec<(ShortcutAction, Accelerator)>,
    pub failed: Vec<(ShortcutAction, HotkeyError)>,
}

impl ApplyReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failure(&self, action: ShortcutAction) -> Option<&HotkeyError> {
        self.failed
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, e)| e)
    }
}

pub struct ShortcutRegistrar<B: HotkeyBackend> {
    backend: B,
    actions: Vec<ShortcutAction>,
    live: BTreeMap<ShortcutAction, LiveBinding>,
}

impl<B: HotkeyBackend> ShortcutRegistrar<B> {
    /// Creates a registrar that binds only the given actions.
    pub fn new(backend: B, actions: impl IntoIterator<Item = ShortcutAction>) -> Self {
        let mut actions: Vec<_> = actions.into_iter().collect();
        actions.sort();
        actions.dedup();
        Self {
            backend,
            actions,
            live: BTreeMap::new(),
        }
    }

    /// Replaces every live binding with the bindings described by `config`.
    pub fn apply_all(&mut self, config: &ShortcutConfig) -> ApplyReport {
        self.unregister_all();

        let mut report = ApplyReport::default();
        for action in self.actions.clone() {
            let Some(value) = config.value(action.config_key()) else {
                continue;
            };
            match self.bind(action, value) {
                Ok(accelerator) => {
                    info!("Bound {} to {}", action, accelerator);
                    report.bound.push((action, accelerator));
                }
                Err(e) => {
                    warn!("Leaving {} unbound: {}", action, e);
                    report.failed.push((action, e));
                }
            }
        }
        report
    }

    fn bind(&mut self, action: ShortcutAction, value: &Value) -> Result<Accelerator, HotkeyError> {
        let accelerator = value
            .as_str()
            .ok_or(AcceleratorError::NotText)
            .and_then(|raw| raw.parse::<Accelerator>())
            .map_err(|source| HotkeyError::InvalidAccelerator {
                accelerator: value.as_str().map_or_else(|| value.to_string(), str::to_string),
                source,
            })?;
        let id = HotkeyId::for_action(action);
        self.backend.register(id, &accelerator)?;
        self.live.insert(action, LiveBinding { id, accelerator });
        Ok(accelerator)
    }

    /// Releases every binding this registrar holds.
    pub fn unregister_all(&mut self) {
        for (action, binding) in std::mem::take(&mut self.live) {
            if let Err(e) = self.backend.unregister(binding.id) {
                warn!("Failed to unbind {} ({}): {}", action, binding.accelerator, e);
            }
        }
    }

    /// Maps a fired hotkey back to its action.
    pub fn action_for(&self, id: HotkeyId) -> Option<ShortcutAction> {
        self.live
            .iter()
            .find(|(_, binding)| binding.id == id)
            .map(|(action, _)| *action)
    }

    pub fn live_bindings(&self) -> &BTreeMap<ShortcutAction, LiveBinding> {
        &self.live
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
