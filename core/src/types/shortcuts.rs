use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Actions that can be bound to a global hotkey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShortcutAction {
    /// Toggles the primary window.
    BossKey,
    /// Tells the primary window's content to stop any active speech.
    StopSpeech,
    /// Toggles the memo window.
    Memo,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 3] = [
        ShortcutAction::BossKey,
        ShortcutAction::StopSpeech,
        ShortcutAction::Memo,
    ];

    /// Name of the action in the settings file.
    pub fn config_key(self) -> &'static str {
        match self {
            ShortcutAction::BossKey => "bossKey",
            ShortcutAction::StopSpeech => "stopTtsKey",
            ShortcutAction::Memo => "memoKey",
        }
    }

    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.config_key() == key)
    }

    pub fn default_accelerator(self) -> &'static str {
        match self {
            ShortcutAction::BossKey => "Alt+Q",
            ShortcutAction::StopSpeech => "Alt+S",
            ShortcutAction::Memo => "Ctrl+Alt+N",
        }
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// Action name to accelerator mapping, persisted as settings.json.
///
/// Unknown keys are kept as-is, whatever their JSON type, so that settings
/// written by a newer shell survive a round trip through an older one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortcutConfig(BTreeMap<String, Value>);

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self(
            ShortcutAction::ALL
                .into_iter()
                .map(|a| (a.config_key().to_string(), a.default_accelerator().into()))
                .collect(),
        )
    }
}

impl ShortcutConfig {
    /// Returns a config with no entries, not even the defaults.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Accelerator text stored under `name`. `None` if absent or not a string.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn accelerator(&self, action: ShortcutAction) -> Option<&str> {
        self.get(action.config_key())
    }

    pub fn set(&mut self, name: impl Into<String>, accelerator: impl Into<String>) {
        self.0.insert(name.into(), Value::String(accelerator.into()));
    }

    /// Overlays `other` onto `self`; entries in `other` win.
    pub fn merge(&mut self, other: ShortcutConfig) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ShortcutConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }
}
