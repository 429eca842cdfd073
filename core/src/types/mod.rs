pub(crate) mod accelerator;
pub use accelerator::{Accelerator, Key, Modifiers};

pub(crate) mod options;
pub use options::{ShellOptions, WindowSpec};

pub(crate) mod shortcuts;
pub use shortcuts::{ShortcutAction, ShortcutConfig};

use std::fmt;

/// Logical window identity. The backing native window may come and go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WindowSlot {
    /// The reader window, created at startup.
    Primary,
    /// The memo window, created on first demand.
    Memo,
}

impl WindowSlot {
    pub const ALL: [WindowSlot; 2] = [WindowSlot::Primary, WindowSlot::Memo];

    pub fn as_str(self) -> &'static str {
        match self {
            WindowSlot::Primary => "primary",
            WindowSlot::Memo => "memo",
        }
    }
}

impl fmt::Display for WindowSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
