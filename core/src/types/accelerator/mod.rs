//! Accelerator strings: platform-neutral key combinations such as `Alt+Q`.
//!
//! Format: `[Modifier+]...<Key>`, case-insensitive, with exactly one non-modifier key.
//! Keys accept both the short names (`A`, `1`, `F5`, `Up`) and DOM `KeyboardEvent.code`
//! spellings (`KeyA`, `Digit1`, `ArrowUp`) so values recorded by the web settings page
//! parse the same way as hand-written ones.

use std::fmt;
use std::str::FromStr;

use crate::error::AcceleratorError;

/// Modifier keys that must be held for an accelerator to fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Win on Windows, Command on macOS.
    pub meta: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.meta)
    }
}

/// The non-modifier key of an accelerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `A`..=`Z`, stored uppercase.
    Letter(char),
    /// `0`..=`9`.
    Digit(u8),
    /// `F1`..=`F24`.
    Function(u8),
    Space,
    Tab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    fn parse(token: &str) -> Option<Self> {
        let lower = token.to_ascii_lowercase();

        if let Some(key) = Self::parse_single_char(&lower) {
            return Some(key);
        }
        // DOM codes: KeyA, Digit1
        if let Some(rest) = lower.strip_prefix("key")
            && rest.len() == 1
            && let Some(key @ Key::Letter(_)) = Self::parse_single_char(rest)
        {
            return Some(key);
        }
        if let Some(rest) = lower.strip_prefix("digit")
            && rest.len() == 1
            && let Some(key @ Key::Digit(_)) = Self::parse_single_char(rest)
        {
            return Some(key);
        }
        if let Some(rest) = lower.strip_prefix('f')
            && let Ok(n) = rest.parse::<u8>()
            && (1..=24).contains(&n)
        {
            return Some(Key::Function(n));
        }

        let key = match lower.as_str() {
            "space" => Key::Space,
            "tab" => Key::Tab,
            "enter" | "return" => Key::Enter,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "insert" | "ins" => Key::Insert,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            _ => return None,
        };
        Some(key)
    }

    fn parse_single_char(lower: &str) -> Option<Self> {
        let mut chars = lower.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match c {
            'a'..='z' => Some(Key::Letter(c.to_ascii_uppercase())),
            '0'..='9' => Some(Key::Digit(c as u8 - b'0')),
            _ => None,
        }
    }

    /// Returns the DOM `KeyboardEvent.code` value for this key.
    pub fn dom_code(self) -> String {
        match self {
            Key::Letter(c) => format!("Key{c}"),
            Key::Digit(d) => format!("Digit{d}"),
            Key::Function(n) => format!("F{n}"),
            Key::Up => "ArrowUp".to_string(),
            Key::Down => "ArrowDown".to_string(),
            Key::Left => "ArrowLeft".to_string(),
            Key::Right => "ArrowRight".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Letter(c) => write!(f, "{c}"),
            Key::Digit(d) => write!(f, "{d}"),
            Key::Function(n) => write!(f, "F{n}"),
            Key::Space => f.write_str("Space"),
            Key::Tab => f.write_str("Tab"),
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Escape"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Insert => f.write_str("Insert"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
        }
    }
}

/// A parsed key combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Accelerator {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl FromStr for Accelerator {
    type Err = AcceleratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AcceleratorError::Empty);
        }

        let mut modifiers = Modifiers::default();
        let mut key: Option<Key> = None;

        for part in s.split('+') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmdorctrl" | "commandorcontrol" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "super" | "meta" | "win" | "cmd" | "command" => modifiers.meta = true,
                _ => {
                    let parsed = Key::parse(part)
                        .ok_or_else(|| AcceleratorError::UnknownKey(part.to_string()))?;
                    if key.is_some() {
                        return Err(AcceleratorError::MultipleKeys(s.to_string()));
                    }
                    key = Some(parsed);
                }
            }
        }

        let key = key.ok_or(AcceleratorError::NoKey)?;
        Ok(Self { modifiers, key })
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        if self.modifiers.meta {
            f.write_str("Super+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests;
