//! Global shortcut parsing.
//!
//! Shortcut format: `[Ctrl+][Alt+][Shift+][Win+]<key>`, case insensitive.
//! `<key>` is a letter or digit, `F1`..`F24`, a named key such as `Space`
//! or `PageUp`, or a DOM `KeyboardEvent.code` value (`KeyA`, `Digit1`,
//! `Numpad5`, ...). Codes that are not resolved here are passed through as
//! [`Key::Code`] for the host to map with its own keyboard tables.

use crate::error::HotkeyError;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;


/// Modifier set. Bit values match the Win32 `MOD_*` flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const ALT: Self = Self(0x1);
    pub const CONTROL: Self = Self(0x2);
    pub const SHIFT: Self = Self(0x4);
    pub const WIN: Self = Self(0x8);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl NamedKey {
    fn parse(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "space" => NamedKey::Space,
            "enter" | "return" => NamedKey::Enter,
            "tab" => NamedKey::Tab,
            "escape" | "esc" => NamedKey::Escape,
            "backspace" | "back" => NamedKey::Backspace,
            "insert" | "ins" => NamedKey::Insert,
            "delete" | "del" => NamedKey::Delete,
            "home" => NamedKey::Home,
            "end" => NamedKey::End,
            "pageup" | "pgup" | "prior" => NamedKey::PageUp,
            "pagedown" | "pgdn" | "next" => NamedKey::PageDown,
            "up" | "arrowup" => NamedKey::Up,
            "down" | "arrowdown" => NamedKey::Down,
            "left" | "arrowleft" => NamedKey::Left,
            "right" | "arrowright" => NamedKey::Right,
            _ => return None,
        };
        Some(key)
    }

    /// Win32 virtual-key code.
    pub fn virtual_key(self) -> u32 {
        match self {
            NamedKey::Backspace => 0x08,
            NamedKey::Tab => 0x09,
            NamedKey::Enter => 0x0D,
            NamedKey::Escape => 0x1B,
            NamedKey::Space => 0x20,
            NamedKey::PageUp => 0x21,
            NamedKey::PageDown => 0x22,
            NamedKey::End => 0x23,
            NamedKey::Home => 0x24,
            NamedKey::Left => 0x25,
            NamedKey::Up => 0x26,
            NamedKey::Right => 0x27,
            NamedKey::Down => 0x28,
            NamedKey::Insert => 0x2D,
            NamedKey::Delete => 0x2E,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Uppercase ASCII letter or digit.
    Char(char),
    /// Function key number, 1 to 24.
    Function(u8),
    Named(NamedKey),
    /// DOM `KeyboardEvent.code` left for the host to resolve.
    Code(String),
}

impl Key {
    fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return c
                .is_ascii_alphanumeric()
                .then(|| Key::Char(c.to_ascii_uppercase()));
        }

        if let Some(number) = token
            .strip_prefix(['F', 'f'])
            .and_then(|n| n.parse::<u8>().ok())
        {
            return (1..=24).contains(&number).then_some(Key::Function(number));
        }

        if let Some(letter) = token.strip_prefix("Key")
            && let Some(key) = single_char(letter, |c| c.is_ascii_uppercase())
        {
            return Some(Key::Char(key));
        }
        if let Some(digit) = token.strip_prefix("Digit")
            && let Some(key) = single_char(digit, |c| c.is_ascii_digit())
        {
            return Some(Key::Char(key));
        }

        if let Some(named) = NamedKey::parse(token) {
            return Some(Key::Named(named));
        }

        let looks_like_code = token.starts_with(|c: char| c.is_ascii_uppercase())
            && token.chars().all(|c| c.is_ascii_alphanumeric());
        looks_like_code.then(|| Key::Code(token.to_string()))
    }

    /// Win32 virtual-key code, or `None` for an unresolved [`Key::Code`].
    pub fn virtual_key(&self) -> Option<u32> {
        match self {
            Key::Char(c) => Some(*c as u32),
            Key::Function(n) => Some(0x70 + u32::from(*n) - 1),
            Key::Named(named) => Some(named.virtual_key()),
            Key::Code(_) => None,
        }
    }
}

fn single_char(text: &str, accept: impl Fn(char) -> bool) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if accept(c) => Some(c),
        _ => None,
    }
}

/// A parsed modifier+key combination.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl Hotkey {
    pub fn parse(shortcut: &str) -> Result<Self, HotkeyError> {
        let shortcut = shortcut.trim();
        if shortcut.is_empty() {
            return Err(HotkeyError::Empty);
        }

        let mut modifiers = Modifiers::NONE;
        let mut key = None;

        for part in shortcut.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "" => continue,
                "ctrl" | "control" => modifiers |= Modifiers::CONTROL,
                "alt" => modifiers |= Modifiers::ALT,
                "shift" => modifiers |= Modifiers::SHIFT,
                "win" | "meta" | "super" => modifiers |= Modifiers::WIN,
                _ => {
                    if key.is_some() {
                        return Err(HotkeyError::MultipleKeys(shortcut.to_string()));
                    }
                    let parsed =
                        Key::parse(part).ok_or_else(|| HotkeyError::UnknownKey(part.to_string()))?;
                    key = Some(parsed);
                }
            }
        }

        let key = key.ok_or_else(|| HotkeyError::MissingKey(shortcut.to_string()))?;
        Ok(Self { modifiers, key })
    }

    /// Parses a system-wide shortcut, which must include Ctrl or Alt.
    pub fn parse_global(shortcut: &str) -> Result<Self, HotkeyError> {
        let hotkey = Self::parse(shortcut)?;
        if !hotkey.has_ctrl_or_alt() {
            return Err(HotkeyError::NeedsCtrlOrAlt(shortcut.trim().to_string()));
        }
        Ok(hotkey)
    }

    /// Global shortcuts without Ctrl or Alt would swallow ordinary typing.
    pub fn has_ctrl_or_alt(&self) -> bool {
        self.modifiers.contains(Modifiers::CONTROL) || self.modifiers.contains(Modifiers::ALT)
    }
}

impl FromStr for Hotkey {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CONTROL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::WIN, "Win"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match &self.key {
            Key::Char(c) => write!(f, "{c}"),
            Key::Function(n) => write!(f, "F{n}"),
            Key::Named(named) => write!(f, "{named:?}"),
            Key::Code(code) => f.write_str(code),
        }
    }
}
