//! Global hotkey registration using Win32 RegisterHotKey.
//!
//! Shortcuts are parsed by [`Hotkey`]. Keys given as a DOM `KeyboardEvent.code`
//! that the parser leaves unresolved (e.g. "Numpad5", "Backquote") are mapped
//! with the `keycode` crate to a scan code, then with `MapVirtualKeyW` to a
//! virtual key code.

use keycode::{KeyMap, KeyMappingCode};
use snippetpad_core::error::HotkeyError;
use snippetpad_core::hotkey::{Hotkey, Key};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MAPVK_VSC_TO_VK, MOD_NOREPEAT, MapVirtualKeyW, RegisterHotKey,
    UnregisterHotKey,
};

/// Unique ID for the toggle-panel hotkey, delivered as WM_HOTKEY's wparam.
pub const TOGGLE_PANEL_HOTKEY_ID: i32 = 1;

/// A parsed shortcut resolved to Win32 values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub modifiers: HOT_KEY_MODIFIERS,
    pub vk_code: u32,
}

impl ShortcutBinding {
    pub fn resolve(hotkey: &Hotkey) -> Result<Self, HotkeyError> {
        let vk_code = match &hotkey.key {
            Key::Code(code) => code_to_vk(code),
            key => key.virtual_key(),
        }
        .ok_or_else(|| HotkeyError::UnknownKey(hotkey.to_string()))?;

        Ok(Self {
            modifiers: HOT_KEY_MODIFIERS(hotkey.modifiers.bits()),
            vk_code,
        })
    }
}

/// Converts a DOM e.code string to a Windows virtual key code.
fn code_to_vk(code: &str) -> Option<u32> {
    let key_code: KeyMappingCode = code.parse().ok()?;
    let key_map = KeyMap::from(key_code);
    let scan_code = key_map.win as u32;

    if scan_code == 0 {
        return None;
    }

    let vk = unsafe { MapVirtualKeyW(scan_code, MAPVK_VSC_TO_VK) };
    (vk != 0).then_some(vk)
}

/// Registers the toggle-panel hotkey. An empty shortcut registers nothing.
///
/// Returns `true` if a hotkey is now registered.
pub fn register_toggle_hotkey(hwnd: HWND, shortcut: &str) -> bool {
    if shortcut.trim().is_empty() {
        tracing::info!("no toggle hotkey configured");
        return false;
    }

    let binding = match Hotkey::parse_global(shortcut).and_then(|h| ShortcutBinding::resolve(&h)) {
        Ok(binding) => binding,
        Err(err) => {
            tracing::warn!(%shortcut, error = %err, "invalid toggle hotkey");
            return false;
        }
    };

    // MOD_NOREPEAT prevents repeated WM_HOTKEY while the keys are held.
    let modifiers = binding.modifiers | MOD_NOREPEAT;
    let result = unsafe {
        RegisterHotKey(
            Some(hwnd),
            TOGGLE_PANEL_HOTKEY_ID,
            modifiers,
            binding.vk_code,
        )
    };

    match result {
        Ok(()) => {
            tracing::info!(%shortcut, "toggle hotkey registered");
            true
        }
        Err(err) => {
            tracing::warn!(%shortcut, error = %err, "RegisterHotKey failed, shortcut in use?");
            false
        }
    }
}

pub fn unregister_toggle_hotkey(hwnd: HWND) {
    if let Err(err) = unsafe { UnregisterHotKey(Some(hwnd), TOGGLE_PANEL_HOTKEY_ID) } {
        tracing::debug!(error = %err, "UnregisterHotKey failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_vk(shortcut: &str) -> Option<u32> {
        let hotkey = Hotkey::parse(shortcut).ok()?;
        ShortcutBinding::resolve(&hotkey).ok().map(|b| b.vk_code)
    }

    #[test]
    fn parse_letters_and_digits() {
        assert_eq!(parse_vk("Ctrl+KeyA"), Some(0x41));
        assert_eq!(parse_vk("Ctrl+Q"), Some(0x51));
        assert_eq!(parse_vk("Ctrl+Digit9"), Some(0x39));
    }

    #[test]
    fn parse_function_and_named_keys() {
        assert_eq!(parse_vk("Alt+F12"), Some(0x7B));
        assert_eq!(parse_vk("Ctrl+ArrowUp"), Some(0x26));
        assert_eq!(parse_vk("Ctrl+Space"), Some(0x20));
    }

    #[test]
    fn dom_codes_resolve_through_scan_codes() {
        assert!(parse_vk("Ctrl+Numpad5").is_some());
        assert!(parse_vk("Ctrl+Backquote").is_some());
    }

    #[test]
    fn modifiers_map_to_win32_flags() {
        use windows::Win32::UI::Input::KeyboardAndMouse::{MOD_ALT, MOD_CONTROL, MOD_SHIFT};

        let binding = ShortcutBinding::resolve(&Hotkey::parse("Ctrl+Alt+Q").unwrap()).unwrap();
        assert_eq!(binding.modifiers, MOD_CONTROL | MOD_ALT);

        let binding = ShortcutBinding::resolve(&Hotkey::parse("Ctrl+Shift+F1").unwrap()).unwrap();
        assert_eq!(binding.modifiers, MOD_CONTROL | MOD_SHIFT);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(parse_vk("Ctrl+NotAKey").is_none());
    }
}
