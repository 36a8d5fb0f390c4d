//! Window message handlers.

use crate::app::App;
use crate::platform::hotkey::TOGGLE_PANEL_HOTKEY_ID;
use crate::platform::single_instance::InstanceKey;
use crate::ui::theme::{ID_PIN, ID_RELOAD};
use snippetpad_core::dispatch::UiCommand;
use snippetpad_core::layout::DpiScale;
use snippetpad_core::settings::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM},
    Graphics::Gdi::{COLOR_BTNFACE, GetSysColorBrush, HDC, SetBkMode, SetTextColor, TRANSPARENT},
    UI::{
        HiDpi::GetDpiForWindow,
        WindowsAndMessaging::{
            BN_CLICKED, MINMAXINFO, SWP_NOACTIVATE, SWP_NOZORDER, SetWindowPos,
        },
    },
};

fn loword(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

fn hiword(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

/// WM_GETMINMAXINFO: Enforce minimum window size during resize.
pub fn on_getminmaxinfo(hwnd: HWND, lparam: LPARAM) -> LRESULT {
    let info = lparam.0 as *mut MINMAXINFO;
    if !info.is_null() {
        let scale = DpiScale::from_dpi(unsafe { GetDpiForWindow(hwnd) });
        unsafe {
            (*info).ptMinTrackSize.x = scale.scale(MIN_WINDOW_WIDTH);
            (*info).ptMinTrackSize.y = scale.scale(MIN_WINDOW_HEIGHT);
        }
    }
    LRESULT(0)
}

/// WM_COMMAND: Reload, pin toggle and snippet buttons.
pub fn on_command(app: &mut App, wparam: WPARAM) -> LRESULT {
    if u32::from(hiword(wparam.0)) != BN_CLICKED {
        return LRESULT(0);
    }
    match loword(wparam.0) {
        ID_RELOAD => app.reload(),
        ID_PIN => app.pin_toggled(),
        id => {
            if !app.snippet_clicked(id) {
                tracing::debug!(id, "command from unknown control");
            }
        }
    }
    LRESULT(0)
}

/// WM_CTLCOLORSTATIC: Tone color for the status label.
pub fn on_ctlcolorstatic(app: &App, wparam: WPARAM, lparam: LPARAM) -> Option<LRESULT> {
    let color = app.static_color(HWND(lparam.0 as *mut _))?;
    let hdc = HDC(wparam.0 as *mut _);
    unsafe {
        SetTextColor(hdc, color);
        SetBkMode(hdc, TRANSPARENT);
        Some(LRESULT(GetSysColorBrush(COLOR_BTNFACE).0 as isize))
    }
}

/// WM_HOTKEY: Show or hide the launcher.
pub fn on_hotkey(app: &App, wparam: WPARAM) -> LRESULT {
    if wparam.0 == TOGGLE_PANEL_HOTKEY_ID as usize {
        app.toggle_visibility();
    }
    LRESULT(0)
}

/// WM_DPICHANGED: Adopt the suggested rectangle.
///
/// The resulting WM_SIZE lays out the fixed children; the panel rebuild is
/// queued and runs from the message loop.
pub fn on_dpichanged(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) {
    tracing::info!(dpi = hiword(wparam.0), "dpi changed");
    let suggested = lparam.0 as *const RECT;
    if suggested.is_null() {
        return;
    }
    let rect = unsafe { *suggested };
    let _ = unsafe {
        SetWindowPos(
            hwnd,
            None,
            rect.left,
            rect.top,
            rect.right - rect.left,
            rect.bottom - rect.top,
            SWP_NOZORDER | SWP_NOACTIVATE,
        )
    };
}

/// Queued after WM_DPICHANGED has resized the window.
pub fn after_dpichanged(app: &App) {
    app.post(UiCommand::DpiChanged);
}

/// WM_DISPLAYCHANGE: Resolution or monitor layout changed.
pub fn on_displaychange(app: &App) -> LRESULT {
    tracing::info!("display settings changed");
    app.post(UiCommand::DisplaySettingsChanged);
    LRESULT(0)
}

/// ACTIVATE_INSTANCE: A second launch found this data directory locked.
/// Answers 1 only when `lparam` carries this launcher's key.
pub fn on_activate_instance(app: &App, lparam: LPARAM) -> LRESULT {
    if app.instance_key() != InstanceKey::from_lparam(lparam) {
        return LRESULT(0);
    }
    app.show_and_focus();
    LRESULT(1)
}

/// WM_CLOSE: Persist state and release OS resources. The caller destroys
/// the window once `app` is no longer borrowed; WM_DESTROY frees it.
pub fn on_close(app: &mut App) {
    app.shutdown();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_command_words() {
        let wparam = (1u32 << 16 | 1000) as usize;
        assert_eq!(loword(wparam), 1000);
        assert_eq!(hiword(wparam), 1);
    }
}
