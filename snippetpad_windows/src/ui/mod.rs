//! Native widgets for the launcher window.

pub mod panel;
pub mod theme;
pub mod top_bar;

use snippetpad_core::layout::Rect;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::Graphics::Gdi::HFONT;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, HMENU, SWP_NOACTIVATE, SWP_NOZORDER, SendMessageW, SetWindowPos,
    SetWindowTextW, WINDOW_EX_STYLE, WINDOW_STYLE, WM_SETFONT, WS_CHILD, WS_CLIPSIBLINGS,
    WS_VISIBLE,
};
use windows_core::{HSTRING, PCWSTR, Result};

/// Creates a visible child control with the given control ID.
pub fn create_child(
    parent: HWND,
    class: PCWSTR,
    text: &str,
    style: WINDOW_STYLE,
    bounds: Rect,
    id: u16,
    font: HFONT,
) -> Result<HWND> {
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class,
            &HSTRING::from(text),
            WS_CHILD | WS_VISIBLE | WS_CLIPSIBLINGS | style,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            Some(parent),
            Some(HMENU(id as usize as *mut _)),
            None,
            None,
        )?
    };
    set_font(hwnd, font);
    Ok(hwnd)
}

pub fn set_font(hwnd: HWND, font: HFONT) {
    let _ = unsafe {
        SendMessageW(
            hwnd,
            WM_SETFONT,
            Some(WPARAM(font.0 as usize)),
            Some(LPARAM(1)),
        )
    };
}

pub fn set_text(hwnd: HWND, text: &str) {
    let _ = unsafe { SetWindowTextW(hwnd, &HSTRING::from(text)) };
}

pub fn place(hwnd: HWND, bounds: Rect) {
    let _ = unsafe {
        SetWindowPos(
            hwnd,
            None,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            SWP_NOZORDER | SWP_NOACTIVATE,
        )
    };
}
