//! Reload button, pin checkbox and status label above the group panel.

use crate::platform::text::UiFonts;
use crate::ui::theme::{
    ID_PIN, ID_RELOAD, ID_STATUS, PIN_CHECKBOX, RELOAD_BUTTON, STATUS_LABEL,
    STATUS_RIGHT_MARGIN, scale_rect,
};
use crate::ui::{create_child, place, set_font, set_text};
use snippetpad_core::layout::{DpiScale, FontWeight};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::Controls::{BST_CHECKED, BST_UNCHECKED};
use windows::Win32::UI::WindowsAndMessaging::{
    BM_GETCHECK, BM_SETCHECK, BS_AUTOCHECKBOX, BS_PUSHBUTTON, SS_LEFTNOWORDWRAP, SS_NOPREFIX,
    SendMessageW, WINDOW_STYLE, WS_TABSTOP,
};
use windows_core::Result;
use windows_strings::w;

pub struct TopBar {
    pub reload: HWND,
    pub pin: HWND,
    pub status: HWND,
    fonts: UiFonts,
}

impl TopBar {
    pub fn create(parent: HWND, scale: DpiScale, pinned: bool) -> Result<Self> {
        let fonts = UiFonts::new(scale);
        let font = fonts.get(FontWeight::Regular);

        let reload = create_child(
            parent,
            w!("BUTTON"),
            "Reload",
            WS_TABSTOP | WINDOW_STYLE(BS_PUSHBUTTON as u32),
            scale_rect(RELOAD_BUTTON, scale),
            ID_RELOAD,
            font,
        )?;
        let pin = create_child(
            parent,
            w!("BUTTON"),
            "Pin",
            WS_TABSTOP | WINDOW_STYLE(BS_AUTOCHECKBOX as u32),
            scale_rect(PIN_CHECKBOX, scale),
            ID_PIN,
            font,
        )?;
        let status = create_child(
            parent,
            w!("STATIC"),
            "",
            WINDOW_STYLE(SS_LEFTNOWORDWRAP.0 | SS_NOPREFIX.0),
            scale_rect(STATUS_LABEL, scale),
            ID_STATUS,
            font,
        )?;

        let bar = Self {
            reload,
            pin,
            status,
            fonts,
        };
        bar.set_pinned(pinned);
        Ok(bar)
    }

    /// Positions the widgets for the current client width and DPI.
    pub fn layout(&mut self, client_width: i32, scale: DpiScale) {
        let controls = [self.reload, self.pin, self.status];
        self.fonts.rescale(scale, |fonts| {
            for hwnd in controls {
                set_font(hwnd, fonts.get(FontWeight::Regular));
            }
        });

        place(self.reload, scale_rect(RELOAD_BUTTON, scale));
        place(self.pin, scale_rect(PIN_CHECKBOX, scale));

        let mut status = scale_rect(STATUS_LABEL, scale);
        status.width = (client_width - status.x - scale.scale(STATUS_RIGHT_MARGIN)).max(0);
        place(self.status, status);
    }

    pub fn set_status(&self, text: &str) {
        set_text(self.status, text);
    }

    pub fn is_pinned(&self) -> bool {
        let state = unsafe { SendMessageW(self.pin, BM_GETCHECK, None, None) };
        state.0 == BST_CHECKED.0 as isize
    }

    pub fn set_pinned(&self, pinned: bool) {
        let state = if pinned { BST_CHECKED } else { BST_UNCHECKED };
        let _ = unsafe {
            SendMessageW(
                self.pin,
                BM_SETCHECK,
                Some(WPARAM(state.0 as usize)),
                Some(LPARAM(0)),
            )
        };
    }
}
