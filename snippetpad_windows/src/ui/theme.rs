//! Window chrome constants, in pixels at 96 DPI.

use snippetpad_core::layout::{DpiScale, Rect};
use snippetpad_core::status::StatusTone;
use windows::Win32::Foundation::COLORREF;

pub const RELOAD_BUTTON: Rect = Rect::new(10, 12, 50, 28);
pub const PIN_CHECKBOX: Rect = Rect::new(70, 16, 51, 21);
/// Left and top of the status label; it stretches to the right edge.
pub const STATUS_LABEL: Rect = Rect::new(126, 18, 0, 20);
pub const STATUS_RIGHT_MARGIN: i32 = 10;

/// Left and top of the scrollable group panel; it fills the rest of the client area.
pub const PANEL_LEFT: i32 = 10;
pub const PANEL_TOP: i32 = 50;

/// Pixels scrolled per wheel notch and per arrow click.
pub const SCROLL_LINE: i32 = 20;

/// Control IDs of the fixed widgets.
pub const ID_RELOAD: u16 = 100;
pub const ID_PIN: u16 = 101;
pub const ID_STATUS: u16 = 102;
/// Snippet buttons take IDs from here up, in layout order.
pub const ID_FIRST_SNIPPET: u16 = 1000;

/// Timer that clears the status line.
pub const STATUS_TIMER_ID: usize = 1;

pub fn scale_rect(rect: Rect, scale: DpiScale) -> Rect {
    Rect::new(
        scale.scale(rect.x),
        scale.scale(rect.y),
        scale.scale(rect.width),
        scale.scale(rect.height),
    )
}

const fn rgb(r: u8, g: u8, b: u8) -> COLORREF {
    COLORREF(r as u32 | (g as u32) << 8 | (b as u32) << 16)
}

pub fn status_color(tone: StatusTone) -> COLORREF {
    match tone {
        StatusTone::Info => rgb(105, 105, 105),
        StatusTone::Warning => rgb(210, 105, 30),
        StatusTone::Error => rgb(205, 92, 92),
    }
}
