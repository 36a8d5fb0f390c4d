//! UI fonts and GDI text measurement.

use snippetpad_core::layout::{DpiScale, FontWeight, Size};
use snippetpad_core::platform::TextMeasurer;
use std::cell::RefCell;
use windows::Win32::Foundation::{HWND, SIZE};
use windows::Win32::Graphics::Gdi::{
    CreateFontIndirectW, DeleteObject, FW_BOLD, FW_NORMAL, GetDC, GetTextExtentPoint32W, HFONT,
    HGDIOBJ, LOGFONTW, ReleaseDC, SelectObject,
};
use windows_strings::w;

/// UI font height at 96 DPI (9pt).
const FONT_PIXELS: i32 = 12;

/// Creates the UI font for `scale`. The caller owns the handle.
pub fn create_ui_font(weight: FontWeight, scale: DpiScale) -> HFONT {
    let mut logfont = LOGFONTW {
        // Negative height selects by character height.
        lfHeight: -scale.scale(FONT_PIXELS),
        lfWeight: match weight {
            FontWeight::Regular => FW_NORMAL.0 as i32,
            FontWeight::Bold => FW_BOLD.0 as i32,
        },
        ..Default::default()
    };
    let face = unsafe { w!("Segoe UI").as_wide() };
    logfont.lfFaceName[..face.len()].copy_from_slice(face);
    unsafe { CreateFontIndirectW(&logfont) }
}

/// Regular and bold UI fonts at one DPI scale.
pub struct UiFonts {
    pub scale: DpiScale,
    pub regular: HFONT,
    pub bold: HFONT,
}

impl UiFonts {
    pub fn new(scale: DpiScale) -> Self {
        Self {
            scale,
            regular: create_ui_font(FontWeight::Regular, scale),
            bold: create_ui_font(FontWeight::Bold, scale),
        }
    }

    pub fn get(&self, weight: FontWeight) -> HFONT {
        match weight {
            FontWeight::Regular => self.regular,
            FontWeight::Bold => self.bold,
        }
    }

    /// Switches to fonts for `scale`. `apply` hands the new fonts to the
    /// controls before the old ones are deleted. Returns `false` when the
    /// scale is unchanged.
    pub fn rescale(&mut self, scale: DpiScale, apply: impl FnOnce(&UiFonts)) -> bool {
        if self.scale == scale {
            return false;
        }
        let fonts = UiFonts::new(scale);
        apply(&fonts);
        *self = fonts;
        true
    }
}

impl Drop for UiFonts {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(HGDIOBJ(self.regular.0));
            let _ = DeleteObject(HGDIOBJ(self.bold.0));
        }
    }
}

/// Measures text through the screen DC of the launcher window, using the
/// same fonts the widgets are drawn with.
pub struct GdiTextMeasurer {
    hwnd: HWND,
    fonts: RefCell<Option<UiFonts>>,
}

impl GdiTextMeasurer {
    pub fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            fonts: RefCell::new(None),
        }
    }
}

impl TextMeasurer for GdiTextMeasurer {
    fn measure(&self, text: &str, weight: FontWeight, scale: DpiScale) -> Size {
        let mut fonts = self.fonts.borrow_mut();
        if fonts.as_ref().is_none_or(|f| f.scale != scale) {
            *fonts = Some(UiFonts::new(scale));
        }
        let Some(fonts) = fonts.as_ref() else {
            return Size::default();
        };

        let wide: Vec<u16> = text.encode_utf16().collect();
        let mut extent = SIZE::default();
        let measured = unsafe {
            let hdc = GetDC(Some(self.hwnd));
            let previous = SelectObject(hdc, HGDIOBJ(fonts.get(weight).0));
            let measured = GetTextExtentPoint32W(hdc, &wide, &mut extent).as_bool();
            let _ = SelectObject(hdc, previous);
            let _ = ReleaseDC(Some(self.hwnd), hdc);
            measured
        };

        if !measured {
            tracing::debug!(%text, "GetTextExtentPoint32W failed");
            return Size::new(0, scale.scale(FONT_PIXELS));
        }
        Size::new(extent.cx, extent.cy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::Graphics::Gdi::GetObjectW;

    fn is_live(font: HFONT) -> bool {
        let mut logfont = LOGFONTW::default();
        let copied = unsafe {
            GetObjectW(
                HGDIOBJ(font.0),
                size_of::<LOGFONTW>() as i32,
                Some(&mut logfont as *mut LOGFONTW as *mut _),
            )
        };
        copied > 0
    }

    #[test]
    fn rescale_applies_new_fonts_while_old_ones_live() {
        let mut fonts = UiFonts::new(DpiScale::IDENTITY);
        let old = (fonts.regular, fonts.bold);
        let mut applied = None;

        let changed = fonts.rescale(DpiScale::from_dpi(144), |new| {
            assert!(is_live(old.0));
            assert!(is_live(old.1));
            assert!(is_live(new.regular));
            applied = Some(new.regular);
        });

        assert!(changed);
        assert_eq!(fonts.scale, DpiScale::from_dpi(144));
        assert_eq!(applied, Some(fonts.regular));
        assert!(is_live(fonts.regular));
    }

    #[test]
    fn rescale_to_same_scale_keeps_fonts() {
        let mut fonts = UiFonts::new(DpiScale::IDENTITY);
        let regular = fonts.regular;

        let changed = fonts.rescale(DpiScale::IDENTITY, |_| panic!("nothing to apply"));

        assert!(!changed);
        assert_eq!(fonts.regular, regular);
    }
}
