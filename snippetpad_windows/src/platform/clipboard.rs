//! Win32 clipboard operations.

use snippetpad_core::clipboard::ClipboardBackend;
use snippetpad_core::error::ClipboardError;
use windows::Win32::Foundation::{HANDLE, HGLOBAL, HWND};
use windows::Win32::System::DataExchange::{
    CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
};
use windows::Win32::System::Memory::{GMEM_MOVEABLE, GlobalAlloc, GlobalFree, GlobalLock, GlobalUnlock};

const CF_UNICODETEXT: u32 = 13;

/// Writes plain text as `CF_UNICODETEXT`, owned by the launcher window.
pub struct Win32Clipboard {
    owner: HWND,
}

impl Win32Clipboard {
    pub fn new(owner: HWND) -> Self {
        Self { owner }
    }
}

impl ClipboardBackend for Win32Clipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        unsafe {
            // Fails while another process holds the clipboard open.
            OpenClipboard(Some(self.owner)).map_err(access)?;
            let result = write_unicode_text(text);
            let _ = CloseClipboard();
            result
        }
    }
}

/// # Safety
///
/// The clipboard must be open.
unsafe fn write_unicode_text(text: &str) -> Result<(), ClipboardError> {
    unsafe {
        EmptyClipboard().map_err(access)?;

        let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        let bytes = wide.len() * size_of::<u16>();

        let hglobal = GlobalAlloc(GMEM_MOVEABLE, bytes).map_err(access)?;
        let ptr = GlobalLock(hglobal) as *mut u16;
        if ptr.is_null() {
            free(hglobal);
            return Err(ClipboardError::Access("GlobalLock failed".to_string()));
        }
        std::ptr::copy_nonoverlapping(wide.as_ptr(), ptr, wide.len());
        let _ = GlobalUnlock(hglobal);

        // On success the clipboard owns the memory.
        if let Err(err) = SetClipboardData(CF_UNICODETEXT, Some(HANDLE(hglobal.0))) {
            free(hglobal);
            return Err(access(err));
        }
        Ok(())
    }
}

unsafe fn free(hglobal: HGLOBAL) {
    let _ = unsafe { GlobalFree(Some(hglobal)) };
}

fn access(err: windows::core::Error) -> ClipboardError {
    ClipboardError::Access(err.to_string())
}
