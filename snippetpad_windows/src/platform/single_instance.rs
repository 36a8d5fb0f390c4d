//! One running launcher per data directory.
//!
//! Two launchers sharing a data directory would overwrite each other's
//! `settings.toml`, so the directory is locked with a named mutex. Copies
//! with their own directories run side by side.

use crate::platform::wm;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::Path;
use windows::Win32::{
    Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError, HANDLE, LPARAM},
    System::Threading::{CreateMutexW, ReleaseMutex},
    UI::WindowsAndMessaging::{FindWindowExW, SendMessageW},
};
use windows_core::{HSTRING, PCWSTR};

#[cfg(debug_assertions)]
const LOCK_PREFIX: &str = "Local\\SnippetPad.Debug";

#[cfg(not(debug_assertions))]
const LOCK_PREFIX: &str = "Local\\SnippetPad";

/// Identifies a data directory across processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceKey(u32);

impl InstanceKey {
    /// Windows paths compare case-insensitively and accept either separator.
    pub fn for_dir(dir: &Path) -> Self {
        let normalized = dir
            .to_string_lossy()
            .replace('/', "\\")
            .trim_end_matches('\\')
            .to_lowercase();
        let mut hasher = DefaultHasher::new();
        normalized.hash(&mut hasher);
        Self(hasher.finish() as u32)
    }

    pub fn mutex_name(self) -> String {
        format!("{LOCK_PREFIX}.{:08x}", self.0)
    }

    pub fn to_lparam(self) -> LPARAM {
        LPARAM(self.0 as isize)
    }

    pub fn from_lparam(lparam: LPARAM) -> Self {
        Self(lparam.0 as u32)
    }
}

/// Owns the data directory's mutex until dropped.
pub struct InstanceLock {
    mutex: HANDLE,
}

pub enum Claim {
    Acquired(InstanceLock),
    /// The mutex could not be created; run without the guarantee.
    Unguarded,
    /// Another launcher holds this data directory.
    Held,
}

impl InstanceLock {
    pub fn claim(key: InstanceKey) -> Claim {
        let name = HSTRING::from(key.mutex_name());
        let mutex = match unsafe { CreateMutexW(None, true, &name) } {
            Ok(mutex) => mutex,
            Err(err) => {
                tracing::warn!(error = %err, "instance lock unavailable");
                return Claim::Unguarded;
            }
        };
        if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
            let _ = unsafe { CloseHandle(mutex) };
            return Claim::Held;
        }
        tracing::debug!(name = %name, "instance lock acquired");
        Claim::Acquired(Self { mutex })
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        unsafe {
            let _ = ReleaseMutex(self.mutex);
            let _ = CloseHandle(self.mutex);
        }
    }
}

/// Asks the launcher window that owns `key` to come forward. Windows of
/// `class_name` answer `ACTIVATE_INSTANCE` with nonzero only for their own
/// key. Returns whether one answered.
pub fn activate_running(class_name: PCWSTR, key: InstanceKey) -> bool {
    let mut after = None;
    loop {
        let hwnd = match unsafe { FindWindowExW(None, after, class_name, None) } {
            Ok(hwnd) if !hwnd.is_invalid() => hwnd,
            _ => return false,
        };
        let answer =
            unsafe { SendMessageW(hwnd, wm::ACTIVATE_INSTANCE, None, Some(key.to_lparam())) };
        if answer.0 != 0 {
            tracing::info!("data directory in use, activated the running launcher");
            return true;
        }
        after = Some(hwnd);
    }
}
