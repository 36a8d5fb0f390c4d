//! Foreground window queries, activation and keystroke injection.
//!
//! Foreground changes are observed with an out-of-context WinEvent hook,
//! which delivers `EVENT_SYSTEM_FOREGROUND` through the message loop of the
//! thread that installed it. The hook skips events raised by this process.

use snippetpad_core::platform::{ForegroundListener, ProcessId, WindowHandle, WindowSystem};
use std::sync::Mutex;
use windows::Win32::Foundation::HWND;
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT, KEYEVENTF_KEYUP, SendInput,
    VIRTUAL_KEY, VK_CONTROL,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowThreadProcessId, IsWindow, SetForegroundWindow,
};

const EVENT_SYSTEM_FOREGROUND: u32 = 0x0003;
const WINEVENT_OUTOFCONTEXT: u32 = 0x0000;
const WINEVENT_SKIPOWNPROCESS: u32 = 0x0002;
const OBJID_WINDOW: i32 = 0;
const VK_V: VIRTUAL_KEY = VIRTUAL_KEY(b'V' as u16);

/// Listener of the single active hook. The hook callback is a plain function
/// pointer, so the closure lives here.
static LISTENER: Mutex<Option<ForegroundListener>> = Mutex::new(None);

pub fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut _)
}

pub fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as isize)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

/// Removes the WinEvent hook and its listener when dropped.
pub struct WinEventHookGuard(HWINEVENTHOOK);

impl Drop for WinEventHookGuard {
    fn drop(&mut self) {
        let unhooked = unsafe { UnhookWinEvent(self.0) }.as_bool();
        if !unhooked {
            tracing::warn!("UnhookWinEvent failed");
        }
        if let Ok(mut slot) = LISTENER.lock() {
            *slot = None;
        }
    }
}

unsafe extern "system" fn on_win_event(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if event != EVENT_SYSTEM_FOREGROUND || id_object != OBJID_WINDOW {
        return;
    }
    if let Ok(slot) = LISTENER.lock()
        && let Some(listener) = slot.as_ref()
    {
        listener(from_hwnd(hwnd));
    }
}

impl WindowSystem for Win32WindowSystem {
    type Subscription = WinEventHookGuard;

    fn current_process_id(&self) -> ProcessId {
        unsafe { GetCurrentProcessId() }
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        (!hwnd.is_invalid()).then(|| from_hwnd(hwnd))
    }

    fn set_foreground_window(&self, window: WindowHandle) -> bool {
        unsafe { SetForegroundWindow(to_hwnd(window)) }.as_bool()
    }

    fn is_window_live(&self, window: WindowHandle) -> bool {
        unsafe { IsWindow(Some(to_hwnd(window))) }.as_bool()
    }

    fn owning_process_id(&self, window: WindowHandle) -> Option<ProcessId> {
        let mut pid = 0u32;
        let thread = unsafe { GetWindowThreadProcessId(to_hwnd(window), Some(&mut pid)) };
        (thread != 0 && pid != 0).then_some(pid)
    }

    fn send_paste_keystroke(&self) -> bool {
        let inputs = [
            key_input(VK_CONTROL, KEYBD_EVENT_FLAGS(0)),
            key_input(VK_V, KEYBD_EVENT_FLAGS(0)),
            key_input(VK_V, KEYEVENTF_KEYUP),
            key_input(VK_CONTROL, KEYEVENTF_KEYUP),
        ];
        let sent = unsafe { SendInput(&inputs, size_of::<INPUT>() as i32) };
        sent as usize == inputs.len()
    }

    fn subscribe_foreground_changed(
        &self,
        listener: ForegroundListener,
    ) -> Option<WinEventHookGuard> {
        let Ok(mut slot) = LISTENER.lock() else {
            return None;
        };
        let hook = unsafe {
            SetWinEventHook(
                EVENT_SYSTEM_FOREGROUND,
                EVENT_SYSTEM_FOREGROUND,
                None,
                Some(on_win_event),
                0,
                0,
                WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
            )
        };
        if hook.is_invalid() {
            tracing::warn!(
                error = %std::io::Error::last_os_error(),
                "SetWinEventHook failed"
            );
            return None;
        }
        *slot = Some(listener);
        Some(WinEventHookGuard(hook))
    }
}

fn key_input(key: VIRTUAL_KEY, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: key,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}
