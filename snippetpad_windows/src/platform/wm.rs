//! Custom window messages (WM_APP + N).
use windows::Win32::UI::WindowsAndMessaging::WM_APP;

/// Posted by the UI queue waker after a command was queued from any thread.
pub const PROCESS_UI_COMMANDS: u32 = WM_APP + 1;

/// Posted by the scroll panel when its client area changed size.
pub const PANEL_RESIZED: u32 = WM_APP + 2;

/// Sent by a second launch to bring the running one to the front. lparam
/// carries the `InstanceKey` of the data directory it wanted.
pub const ACTIVATE_INSTANCE: u32 = WM_APP + 3;

/// Forwarded `WM_VSCROLL` from the scroll panel; wparam is unchanged.
pub const PANEL_VSCROLL: u32 = WM_APP + 4;

/// Forwarded `WM_MOUSEWHEEL` from the scroll panel; wparam is unchanged.
pub const PANEL_WHEEL: u32 = WM_APP + 5;
