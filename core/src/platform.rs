//! Capability traits the native host implements.
//!
//! The foreground tracker, paste dispatcher and controller only talk to the
//! operating system through these traits, so all of them run against fakes
//! in tests.

use crate::layout::{DpiScale, FontWeight, Point, Rect, Size};

/// Opaque top-level window handle. Zero is the null handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub const NULL: Self = Self(0);

    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> isize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

pub type ProcessId = u32;

/// Callback invoked for every foreground-window change. May run on a thread
/// other than the UI thread.
pub type ForegroundListener = Box<dyn Fn(WindowHandle) + Send + Sync + 'static>;

/// Window-management capabilities of the operating system.
pub trait WindowSystem: Send + Sync + 'static {
    /// Guard for an active foreground-change subscription. Dropping it
    /// unsubscribes.
    type Subscription;

    fn current_process_id(&self) -> ProcessId;

    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Activates `window`. Returns `false` if the OS refused.
    fn set_foreground_window(&self, window: WindowHandle) -> bool;

    fn is_window_live(&self, window: WindowHandle) -> bool;

    fn owning_process_id(&self, window: WindowHandle) -> Option<ProcessId>;

    /// Injects a paste shortcut into whichever window currently has focus.
    fn send_paste_keystroke(&self) -> bool;

    /// Subscribes to foreground changes of every process except this one.
    /// Returns `None` if the OS rejected the subscription.
    fn subscribe_foreground_changed(
        &self,
        listener: ForegroundListener,
    ) -> Option<Self::Subscription>;
}

/// Geometry of the launcher's own window.
pub trait PanelWindow {
    /// Current DPI of the monitor hosting the window.
    fn dpi(&self) -> u32;

    /// Client width of the scrollable group panel.
    fn viewport_width(&self) -> i32;

    /// Client width of the whole window.
    fn client_width(&self) -> i32;

    /// Outer bounds in screen coordinates.
    fn bounds(&self) -> Rect;

    /// Working area of the monitor nearest to the window.
    fn work_area(&self) -> Option<Rect>;

    fn move_to(&self, origin: Point);
}

/// Measures rendered text under the UI font.
pub trait TextMeasurer {
    fn measure(&self, text: &str, weight: FontWeight, scale: DpiScale) -> Size;
}
