//! Tracks the most recent foreground window owned by another process.
//!
//! The handle is written from the OS notification callback and read by the
//! paste dispatcher on the UI thread. It is a single word with no compound
//! invariant.

use crate::platform::{ProcessId, WindowHandle, WindowSystem};
use std::sync::Arc;
use std::sync::atomic::{AtomicIsize, Ordering};
use tracing::{debug, info, warn};


/// Shared slot holding the last external foreground window.
#[derive(Debug, Clone, Default)]
pub struct TrackedWindow(Arc<AtomicIsize>);

impl TrackedWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tracked window, or `None` if nothing external has been seen yet.
    pub fn get(&self) -> Option<WindowHandle> {
        let raw = self.0.load(Ordering::Acquire);
        (raw != 0).then(|| WindowHandle::from_raw(raw))
    }

    fn set(&self, window: WindowHandle) {
        self.0.store(window.raw(), Ordering::Release);
    }
}

/// Records `window` if it is non-null and owned by a process other than
/// `own_pid`. Returns whether the tracked handle was overwritten.
fn record_if_external<W: WindowSystem>(
    windows: &W,
    own_pid: ProcessId,
    tracked: &TrackedWindow,
    window: WindowHandle,
) -> bool {
    if window.is_null() {
        return false;
    }
    match windows.owning_process_id(window) {
        Some(pid) if pid != own_pid => {
            tracked.set(window);
            debug!(window = window.raw(), pid, "external foreground window");
            true
        }
        _ => false,
    }
}

pub struct ForegroundTracker<W: WindowSystem> {
    windows: Arc<W>,
    own_pid: ProcessId,
    tracked: TrackedWindow,
    subscription: Option<W::Subscription>,
}

impl<W: WindowSystem> ForegroundTracker<W> {
    /// Seeds the tracked handle from the current foreground window, then
    /// subscribes to foreground changes.
    pub fn start(windows: Arc<W>) -> Self {
        let own_pid = windows.current_process_id();
        let tracked = TrackedWindow::new();

        if let Some(current) = windows.foreground_window() {
            record_if_external(windows.as_ref(), own_pid, &tracked, current);
        }

        let listener = {
            let windows = Arc::clone(&windows);
            let tracked = tracked.clone();
            Box::new(move |window: WindowHandle| {
                record_if_external(windows.as_ref(), own_pid, &tracked, window);
            })
        };

        let subscription = windows.subscribe_foreground_changed(listener);
        if subscription.is_some() {
            info!(pid = own_pid, "subscribed to foreground changes");
        } else {
            warn!("foreground change subscription rejected; paste target will not follow focus");
        }

        Self {
            windows,
            own_pid,
            tracked,
            subscription,
        }
    }

    /// Applies the same filter as the notification callback.
    pub fn observe(&self, window: WindowHandle) -> bool {
        record_if_external(self.windows.as_ref(), self.own_pid, &self.tracked, window)
    }

    pub fn last_external(&self) -> Option<WindowHandle> {
        self.tracked.get()
    }

    /// A read handle for the paste dispatcher.
    pub fn tracked(&self) -> TrackedWindow {
        self.tracked.clone()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Releases the OS subscription. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.subscription.take().is_some() {
            info!("unsubscribed from foreground changes");
        }
    }
}
