//! Best-effort paste into the last external foreground window.
//!
//! Sequence: check the tracked window is still alive, activate it, wait
//! briefly for it to take focus, then inject the paste shortcut. There is no
//! signal confirming focus actually moved; the delay is a heuristic.

use crate::foreground::TrackedWindow;
use crate::platform::{WindowHandle, WindowSystem};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

#[cfg(test)]
mod tests;

pub const DEFAULT_ACTIVATION_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// No external window has been tracked yet; nothing was attempted.
    NoTarget,
    /// The tracked window no longer exists.
    TargetGone(WindowHandle),
    /// The OS refused to bring the window to the foreground.
    ActivationRefused(WindowHandle),
    /// The window was activated but the keystroke could not be injected.
    KeystrokeFailed(WindowHandle),
    Pasted(WindowHandle),
}

impl PasteOutcome {
    /// Failures worth telling the user about. A vanished target is not one.
    pub fn is_reportable_failure(self) -> bool {
        matches!(
            self,
            PasteOutcome::ActivationRefused(_) | PasteOutcome::KeystrokeFailed(_)
        )
    }
}

pub struct PasteDispatcher<W: WindowSystem> {
    windows: Arc<W>,
    tracked: TrackedWindow,
    delay: Duration,
}

impl<W: WindowSystem> PasteDispatcher<W> {
    pub fn new(windows: Arc<W>, tracked: TrackedWindow) -> Self {
        Self::with_delay(windows, tracked, DEFAULT_ACTIVATION_DELAY)
    }

    pub fn with_delay(windows: Arc<W>, tracked: TrackedWindow, delay: Duration) -> Self {
        Self {
            windows,
            tracked,
            delay,
        }
    }

    /// Re-activates the tracked window and pastes into it.
    ///
    /// Blocks the calling thread for the activation delay.
    pub fn paste_into_last_external(&self) -> PasteOutcome {
        let Some(target) = self.tracked.get() else {
            debug!("paste skipped: no external window tracked");
            return PasteOutcome::NoTarget;
        };

        if !self.windows.is_window_live(target) {
            debug!(window = target.raw(), "paste skipped: target window is gone");
            return PasteOutcome::TargetGone(target);
        }

        if !self.windows.set_foreground_window(target) {
            info!(window = target.raw(), "paste target refused activation");
            return PasteOutcome::ActivationRefused(target);
        }

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        if !self.windows.send_paste_keystroke() {
            info!(window = target.raw(), "paste keystroke injection failed");
            return PasteOutcome::KeystrokeFailed(target);
        }

        debug!(window = target.raw(), "pasted into external window");
        PasteOutcome::Pasted(target)
    }
}
