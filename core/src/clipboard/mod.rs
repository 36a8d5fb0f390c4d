//! Clipboard writes with bounded retry.
//!
//! Another process may hold the clipboard open for a moment, so a failed
//! write is retried a fixed number of times before giving up.

use crate::error::ClipboardError;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

pub const DEFAULT_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(40);

/// A single, non-retrying clipboard write.
pub trait ClipboardBackend {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

pub struct ClipboardService<B> {
    backend: B,
    policy: RetryPolicy,
}

impl<B: ClipboardBackend> ClipboardService<B> {
    pub fn new(backend: B) -> Self {
        Self::with_policy(backend, RetryPolicy::default())
    }

    pub fn with_policy(backend: B, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sets the clipboard text, retrying with a fixed backoff.
    ///
    /// Returns [`ClipboardError::Unavailable`] once every attempt has failed.
    pub fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let attempts = self.policy.attempts.max(1);
        let mut last = String::new();

        for attempt in 1..=attempts {
            match self.backend.set_text(text) {
                Ok(()) => {
                    if attempt > 1 {
                        debug!(attempt, "clipboard write succeeded after retry");
                    }
                    return Ok(());
                }
                Err(err) => {
                    debug!(attempt, error = %err, "clipboard write failed");
                    last = err.to_string();
                    if attempt < attempts && !self.policy.backoff.is_zero() {
                        thread::sleep(self.policy.backoff);
                    }
                }
            }
        }

        warn!(attempts, "clipboard unavailable");
        Err(ClipboardError::Unavailable { attempts, last })
    }
}
