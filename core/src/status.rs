//! Single-line transient status message.
//!
//! Showing a message replaces the current one and restarts its timeout;
//! messages never queue.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTick {
    /// Nothing is shown.
    Idle,
    /// The message is still current; check again after this long.
    Pending(Duration),
    /// The message expired and was cleared.
    Cleared,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    text: String,
    tone: StatusTone,
    deadline: Option<Instant>,
    timeout: Duration,
}

impl StatusLine {
    pub fn new(timeout: Duration) -> Self {
        Self {
            text: String::new(),
            tone: StatusTone::Info,
            deadline: None,
            timeout,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tone(&self) -> StatusTone {
        self.tone
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_visible(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn show(&mut self, text: impl Into<String>, tone: StatusTone, now: Instant) {
        self.text = text.into();
        self.tone = tone;
        self.deadline = Some(now + self.timeout);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.tone = StatusTone::Info;
        self.deadline = None;
    }

    pub fn tick(&mut self, now: Instant) -> StatusTick {
        match self.deadline {
            None => StatusTick::Idle,
            Some(deadline) if now >= deadline => {
                self.clear();
                StatusTick::Cleared
            }
            Some(deadline) => StatusTick::Pending(deadline - now),
        }
    }
}
