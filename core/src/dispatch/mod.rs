//! Commands marshaled onto the UI thread.
//!
//! OS notifications may arrive on any thread. Anything that must touch
//! layout or widgets is posted here instead and drained by the UI thread's
//! event loop. The optional waker lets the host nudge its message loop
//! (on Windows, a posted `WM_APP` message).

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, OnceLock};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiCommand {
    Reload,
    DisplaySettingsChanged,
    DpiChanged,
}

pub type Waker = Box<dyn Fn() + Send + Sync + 'static>;

/// Receiving end, owned by the UI thread.
pub struct UiQueue {
    tx: Sender<UiCommand>,
    rx: Receiver<UiCommand>,
    waker: Arc<OnceLock<Waker>>,
}

impl UiQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            waker: Arc::new(OnceLock::new()),
        }
    }

    /// Installs the waker called after every post. Only the first call has
    /// an effect; senders created earlier see it too.
    pub fn set_waker(&self, waker: Waker) {
        let _ = self.waker.set(waker);
    }

    pub fn sender(&self) -> UiSender {
        UiSender {
            tx: self.tx.clone(),
            waker: Arc::clone(&self.waker),
        }
    }

    /// Takes every pending command in arrival order, dropping repeats of a
    /// command already taken in this batch.
    pub fn drain(&self) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        for command in self.rx.try_iter() {
            if !commands.contains(&command) {
                commands.push(command);
            }
        }
        commands
    }
}

impl Default for UiQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe posting end.
#[derive(Clone)]
pub struct UiSender {
    tx: Sender<UiCommand>,
    waker: Arc<OnceLock<Waker>>,
}

impl UiSender {
    /// Queues `command` for the UI thread. Returns `false` once the queue is gone.
    pub fn post(&self, command: UiCommand) -> bool {
        if self.tx.send(command).is_err() {
            return false;
        }
        if let Some(wake) = self.waker.get() {
            wake();
        }
        true
    }
}
