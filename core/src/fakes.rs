//! In-memory stand-ins for the host capabilities, shared by unit tests.

use crate::clipboard::ClipboardBackend;
use crate::error::{ClipboardError, StoreError};
use crate::layout::{DpiScale, FontWeight, Point, Rect, Size};
use crate::model::RootConfig;
use crate::platform::{
    ForegroundListener, PanelWindow, ProcessId, TextMeasurer, WindowHandle, WindowSystem,
};
use crate::store::ConfigProvider;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const OWN_PID: ProcessId = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCall {
    IsWindowLive(WindowHandle),
    SetForegroundWindow(WindowHandle),
    SendPasteKeystroke,
}

type ListenerSlot = Arc<Mutex<Option<Arc<dyn Fn(WindowHandle) + Send + Sync>>>>;

#[derive(Default)]
struct WindowsState {
    windows: HashMap<WindowHandle, ProcessId>,
    foreground: Option<WindowHandle>,
    refuse_activation: bool,
    fail_keystrokes: bool,
    reject_subscriptions: bool,
    calls: Vec<WindowCall>,
}

#[derive(Default)]
pub struct FakeWindows {
    state: Mutex<WindowsState>,
    listener: ListenerSlot,
}

pub struct FakeSubscription {
    listener: ListenerSlot,
}

impl Drop for FakeSubscription {
    fn drop(&mut self) {
        *self.listener.lock().unwrap() = None;
    }
}

impl FakeWindows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_window(&self, window: WindowHandle, pid: ProcessId) {
        self.state.lock().unwrap().windows.insert(window, pid);
    }

    pub fn close_window(&self, window: WindowHandle) {
        let mut state = self.state.lock().unwrap();
        state.windows.remove(&window);
        if state.foreground == Some(window) {
            state.foreground = None;
        }
    }

    pub fn set_foreground(&self, window: Option<WindowHandle>) {
        self.state.lock().unwrap().foreground = window;
    }

    pub fn foreground(&self) -> Option<WindowHandle> {
        self.state.lock().unwrap().foreground
    }

    /// Simulates the OS notifying a foreground change.
    pub fn emit_foreground(&self, window: WindowHandle) {
        self.set_foreground(Some(window));
        let listener = self.listener.lock().unwrap().clone();
        if let Some(listener) = listener {
            listener(window);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.listener.lock().unwrap().is_some()
    }

    pub fn reject_subscriptions(&self) {
        self.state.lock().unwrap().reject_subscriptions = true;
    }

    pub fn refuse_activation(&self) {
        self.state.lock().unwrap().refuse_activation = true;
    }

    pub fn fail_keystrokes(&self) {
        self.state.lock().unwrap().fail_keystrokes = true;
    }

    pub fn calls(&self) -> Vec<WindowCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }
}

impl WindowSystem for FakeWindows {
    type Subscription = FakeSubscription;

    fn current_process_id(&self) -> ProcessId {
        OWN_PID
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        self.foreground()
    }

    fn set_foreground_window(&self, window: WindowHandle) -> bool {
        let mut state = self.state.lock().unwrap();
        state.calls.push(WindowCall::SetForegroundWindow(window));
        if state.refuse_activation || !state.windows.contains_key(&window) {
            return false;
        }
        state.foreground = Some(window);
        true
    }

    fn is_window_live(&self, window: WindowHandle) -> bool {
        let mut state = self.state.lock().unwrap();
        state.calls.push(WindowCall::IsWindowLive(window));
        state.windows.contains_key(&window)
    }

    fn owning_process_id(&self, window: WindowHandle) -> Option<ProcessId> {
        self.state.lock().unwrap().windows.get(&window).copied()
    }

    fn send_paste_keystroke(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.calls.push(WindowCall::SendPasteKeystroke);
        !state.fail_keystrokes
    }

    fn subscribe_foreground_changed(
        &self,
        listener: ForegroundListener,
    ) -> Option<FakeSubscription> {
        if self.state.lock().unwrap().reject_subscriptions {
            return None;
        }
        *self.listener.lock().unwrap() = Some(Arc::from(listener));
        Some(FakeSubscription {
            listener: Arc::clone(&self.listener),
        })
    }
}

/// Clipboard that fails a fixed number of times before accepting text.
#[derive(Debug, Default)]
pub struct FakeClipboard {
    failures_left: Cell<u32>,
    attempts: Cell<u32>,
    text: RefCell<Option<String>>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_times(failures: u32) -> Self {
        Self {
            failures_left: Cell::new(failures),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.get()
    }

    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }
}

impl ClipboardBackend for FakeClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.attempts.set(self.attempts.get() + 1);
        let failures = self.failures_left.get();
        if failures > 0 {
            self.failures_left.set(failures - 1);
            return Err(ClipboardError::Access("locked".to_string()));
        }
        *self.text.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Fixed-pitch text: 7 px per char, 15 px tall (16 bold), at 96 DPI.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeMeasurer;

pub const CHAR_WIDTH: i32 = 7;

impl TextMeasurer for FakeMeasurer {
    fn measure(&self, text: &str, weight: FontWeight, scale: DpiScale) -> Size {
        let chars = text.chars().count() as i32;
        let height = match weight {
            FontWeight::Regular => 15,
            FontWeight::Bold => 16,
        };
        Size::new(scale.scale(chars * CHAR_WIDTH), scale.scale(height))
    }
}

/// Window geometry the tests can change between events.
#[derive(Debug)]
pub struct FakePanel {
    pub dpi: Cell<u32>,
    pub viewport_width: Cell<i32>,
    pub client_width: Cell<i32>,
    pub bounds: Cell<Rect>,
    pub work_area: Cell<Option<Rect>>,
    pub moves: RefCell<Vec<Point>>,
}

impl FakePanel {
    pub fn new(viewport_width: i32) -> Self {
        Self {
            dpi: Cell::new(96),
            viewport_width: Cell::new(viewport_width),
            client_width: Cell::new(viewport_width + 20),
            bounds: Cell::new(Rect::new(100, 70, 280, 750)),
            work_area: Cell::new(Some(Rect::new(0, 0, 1920, 1040))),
            moves: RefCell::new(Vec::new()),
        }
    }
}

impl PanelWindow for FakePanel {
    fn dpi(&self) -> u32 {
        self.dpi.get()
    }

    fn viewport_width(&self) -> i32 {
        self.viewport_width.get()
    }

    fn client_width(&self) -> i32 {
        self.client_width.get()
    }

    fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    fn work_area(&self) -> Option<Rect> {
        self.work_area.get()
    }

    fn move_to(&self, origin: Point) {
        let mut bounds = self.bounds.get();
        bounds.x = origin.x;
        bounds.y = origin.y;
        self.bounds.set(bounds);
        self.moves.borrow_mut().push(origin);
    }
}

/// Config provider backed by memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: RefCell<RootConfig>,
    loads: Cell<u32>,
    saves: Cell<u32>,
}

impl MemoryStore {
    pub fn new(config: RootConfig) -> Self {
        Self {
            config: RefCell::new(config),
            ..Self::default()
        }
    }

    pub fn replace(&self, config: RootConfig) {
        *self.config.borrow_mut() = config;
    }

    pub fn loads(&self) -> u32 {
        self.loads.get()
    }

    pub fn saves(&self) -> u32 {
        self.saves.get()
    }
}

impl ConfigProvider for MemoryStore {
    fn load(&self) -> RootConfig {
        self.loads.set(self.loads.get() + 1);
        self.config.borrow().clone()
    }

    fn save(&self, config: &RootConfig) -> Result<(), StoreError> {
        self.saves.set(self.saves.get() + 1);
        *self.config.borrow_mut() = config.clone();
        Ok(())
    }
}
