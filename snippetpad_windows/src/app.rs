//! Application coordinator.

use crate::platform::clipboard::Win32Clipboard;
use crate::platform::foreground::Win32WindowSystem;
use crate::platform::hotkey;
use crate::platform::single_instance::InstanceKey;
use crate::platform::text::GdiTextMeasurer;
use crate::platform::wm;
use crate::storage::{self, DataPaths};
use crate::ui::panel::PanelWidgets;
use crate::ui::theme::{PANEL_LEFT, PANEL_TOP, STATUS_TIMER_ID, status_color};
use crate::ui::top_bar::TopBar;
use crate::ui::place;
use snippetpad_core::controller::{Controller, ControllerOptions, ReloadTrigger, Refresh};
use snippetpad_core::dispatch::{UiCommand, UiSender};
use snippetpad_core::layout::{DpiScale, Point, Rect};
use snippetpad_core::platform::PanelWindow;
use snippetpad_core::settings::AppSettings;
use snippetpad_core::status::StatusTick;
use snippetpad_core::store::JsonConfigStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, InvalidateRect, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromWindow,
};
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    GetClientRect, GetWindowRect, HWND_NOTOPMOST, HWND_TOPMOST, IsWindowVisible, KillTimer,
    PostMessageW, SW_HIDE, SW_SHOW, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
    SetForegroundWindow, SetTimer, SetWindowPos, ShowWindow,
};

pub type PanelController =
    Controller<JsonConfigStore, Win32Clipboard, Win32WindowSystem, GdiTextMeasurer>;

/// Launcher window geometry as the controller sees it.
#[derive(Clone, Copy)]
pub struct Win32Panel {
    hwnd: HWND,
    scroll: HWND,
}

fn client_rect(hwnd: HWND) -> RECT {
    let mut rect = RECT::default();
    let _ = unsafe { GetClientRect(hwnd, &mut rect) };
    rect
}

fn to_rect(rect: RECT) -> Rect {
    Rect::new(
        rect.left,
        rect.top,
        rect.right - rect.left,
        rect.bottom - rect.top,
    )
}

impl PanelWindow for Win32Panel {
    fn dpi(&self) -> u32 {
        unsafe { GetDpiForWindow(self.hwnd) }
    }

    fn viewport_width(&self) -> i32 {
        to_rect(client_rect(self.scroll)).width
    }

    fn client_width(&self) -> i32 {
        to_rect(client_rect(self.hwnd)).width
    }

    fn bounds(&self) -> Rect {
        let mut rect = RECT::default();
        let _ = unsafe { GetWindowRect(self.hwnd, &mut rect) };
        to_rect(rect)
    }

    fn work_area(&self) -> Option<Rect> {
        let monitor = unsafe { MonitorFromWindow(self.hwnd, MONITOR_DEFAULTTONEAREST) };
        let mut info = MONITORINFO {
            cbSize: size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        let found = unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool();
        found.then(|| to_rect(info.rcWork))
    }

    fn move_to(&self, origin: Point) {
        let _ = unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                origin.x,
                origin.y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        };
    }
}

/// Application coordinator, owns the controller and the native widgets.
pub struct App {
    hwnd: HWND,
    controller: PanelController,
    sender: UiSender,
    top_bar: TopBar,
    widgets: PanelWidgets,
    paths: DataPaths,
    settings: AppSettings,
    hotkey_registered: bool,
}

impl App {
    /// Creates the App for an already created window and its child widgets.
    pub fn new(
        hwnd: HWND,
        top_bar: TopBar,
        widgets: PanelWidgets,
        paths: DataPaths,
        settings: AppSettings,
    ) -> Self {
        let controller = Controller::new(
            JsonConfigStore::new(&paths.snippets),
            Win32Clipboard::new(hwnd),
            Arc::new(Win32WindowSystem),
            GdiTextMeasurer::new(hwnd),
            ControllerOptions::from_settings(&settings),
        );

        // HWND is not Send; the waker only needs the raw value.
        let target = hwnd.0 as isize;
        controller.ui_queue().set_waker(Box::new(move || {
            let _ = unsafe {
                PostMessageW(
                    Some(HWND(target as *mut _)),
                    wm::PROCESS_UI_COMMANDS,
                    WPARAM(0),
                    LPARAM(0),
                )
            };
        }));
        let sender = controller.ui_sender();

        let hotkey_registered =
            hotkey::register_toggle_hotkey(hwnd, &settings.shortcuts.toggle_panel);

        Self {
            hwnd,
            controller,
            sender,
            top_bar,
            widgets,
            paths,
            settings,
            hotkey_registered,
        }
    }

    pub fn panel(&self) -> Win32Panel {
        Win32Panel {
            hwnd: self.hwnd,
            scroll: self.widgets.scroll_hwnd(),
        }
    }

    pub fn start(&mut self) {
        self.layout_chrome();
        let panel = self.panel();
        let refresh = self.controller.start(&panel, Instant::now());
        self.apply(refresh);
    }

    /// Queues a command for the UI thread; safe from any context.
    pub fn post(&self, command: UiCommand) {
        if !self.sender.post(command) {
            tracing::warn!(?command, "ui queue closed");
        }
    }

    pub fn process_pending(&mut self) {
        let panel = self.panel();
        let refresh = self.controller.process_pending(&panel, Instant::now());
        self.apply(refresh);
    }

    pub fn reload(&mut self) {
        let panel = self.panel();
        let refresh = self
            .controller
            .reload(ReloadTrigger::Manual, &panel, Instant::now());
        self.apply(refresh);
    }

    /// Routes a control ID from a snippet button. Returns `false` for other IDs.
    pub fn snippet_clicked(&mut self, command_id: u16) -> bool {
        let Some(address) = self.widgets.address_for(command_id) else {
            return false;
        };
        let refresh = self.controller.button_clicked(address, Instant::now());
        self.apply(refresh);
        true
    }

    /// Applies the pin checkbox to the window's topmost state.
    pub fn pin_toggled(&mut self) {
        let pinned = self.top_bar.is_pinned();
        self.settings.general.always_on_top = pinned;
        set_topmost(self.hwnd, pinned);
        tracing::info!(pinned, "always on top changed");
    }

    /// Lays out the fixed children after the main window was resized.
    pub fn layout_chrome(&mut self) {
        let scale = DpiScale::from_dpi(self.panel().dpi());
        let client = to_rect(client_rect(self.hwnd));
        self.top_bar.layout(client.width, scale);

        let left = scale.scale(PANEL_LEFT);
        let top = scale.scale(PANEL_TOP);
        place(
            self.widgets.scroll_hwnd(),
            Rect::new(
                left,
                top,
                (client.width - left).max(0),
                (client.height - top).max(0),
            ),
        );
    }

    /// The scroll panel changed size.
    pub fn panel_resized(&mut self) {
        let panel = self.panel();
        let refresh = self.controller.resized(&panel);
        if refresh.is_empty() {
            self.widgets.viewport_changed();
        }
        self.apply(refresh);
    }

    pub fn scroll(&mut self, request: u32) {
        self.widgets.on_vscroll(request);
    }

    pub fn wheel(&mut self, delta: i16) {
        self.widgets.on_wheel(delta);
    }

    pub fn on_status_timer(&mut self) {
        match self.controller.tick_status(Instant::now()) {
            StatusTick::Pending(remaining) => self.arm_status_timer(remaining),
            StatusTick::Cleared => {
                self.top_bar.set_status("");
                self.kill_status_timer();
            }
            StatusTick::Idle => self.kill_status_timer(),
        }
    }

    /// Text color for a static control, if it is the status label.
    pub fn static_color(&self, control: HWND) -> Option<COLORREF> {
        (control == self.top_bar.status).then(|| status_color(self.controller.status().tone()))
    }

    pub fn toggle_visibility(&self) {
        unsafe {
            if IsWindowVisible(self.hwnd).as_bool() {
                let _ = ShowWindow(self.hwnd, SW_HIDE);
            } else {
                self.show_and_focus();
            }
        }
    }

    pub fn instance_key(&self) -> InstanceKey {
        InstanceKey::for_dir(&self.paths.dir)
    }

    pub fn show_and_focus(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOW);
            let _ = SetForegroundWindow(self.hwnd);
        }
    }

    /// Saves the window placement and pin state, then releases OS hooks.
    pub fn shutdown(&mut self) {
        let panel = self.panel();
        let bounds = panel.bounds();
        let scale = DpiScale::from_dpi(panel.dpi());
        self.settings.window.x = bounds.x;
        self.settings.window.y = bounds.y;
        self.settings.window.width = scale.unscale(bounds.width);
        self.settings.window.height = scale.unscale(bounds.height);
        storage::save_settings(&self.paths, &self.settings);

        if self.hotkey_registered {
            hotkey::unregister_toggle_hotkey(self.hwnd);
            self.hotkey_registered = false;
        }
        self.kill_status_timer();
        self.widgets.clear();
        self.controller.close();
        tracing::info!("shut down");
    }

    fn apply(&mut self, refresh: Refresh) {
        if let Some(kind) = refresh.rebuild
            && let Some(layout) = self.controller.layout()
            && let Err(err) = self.widgets.realize(layout, kind)
        {
            tracing::error!(error = %err, "failed to create panel widgets");
        }

        if refresh.status {
            let status = self.controller.status();
            self.top_bar.set_status(status.text());
            // Repaint so WM_CTLCOLORSTATIC picks up the new tone.
            let _ = unsafe { InvalidateRect(Some(self.top_bar.status), None, true) };
            self.arm_status_timer(status.timeout());
        }
    }

    fn arm_status_timer(&self, after: Duration) {
        let millis = after.as_millis().clamp(1, u128::from(u32::MAX)) as u32;
        unsafe { SetTimer(Some(self.hwnd), STATUS_TIMER_ID, millis, None) };
    }

    fn kill_status_timer(&self) {
        let _ = unsafe { KillTimer(Some(self.hwnd), STATUS_TIMER_ID) };
    }
}

pub fn set_topmost(hwnd: HWND, topmost: bool) {
    let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
    let _ = unsafe {
        SetWindowPos(
            hwnd,
            Some(insert_after),
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
        )
    };
}
