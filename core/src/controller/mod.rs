//! Panel controller.
//!
//! Owns the config store, clipboard, foreground tracker, paste dispatcher and
//! layout engine, and runs every user or OS event to completion on the UI
//! thread. The host calls one method per event and applies the returned
//! [`Refresh`] to its widgets.

use crate::clipboard::{ClipboardBackend, ClipboardService, RetryPolicy};
use crate::dispatch::{UiCommand, UiQueue, UiSender};
use crate::foreground::ForegroundTracker;
use crate::layout::{DpiScale, LayoutEngine, PanelLayout, RebuildKind, Viewport, clamp_into};
use crate::model::{RootConfig, SnippetAddress};
use crate::paste::{DEFAULT_ACTIVATION_DELAY, PasteDispatcher};
use crate::platform::{PanelWindow, TextMeasurer, WindowHandle, WindowSystem};
use crate::settings::AppSettings;
use crate::status::{StatusLine, StatusTick, StatusTone};
use crate::store::ConfigProvider;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};


/// Runtime knobs, usually derived from [`AppSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub clipboard_retry: RetryPolicy,
    pub paste_enabled: bool,
    pub paste_delay: Duration,
    pub status_timeout: Duration,
}

impl ControllerOptions {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            paste_enabled: settings.paste.enabled,
            paste_delay: settings.paste.delay(),
            status_timeout: settings.general.status_timeout(),
            ..Self::default()
        }
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            clipboard_retry: RetryPolicy::default(),
            paste_enabled: true,
            paste_delay: DEFAULT_ACTIVATION_DELAY,
            status_timeout: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    NotLoaded,
    Loaded(RootConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTrigger {
    Startup,
    Manual,
}

/// What the host must update after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    /// The layout was rebuilt and widgets must be realized again.
    pub rebuild: Option<RebuildKind>,
    /// The status line changed and its timeout was restarted.
    pub status: bool,
    /// The window was moved back into the working area.
    pub moved: bool,
}

impl Refresh {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combines two refreshes; a full rebuild dominates an incremental one.
    pub fn merge(&mut self, other: Refresh) {
        self.rebuild = match (self.rebuild, other.rebuild) {
            (Some(RebuildKind::Full), _) | (_, Some(RebuildKind::Full)) => Some(RebuildKind::Full),
            (Some(kind), _) | (None, Some(kind)) => Some(kind),
            (None, None) => None,
        };
        self.status |= other.status;
        self.moved |= other.moved;
    }
}

pub struct Controller<S, C, W: WindowSystem, M> {
    store: S,
    clipboard: ClipboardService<C>,
    tracker: ForegroundTracker<W>,
    paste: PasteDispatcher<W>,
    measurer: M,
    engine: LayoutEngine,
    state: ControllerState,
    status: StatusLine,
    queue: UiQueue,
    paste_enabled: bool,
}

impl<S, C, W, M> Controller<S, C, W, M>
where
    S: ConfigProvider,
    C: ClipboardBackend,
    W: WindowSystem,
    M: TextMeasurer,
{
    /// Creates the controller and starts foreground tracking immediately.
    pub fn new(
        store: S,
        clipboard: C,
        windows: Arc<W>,
        measurer: M,
        options: ControllerOptions,
    ) -> Self {
        let tracker = ForegroundTracker::start(Arc::clone(&windows));
        let paste = PasteDispatcher::with_delay(windows, tracker.tracked(), options.paste_delay);
        Self {
            store,
            clipboard: ClipboardService::with_policy(clipboard, options.clipboard_retry),
            tracker,
            paste,
            measurer,
            engine: LayoutEngine::new(),
            state: ControllerState::NotLoaded,
            status: StatusLine::new(options.status_timeout),
            queue: UiQueue::new(),
            paste_enabled: options.paste_enabled,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> Option<&RootConfig> {
        match &self.state {
            ControllerState::Loaded(config) => Some(config),
            ControllerState::NotLoaded => None,
        }
    }

    pub fn layout(&self) -> Option<&PanelLayout> {
        self.engine.layout()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn last_external_window(&self) -> Option<WindowHandle> {
        self.tracker.last_external()
    }

    pub fn is_tracking_foreground(&self) -> bool {
        self.tracker.is_subscribed()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clipboard(&self) -> &C {
        self.clipboard.backend()
    }

    pub fn set_paste_enabled(&mut self, enabled: bool) {
        self.paste_enabled = enabled;
    }

    /// Thread-safe handle for posting [`UiCommand`]s.
    pub fn ui_sender(&self) -> UiSender {
        self.queue.sender()
    }

    pub fn ui_queue(&self) -> &UiQueue {
        &self.queue
    }

    /// First load after the window exists: clamp into view, then build.
    pub fn start<P: PanelWindow>(&mut self, panel: &P, now: Instant) -> Refresh {
        let mut refresh = Refresh {
            moved: ensure_visible(panel),
            ..Refresh::default()
        };
        refresh.merge(self.reload(ReloadTrigger::Startup, panel, now));
        refresh
    }

    /// Fetches the tree, rebuilds the layout (full on structural change,
    /// incremental otherwise) and reports the counts.
    pub fn reload<P: PanelWindow>(
        &mut self,
        trigger: ReloadTrigger,
        panel: &P,
        now: Instant,
    ) -> Refresh {
        let config = self.store.load();
        let groups = config.group_count();
        let snippets = config.snippet_count();

        let kind = self.engine.rebuild(
            &config,
            viewport_of(panel),
            DpiScale::from_dpi(panel.dpi()),
            false,
            &self.measurer,
        );
        self.state = ControllerState::Loaded(config);
        info!(groups, snippets, ?kind, ?trigger, "snippets loaded");

        let message = match trigger {
            ReloadTrigger::Startup => format!("Loaded {groups} groups / {snippets} snippets"),
            ReloadTrigger::Manual => {
                format!("Configuration reloaded: {groups} groups / {snippets} snippets")
            }
        };
        self.status.show(message, StatusTone::Info, now);

        Refresh {
            rebuild: Some(kind),
            status: true,
            moved: false,
        }
    }

    /// Copies the snippet, then pastes it into the last external window.
    ///
    /// Blocks for the paste activation delay.
    pub fn button_clicked(&mut self, address: SnippetAddress, now: Instant) -> Refresh {
        let Some(snippet) = self.config().and_then(|c| c.snippet(address)).cloned() else {
            warn!(?address, "click on unknown snippet");
            return Refresh::default();
        };
        let label = snippet.explicit_title().unwrap_or("untitled").to_string();

        if let Err(err) = self.clipboard.set_text(&snippet.content) {
            self.status
                .show(format!("Copy failed: {err}"), StatusTone::Error, now);
            return Refresh {
                status: true,
                ..Refresh::default()
            };
        }
        self.status
            .show(format!("Copied: {label}"), StatusTone::Info, now);

        if self.paste_enabled {
            let outcome = self.paste.paste_into_last_external();
            debug!(?outcome, "paste dispatched");
            if outcome.is_reportable_failure() {
                self.status.show(
                    format!("Copied: {label} (could not focus target window)"),
                    StatusTone::Warning,
                    now,
                );
            }
        }

        Refresh {
            status: true,
            ..Refresh::default()
        }
    }

    /// Resolution or monitor layout changed: clamp into view, then rebuild fully.
    pub fn display_settings_changed<P: PanelWindow>(&mut self, panel: &P) -> Refresh {
        let moved = ensure_visible(panel);
        let mut refresh = self.rebuild_full(panel);
        refresh.moved |= moved;
        refresh
    }

    /// Per-monitor DPI changed: rebuild fully, then clamp into view.
    pub fn dpi_changed<P: PanelWindow>(&mut self, panel: &P) -> Refresh {
        let mut refresh = self.rebuild_full(panel);
        refresh.moved |= ensure_visible(panel);
        refresh
    }

    /// Window resized: rebuild fully if the usable width or DPI changed.
    pub fn resized<P: PanelWindow>(&mut self, panel: &P) -> Refresh {
        let Some(layout) = self.engine.layout() else {
            return Refresh::default();
        };
        let scale = DpiScale::from_dpi(panel.dpi());
        let width = viewport_of(panel).effective_width(&layout.metrics);
        if width == layout.viewport_width && scale == layout.metrics.scale {
            return Refresh::default();
        }
        self.rebuild_full(panel)
    }

    /// Runs every command posted through [`Controller::ui_sender`].
    pub fn process_pending<P: PanelWindow>(&mut self, panel: &P, now: Instant) -> Refresh {
        let mut refresh = Refresh::default();
        for command in self.queue.drain() {
            debug!(?command, "ui command");
            let step = match command {
                UiCommand::Reload => self.reload(ReloadTrigger::Manual, panel, now),
                UiCommand::DisplaySettingsChanged => self.display_settings_changed(panel),
                UiCommand::DpiChanged => self.dpi_changed(panel),
            };
            refresh.merge(step);
        }
        refresh
    }

    /// Advances the status timeout.
    pub fn tick_status(&mut self, now: Instant) -> StatusTick {
        self.status.tick(now)
    }

    /// Releases OS subscriptions. Called when the window is closing.
    pub fn close(&mut self) {
        self.tracker.shutdown();
    }

    fn rebuild_full<P: PanelWindow>(&mut self, panel: &P) -> Refresh {
        let ControllerState::Loaded(config) = &self.state else {
            return Refresh::default();
        };
        let kind = self.engine.rebuild(
            config,
            viewport_of(panel),
            DpiScale::from_dpi(panel.dpi()),
            true,
            &self.measurer,
        );
        Refresh {
            rebuild: Some(kind),
            ..Refresh::default()
        }
    }
}

fn viewport_of<P: PanelWindow>(panel: &P) -> Viewport {
    Viewport::new(panel.viewport_width(), panel.client_width())
}

/// Moves the window back inside the working area if it strayed outside.
fn ensure_visible<P: PanelWindow>(panel: &P) -> bool {
    let Some(work_area) = panel.work_area() else {
        return false;
    };
    let bounds = panel.bounds();
    let origin = clamp_into(bounds, work_area);
    if origin == bounds.origin() {
        return false;
    }
    debug!(x = origin.x, y = origin.y, "moving window into working area");
    panel.move_to(origin);
    true
}
