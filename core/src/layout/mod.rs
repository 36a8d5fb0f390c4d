//! Layout engine for the snippet panel.
//!
//! Turns a [`RootConfig`] into a [`PanelLayout`]: one bordered container per
//! group, stacked top to bottom inside the scrollable viewport, each holding a
//! wrapping panel of snippet buttons. Sizes come from DPI-scaled
//! [`Metrics`] and from text measured by the host's [`TextMeasurer`].
//!
//! A rebuild is either *full* (containers are replaced) or *incremental*
//! (containers are kept, only their titles and buttons are regenerated). A
//! new layout is always built off to the side and swapped in whole, so
//! readers never observe a half-built tree.

mod flow;
mod geometry;
mod metrics;
mod title;

#[cfg(test)]
mod tests;

pub use flow::{Flow, wrap};
pub use geometry::{Point, Rect, Size, clamp_into};
pub use metrics::{DpiScale, Metrics, REFERENCE_DPI};
pub use title::{
    ELLIPSIS, PREVIEW_CHARS, TITLE_FALLBACK_CHARS, UNNAMED_GROUP, UNTITLED, display_title,
    group_title, hover_preview, truncate_with_ellipsis,
};

use crate::model::{RootConfig, SnippetAddress, SnippetGroup};
use crate::platform::TextMeasurer;
use tracing::debug;

/// Font used for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Stable identity of a group container across incremental rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u32);

impl ContainerId {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// How the previous layout was turned into the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildKind {
    /// Every container was created anew.
    Full,
    /// Containers were reused; titles and buttons were regenerated.
    Incremental,
}

/// Widths the layout is fitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Client width of the scrollable panel.
    pub width: i32,
    /// Client width of the owning window, used when `width` is degenerate.
    pub client_width: i32,
}

impl Viewport {
    pub fn new(width: i32, client_width: i32) -> Self {
        Self {
            width,
            client_width,
        }
    }

    /// The usable width; falls back to the window client area minus an
    /// inset when the panel reports zero or negative width.
    pub fn effective_width(&self, metrics: &Metrics) -> i32 {
        if self.width > 0 {
            return self.width;
        }
        let fallback = self.client_width - metrics.viewport_fallback_inset;
        debug!(
            width = self.width,
            fallback, "viewport width degenerate, using window client area"
        );
        fallback
    }
}

/// A snippet button inside a group's button panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetButton {
    pub address: SnippetAddress,
    pub text: String,
    pub tooltip: Option<String>,
    /// Relative to the owning [`ButtonPanel`].
    pub bounds: Rect,
}

/// The wrapping panel holding a group's buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPanel {
    /// Relative to the owning [`GroupBox`].
    pub bounds: Rect,
    pub buttons: Vec<SnippetButton>,
}

/// A titled, bordered container for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBox {
    pub id: ContainerId,
    pub title: String,
    /// Relative to the scrollable content area.
    pub bounds: Rect,
    /// Relative to this container.
    pub title_bounds: Rect,
    pub panel: ButtonPanel,
}

impl GroupBox {
    /// Bounds of `button` in scrollable-content coordinates.
    pub fn absolute_button_bounds(&self, button: &SnippetButton) -> Rect {
        button
            .bounds
            .offset(self.panel.bounds.origin())
            .offset(self.bounds.origin())
    }

    /// Bounds of the title label in scrollable-content coordinates.
    pub fn absolute_title_bounds(&self) -> Rect {
        self.title_bounds.offset(self.bounds.origin())
    }
}

/// Fully laid-out panel contents.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub groups: Vec<GroupBox>,
    /// Height of the scrollable content.
    pub content_height: i32,
    pub viewport_width: i32,
    pub metrics: Metrics,
    group_names: Vec<String>,
    next_id: u32,
}

impl PanelLayout {
    /// Group names this layout was built from, in order.
    pub fn group_names(&self) -> &[String] {
        &self.group_names
    }

    pub fn button_count(&self) -> usize {
        self.groups.iter().map(|g| g.panel.buttons.len()).sum()
    }

    pub fn button(&self, address: SnippetAddress) -> Option<&SnippetButton> {
        self.groups
            .get(address.group)?
            .panel
            .buttons
            .get(address.snippet)
    }

    pub fn container_ids(&self) -> Vec<ContainerId> {
        self.groups.iter().map(|g| g.id).collect()
    }
}

/// True if `config` cannot reuse the containers of `previous`.
pub fn is_structural_change(
    config: &RootConfig,
    previous: Option<&PanelLayout>,
    force_full: bool,
) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    if force_full || previous.groups.len() != config.groups.len() {
        return true;
    }
    config
        .groups
        .iter()
        .zip(previous.group_names())
        .any(|(group, name)| group.name != *name)
}

/// Builds the layout for `config`, reusing the containers of `previous`
/// when the group-name sequence is unchanged and `force_full` is false.
pub fn rebuild<M: TextMeasurer>(
    config: &RootConfig,
    viewport: Viewport,
    scale: DpiScale,
    previous: Option<&PanelLayout>,
    force_full: bool,
    measurer: &M,
) -> (PanelLayout, RebuildKind) {
    match previous {
        Some(previous) if !is_structural_change(config, Some(previous), force_full) => (
            rebuild_incremental(config, previous, measurer),
            RebuildKind::Incremental,
        ),
        _ => {
            let first_id = previous.map_or(0, |p| p.next_id);
            (
                rebuild_full(config, viewport, scale, first_id, measurer),
                RebuildKind::Full,
            )
        }
    }
}

fn rebuild_full<M: TextMeasurer>(
    config: &RootConfig,
    viewport: Viewport,
    scale: DpiScale,
    first_id: u32,
    measurer: &M,
) -> PanelLayout {
    let metrics = Metrics::scaled(scale);
    let viewport_width = viewport.effective_width(&metrics);
    let group_width = metrics.group_width(viewport_width);

    let mut next_id = first_id;
    let groups = config
        .groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let id = ContainerId(next_id);
            next_id += 1;
            build_group(id, index, group, group_width, &metrics, measurer)
        })
        .collect();

    let mut layout = PanelLayout {
        groups,
        content_height: 0,
        viewport_width,
        metrics,
        group_names: config.group_names(),
        next_id,
    };
    stack_groups(&mut layout);
    debug!(
        groups = layout.groups.len(),
        buttons = layout.button_count(),
        viewport_width,
        "full layout rebuild"
    );
    layout
}

fn rebuild_incremental<M: TextMeasurer>(
    config: &RootConfig,
    previous: &PanelLayout,
    measurer: &M,
) -> PanelLayout {
    let metrics = previous.metrics;
    let groups = config
        .groups
        .iter()
        .zip(&previous.groups)
        .enumerate()
        .map(|(index, (group, existing))| {
            build_group(
                existing.id,
                index,
                group,
                existing.bounds.width,
                &metrics,
                measurer,
            )
        })
        .collect();

    let mut layout = PanelLayout {
        groups,
        content_height: 0,
        viewport_width: previous.viewport_width,
        metrics,
        group_names: config.group_names(),
        next_id: previous.next_id,
    };
    stack_groups(&mut layout);
    debug!(
        groups = layout.groups.len(),
        buttons = layout.button_count(),
        "incremental layout rebuild"
    );
    layout
}

fn build_group<M: TextMeasurer>(
    id: ContainerId,
    index: usize,
    group: &SnippetGroup,
    group_width: i32,
    metrics: &Metrics,
    measurer: &M,
) -> GroupBox {
    let title = group_title(group);
    let title_size = measurer.measure(&title, FontWeight::Bold, metrics.scale);
    let title_bounds = Rect::new(
        metrics.title_inset,
        metrics.title_inset,
        title_size.width,
        title_size.height,
    );

    let inner_width = metrics.inner_width(group_width);
    let (buttons, panel_height) = populate_buttons(index, group, inner_width, metrics, measurer);
    let panel_bounds = Rect::new(
        metrics.title_inset,
        title_bounds.bottom() + metrics.title_inset,
        inner_width,
        panel_height,
    );

    // Enclose the panel as actually laid out, plus padding.
    let height = panel_bounds.bottom() + metrics.group_inner_pad + metrics.title_inset;

    GroupBox {
        id,
        title,
        bounds: Rect::new(0, 0, group_width, height),
        title_bounds,
        panel: ButtonPanel {
            bounds: panel_bounds,
            buttons,
        },
    }
}

/// Shared by both rebuild paths: one button per snippet, flowed into rows
/// of `inner_width`. Returns the buttons and the resulting panel height.
fn populate_buttons<M: TextMeasurer>(
    group_index: usize,
    group: &SnippetGroup,
    inner_width: i32,
    metrics: &Metrics,
    measurer: &M,
) -> (Vec<SnippetButton>, i32) {
    let captions: Vec<(String, Size)> = group
        .snippets
        .iter()
        .map(|snippet| {
            let text = display_title(snippet);
            let measured = measurer.measure(&text, FontWeight::Regular, metrics.scale);
            let width = metrics.button_width(measured.width, inner_width);
            (text, Size::new(width, metrics.button_height))
        })
        .collect();

    let sizes: Vec<Size> = captions.iter().map(|(_, size)| *size).collect();
    let flow = wrap(&sizes, metrics.button_margin, inner_width);

    let buttons = group
        .snippets
        .iter()
        .zip(captions)
        .zip(flow.bounds)
        .enumerate()
        .map(|(snippet_index, ((snippet, (text, _)), bounds))| SnippetButton {
            address: SnippetAddress::new(group_index, snippet_index),
            text,
            tooltip: hover_preview(snippet),
            bounds,
        })
        .collect();

    (buttons, flow.height)
}

/// Positions containers top to bottom, each surrounded by the outer margin.
fn stack_groups(layout: &mut PanelLayout) {
    let margin = layout.metrics.group_outer_margin;
    let mut cursor = 0;
    for group in &mut layout.groups {
        group.bounds.x = margin;
        group.bounds.y = cursor + margin;
        cursor = group.bounds.bottom() + margin;
    }
    layout.content_height = cursor;
}

/// Owns the current layout and swaps in each rebuilt one whole.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    current: Option<PanelLayout>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self) -> Option<&PanelLayout> {
        self.current.as_ref()
    }

    pub fn rebuild<M: TextMeasurer>(
        &mut self,
        config: &RootConfig,
        viewport: Viewport,
        scale: DpiScale,
        force_full: bool,
        measurer: &M,
    ) -> RebuildKind {
        let (layout, kind) = rebuild(
            config,
            viewport,
            scale,
            self.current.as_ref(),
            force_full,
            measurer,
        );
        self.current = Some(layout);
        kind
    }
}
