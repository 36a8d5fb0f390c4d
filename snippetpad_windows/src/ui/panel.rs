//! Realizes a [`PanelLayout`] as native child windows of the scroll panel.
//!
//! Group frames are `BS_GROUPBOX` buttons with a separate bold label for the
//! title. Every child is positioned in content coordinates minus the
//! current scroll offset.

use crate::platform::text::UiFonts;
use crate::ui::theme::{ID_FIRST_SNIPPET, SCROLL_LINE};
use crate::ui::{create_child, place, set_font, set_text};
use snippetpad_core::layout::{
    ContainerId, DpiScale, FontWeight, GroupBox, PanelLayout, RebuildKind, Rect,
};
use snippetpad_core::model::SnippetAddress;
use std::collections::HashMap;
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::InvalidateRect;
use windows::Win32::UI::Controls::{
    TOOLTIPS_CLASSW, TTF_IDISHWND, TTF_SUBCLASS, TTM_ADDTOOLW, TTM_DELTOOLW,
    TTM_SETMAXTIPWIDTH, TTS_ALWAYSTIP, TTS_NOPREFIX, TTTOOLINFOW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    BS_GROUPBOX, BS_PUSHBUTTON, CreateWindowExW, DestroyWindow, GetClientRect, GetScrollInfo,
    SB_BOTTOM, SB_LINEDOWN, SB_LINEUP, SB_PAGEDOWN, SB_PAGEUP, SB_THUMBPOSITION, SB_THUMBTRACK,
    SB_TOP, SB_VERT, SCROLLBAR_COMMAND, SCROLLINFO, SIF_DISABLENOSCROLL, SIF_PAGE, SIF_POS,
    SIF_RANGE, SIF_TRACKPOS, SS_LEFTNOWORDWRAP, SS_NOPREFIX, SendMessageW, SetScrollInfo,
    WINDOW_STYLE, WS_EX_TOPMOST, WS_POPUP, WS_TABSTOP,
};
use windows_core::{PWSTR, Result};
use windows_strings::w;

/// Tooltip wrap width at 96 DPI.
const TOOLTIP_WIDTH: i32 = 320;

struct RealizedGroup {
    id: ContainerId,
    frame: HWND,
    title: HWND,
    buttons: Vec<HWND>,
}

pub struct PanelWidgets {
    scroll: HWND,
    tooltip: Option<HWND>,
    groups: Vec<RealizedGroup>,
    /// Every child with its bounds in content coordinates.
    placements: Vec<(HWND, Rect)>,
    commands: HashMap<u16, SnippetAddress>,
    fonts: UiFonts,
    scroll_pos: i32,
    content_height: i32,
}

impl PanelWidgets {
    pub fn new(scroll: HWND, scale: DpiScale) -> Self {
        Self {
            scroll,
            tooltip: create_tooltip(scroll, scale),
            groups: Vec::new(),
            placements: Vec::new(),
            commands: HashMap::new(),
            fonts: UiFonts::new(scale),
            scroll_pos: 0,
            content_height: 0,
        }
    }

    pub fn scroll_hwnd(&self) -> HWND {
        self.scroll
    }

    /// Snippet addressed by a button's control ID.
    pub fn address_for(&self, command_id: u16) -> Option<SnippetAddress> {
        self.commands.get(&command_id).copied()
    }

    /// Brings the native widgets in line with `layout`.
    ///
    /// On error every container is destroyed, so no command ID or placement
    /// refers to a control that is gone.
    pub fn realize(&mut self, layout: &PanelLayout, kind: RebuildKind) -> Result<()> {
        let reusable = kind == RebuildKind::Incremental
            && self.groups.len() == layout.groups.len()
            && self.groups.iter().zip(&layout.groups).all(|(r, g)| r.id == g.id);

        if !reusable {
            self.clear();
        }
        let scale = layout.metrics.scale;
        let groups = &self.groups;
        let rescaled = self.fonts.rescale(scale, |fonts| {
            for group in groups {
                set_font(group.frame, fonts.get(FontWeight::Regular));
                set_font(group.title, fonts.get(FontWeight::Bold));
            }
        });
        if rescaled && let Some(tooltip) = self.tooltip {
            set_tooltip_width(tooltip, scale);
        }

        if let Err(err) = self.populate(layout, reusable) {
            self.clear();
            self.content_height = 0;
            self.viewport_changed();
            return Err(err);
        }

        tracing::debug!(
            ?kind,
            reused = reusable,
            children = self.placements.len(),
            "panel widgets realized"
        );
        self.viewport_changed();
        Ok(())
    }

    fn populate(&mut self, layout: &PanelLayout, reusable: bool) -> Result<()> {
        let mut next_command = ID_FIRST_SNIPPET;
        self.commands.clear();
        self.placements.clear();

        if reusable {
            for (index, group) in layout.groups.iter().enumerate() {
                self.destroy_buttons(index);
                set_text(self.groups[index].title, &group.title);
                self.create_buttons(index, group, &mut next_command)?;
            }
        } else {
            for group in &layout.groups {
                self.create_group(group, &mut next_command)?;
            }
        }

        self.placements = self
            .groups
            .iter()
            .zip(&layout.groups)
            .flat_map(|(realized, group)| {
                let mut placed = vec![
                    (realized.frame, group.bounds),
                    (realized.title, group.absolute_title_bounds()),
                ];
                placed.extend(
                    realized
                        .buttons
                        .iter()
                        .zip(&group.panel.buttons)
                        .map(|(hwnd, button)| (*hwnd, group.absolute_button_bounds(button))),
                );
                placed
            })
            .collect();
        self.content_height = layout.content_height;
        Ok(())
    }

    /// Re-applies the scroll range after the scroll panel was resized.
    pub fn viewport_changed(&mut self) {
        let page = self.viewport_height();
        self.scroll_pos = self.scroll_pos.clamp(0, (self.content_height - page).max(0));

        let info = SCROLLINFO {
            cbSize: size_of::<SCROLLINFO>() as u32,
            // Keep the bar visible so its width never feeds back into the layout.
            fMask: SIF_RANGE | SIF_PAGE | SIF_POS | SIF_DISABLENOSCROLL,
            nMin: 0,
            nMax: (self.content_height - 1).max(0),
            nPage: page.max(0) as u32,
            nPos: self.scroll_pos,
            nTrackPos: 0,
        };
        unsafe { SetScrollInfo(self.scroll, SB_VERT, &info, true) };
        self.reposition();
    }

    /// Handles a `WM_VSCROLL` request code.
    pub fn on_vscroll(&mut self, request: u32) {
        let page = self.viewport_height();
        let target = match SCROLLBAR_COMMAND(request as i32) {
            SB_LINEUP => self.scroll_pos - SCROLL_LINE,
            SB_LINEDOWN => self.scroll_pos + SCROLL_LINE,
            SB_PAGEUP => self.scroll_pos - page,
            SB_PAGEDOWN => self.scroll_pos + page,
            SB_TOP => 0,
            SB_BOTTOM => self.content_height,
            SB_THUMBTRACK | SB_THUMBPOSITION => self.track_position(),
            _ => return,
        };
        self.scroll_to(target);
    }

    /// Handles a `WM_MOUSEWHEEL` delta; positive scrolls up.
    pub fn on_wheel(&mut self, delta: i16) {
        let notches = i32::from(delta) / 120;
        self.scroll_to(self.scroll_pos - notches * SCROLL_LINE * 3);
    }

    fn scroll_to(&mut self, target: i32) {
        let max = (self.content_height - self.viewport_height()).max(0);
        let target = target.clamp(0, max);
        if target == self.scroll_pos {
            return;
        }
        self.scroll_pos = target;
        self.viewport_changed();
    }

    fn track_position(&self) -> i32 {
        let mut info = SCROLLINFO {
            cbSize: size_of::<SCROLLINFO>() as u32,
            fMask: SIF_TRACKPOS,
            ..Default::default()
        };
        match unsafe { GetScrollInfo(self.scroll, SB_VERT, &mut info) } {
            Ok(()) => info.nTrackPos,
            Err(_) => self.scroll_pos,
        }
    }

    fn viewport_height(&self) -> i32 {
        let mut rect = RECT::default();
        let _ = unsafe { GetClientRect(self.scroll, &mut rect) };
        rect.bottom - rect.top
    }

    fn reposition(&self) {
        for (hwnd, bounds) in &self.placements {
            place(
                *hwnd,
                Rect::new(bounds.x, bounds.y - self.scroll_pos, bounds.width, bounds.height),
            );
        }
        let _ = unsafe { InvalidateRect(Some(self.scroll), None, true) };
    }

    /// Creates a container and its buttons. Every control is tracked in
    /// `groups` as soon as it exists.
    fn create_group(&mut self, group: &GroupBox, next_command: &mut u16) -> Result<()> {
        let frame = create_child(
            self.scroll,
            w!("BUTTON"),
            "",
            WINDOW_STYLE(BS_GROUPBOX as u32),
            group.bounds,
            0,
            self.fonts.get(FontWeight::Regular),
        )?;
        let title = match create_child(
            self.scroll,
            w!("STATIC"),
            &group.title,
            WINDOW_STYLE(SS_LEFTNOWORDWRAP.0 | SS_NOPREFIX.0),
            group.absolute_title_bounds(),
            0,
            self.fonts.get(FontWeight::Bold),
        ) {
            Ok(title) => title,
            Err(err) => {
                let _ = unsafe { DestroyWindow(frame) };
                return Err(err);
            }
        };
        self.groups.push(RealizedGroup {
            id: group.id,
            frame,
            title,
            buttons: Vec::with_capacity(group.panel.buttons.len()),
        });
        self.create_buttons(self.groups.len() - 1, group, next_command)
    }

    fn create_buttons(
        &mut self,
        index: usize,
        group: &GroupBox,
        next_command: &mut u16,
    ) -> Result<()> {
        for button in &group.panel.buttons {
            let id = *next_command;
            if id == u16::MAX {
                tracing::warn!("out of control IDs, remaining snippets not shown");
                break;
            }
            *next_command += 1;

            let hwnd = create_child(
                self.scroll,
                w!("BUTTON"),
                &button.text,
                WS_TABSTOP | WINDOW_STYLE(BS_PUSHBUTTON as u32),
                group.absolute_button_bounds(button),
                id,
                self.fonts.get(FontWeight::Regular),
            )?;
            self.groups[index].buttons.push(hwnd);
            self.commands.insert(id, button.address);
            if let (Some(tooltip), Some(text)) = (self.tooltip, button.tooltip.as_deref()) {
                add_tool(tooltip, self.scroll, hwnd, text);
            }
        }
        Ok(())
    }

    fn destroy_buttons(&mut self, index: usize) {
        let buttons = std::mem::take(&mut self.groups[index].buttons);
        for hwnd in buttons {
            if let Some(tooltip) = self.tooltip {
                remove_tool(tooltip, self.scroll, hwnd);
            }
            let _ = unsafe { DestroyWindow(hwnd) };
        }
    }

    /// Destroys every realized container.
    pub fn clear(&mut self) {
        for index in 0..self.groups.len() {
            self.destroy_buttons(index);
        }
        for group in self.groups.drain(..) {
            unsafe {
                let _ = DestroyWindow(group.title);
                let _ = DestroyWindow(group.frame);
            }
        }
        self.placements.clear();
        self.commands.clear();
    }
}

fn create_tooltip(owner: HWND, scale: DpiScale) -> Option<HWND> {
    let created = unsafe {
        CreateWindowExW(
            WS_EX_TOPMOST,
            TOOLTIPS_CLASSW,
            None,
            WS_POPUP | WINDOW_STYLE(TTS_ALWAYSTIP | TTS_NOPREFIX),
            0,
            0,
            0,
            0,
            Some(owner),
            None,
            None,
            None,
        )
    };
    match created {
        Ok(tooltip) => {
            set_tooltip_width(tooltip, scale);
            Some(tooltip)
        }
        Err(err) => {
            tracing::warn!(error = %err, "tooltip control unavailable");
            None
        }
    }
}

fn set_tooltip_width(tooltip: HWND, scale: DpiScale) {
    let _ = unsafe {
        SendMessageW(
            tooltip,
            TTM_SETMAXTIPWIDTH,
            None,
            Some(LPARAM(scale.scale(TOOLTIP_WIDTH) as isize)),
        )
    };
}

fn tool_info(owner: HWND, tool: HWND, text: PWSTR) -> TTTOOLINFOW {
    TTTOOLINFOW {
        cbSize: size_of::<TTTOOLINFOW>() as u32,
        uFlags: TTF_IDISHWND | TTF_SUBCLASS,
        hwnd: owner,
        uId: tool.0 as usize,
        lpszText: text,
        ..Default::default()
    }
}

fn add_tool(tooltip: HWND, owner: HWND, tool: HWND, text: &str) {
    // The control copies the text.
    let mut wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
    let info = tool_info(owner, tool, PWSTR(wide.as_mut_ptr()));
    let _ = unsafe {
        SendMessageW(
            tooltip,
            TTM_ADDTOOLW,
            None,
            Some(LPARAM(&info as *const TTTOOLINFOW as isize)),
        )
    };
}

fn remove_tool(tooltip: HWND, owner: HWND, tool: HWND) {
    let info = tool_info(owner, tool, PWSTR::null());
    let _ = unsafe {
        SendMessageW(
            tooltip,
            TTM_DELTOOLW,
            None,
            Some(LPARAM(&info as *const TTTOOLINFOW as isize)),
        )
    };
}
