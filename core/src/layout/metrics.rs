//! Nominal pixel constants and their DPI-scaled values.

/// DPI at which the nominal constants are expressed.
pub const REFERENCE_DPI: u32 = 96;

const BUTTON_HEIGHT: i32 = 28;
const BUTTON_H_PAD: i32 = 16;
const BUTTON_MARGIN: i32 = 3;
const MIN_BUTTON_WIDTH: i32 = 50;
const GROUP_OUTER_MARGIN: i32 = 6;
const GROUP_INNER_PAD: i32 = 6;
const GROUP_MIN_WIDTH: i32 = 200;
const GROUP_WIDTH_SHRINK: i32 = 25;
const INNER_FUDGE: i32 = 8;
const INNER_MIN_WIDTH: i32 = 100;
const TITLE_INSET: i32 = 4;
const VIEWPORT_FALLBACK_INSET: i32 = 20;

/// Ratio of the current DPI to [`REFERENCE_DPI`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpiScale(f32);

impl DpiScale {
    pub const IDENTITY: Self = Self(1.0);

    pub fn new(factor: f32) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self(factor)
        } else {
            Self::IDENTITY
        }
    }

    pub fn from_dpi(dpi: u32) -> Self {
        if dpi == 0 {
            return Self::IDENTITY;
        }
        Self::new(dpi as f32 / REFERENCE_DPI as f32)
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    /// Scales a nominal pixel value, rounding to the nearest pixel.
    pub fn scale(self, nominal: i32) -> i32 {
        (nominal as f32 * self.0).round() as i32
    }

    /// Inverse of [`DpiScale::scale`].
    pub fn unscale(self, physical: i32) -> i32 {
        (physical as f32 / self.0).round() as i32
    }
}

impl Default for DpiScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Pixel constants after DPI scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub scale: DpiScale,
    pub button_height: i32,
    pub button_h_pad: i32,
    pub button_margin: i32,
    pub min_button_width: i32,
    pub group_outer_margin: i32,
    pub group_inner_pad: i32,
    pub group_min_width: i32,
    pub group_width_shrink: i32,
    pub inner_fudge: i32,
    pub inner_min_width: i32,
    pub title_inset: i32,
    pub viewport_fallback_inset: i32,
}

impl Metrics {
    pub fn scaled(scale: DpiScale) -> Self {
        let s = |v| scale.scale(v);
        Self {
            scale,
            button_height: s(BUTTON_HEIGHT),
            button_h_pad: s(BUTTON_H_PAD),
            button_margin: s(BUTTON_MARGIN),
            min_button_width: s(MIN_BUTTON_WIDTH),
            group_outer_margin: s(GROUP_OUTER_MARGIN),
            group_inner_pad: s(GROUP_INNER_PAD),
            group_min_width: s(GROUP_MIN_WIDTH),
            group_width_shrink: s(GROUP_WIDTH_SHRINK),
            inner_fudge: s(INNER_FUDGE),
            inner_min_width: s(INNER_MIN_WIDTH),
            title_inset: s(TITLE_INSET),
            viewport_fallback_inset: s(VIEWPORT_FALLBACK_INSET),
        }
    }

    /// Width of a group container for the given viewport.
    pub fn group_width(&self, viewport_width: i32) -> i32 {
        (viewport_width - self.group_outer_margin * 2 - self.group_width_shrink)
            .max(self.group_min_width)
    }

    /// Width available to the wrapped buttons inside a container.
    pub fn inner_width(&self, group_width: i32) -> i32 {
        (group_width - self.group_inner_pad * 2 - self.inner_fudge).max(self.inner_min_width)
    }

    /// Button width for a measured title: never narrower than the minimum,
    /// never wider than the row.
    pub fn button_width(&self, text_width: i32, inner_width: i32) -> i32 {
        (text_width + self.button_h_pad)
            .min(inner_width)
            .max(self.min_button_width)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::scaled(DpiScale::IDENTITY)
    }
}
