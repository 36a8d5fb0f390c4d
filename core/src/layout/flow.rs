//! Left-to-right, top-to-bottom wrapping of fixed-size children.

use super::geometry::{Rect, Size};

/// Result of flowing children into a row-wrapping panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flow {
    /// Child bounds relative to the panel, in input order.
    pub bounds: Vec<Rect>,
    /// Panel height needed to enclose every child and its margin.
    pub height: i32,
}

/// Places `sizes` in rows no wider than `max_width`, surrounding each child
/// with `margin` on every side. A child that does not fit in the current
/// row starts a new one; the first child of a row is always placed even if
/// it overflows.
pub fn wrap(sizes: &[Size], margin: i32, max_width: i32) -> Flow {
    let mut bounds = Vec::with_capacity(sizes.len());
    let mut x = 0;
    let mut row_top = 0;
    let mut row_height = 0;

    for size in sizes {
        let outer_width = size.width + margin * 2;
        let outer_height = size.height + margin * 2;

        if x > 0 && x + outer_width > max_width {
            x = 0;
            row_top += row_height;
            row_height = 0;
        }

        bounds.push(Rect::new(x + margin, row_top + margin, size.width, size.height));
        x += outer_width;
        row_height = row_height.max(outer_height);
    }

    Flow {
        bounds,
        height: row_top + row_height,
    }
}
