//! Rectangle arithmetic for every snap layout.
//!
//! Every function here is pure and shares the [`LayoutFn`] shape: it takes
//! the display's work area (`disp`) and the window's current content
//! rectangle (`cur`) and returns the rectangle the window should occupy.
//! Layouts that only depend on the display simply ignore `cur`.
//!
//! # Rounding
//!
//! Fractions and centring use plain integer division, which truncates
//! toward zero.  On displays whose extent is not divisible by the
//! denominator the two halves of a split differ by one pixel, and repeatedly
//! centring a window can walk it by a pixel.  Cycle positions are defined
//! in terms of the truncated values.

use crate::geometry::Rect;

/// Signature shared by all layouts: `(work_area, current) -> target`.
pub type LayoutFn = fn(Rect, Rect) -> Rect;

/// Percentage of the display extent added or removed per grow/shrink step.
pub const RESIZE_PERCENT: i32 = 5;

/// Direction of a [`resize_by_percent`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    Shrink,
    Grow,
}

impl Resize {
    /// `-1` for shrink, `+1` for grow.
    pub fn sign(self) -> i32 {
        match self {
            Resize::Shrink => -1,
            Resize::Grow => 1,
        }
    }
}

//  Fractional partitions

/// `extent * num / den` without intermediate overflow, truncated.
fn fraction(extent: i32, num: i32, den: i32) -> i32 {
    let v = i64::from(extent) * i64::from(num) / i64::from(den);
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// The left `num/den` of `disp`, full height.
pub fn to_left(disp: Rect, num: i32, den: i32) -> Rect {
    Rect {
        right: disp.left.saturating_add(fraction(disp.width(), num, den)),
        ..disp
    }
}

/// The right `num/den` of `disp`, full height.
pub fn to_right(disp: Rect, num: i32, den: i32) -> Rect {
    Rect {
        left: disp.right.saturating_sub(fraction(disp.width(), num, den)),
        ..disp
    }
}

/// The top `num/den` of `disp`, full width.
pub fn to_top(disp: Rect, num: i32, den: i32) -> Rect {
    Rect {
        bottom: disp.top.saturating_add(fraction(disp.height(), num, den)),
        ..disp
    }
}

/// The bottom `num/den` of `disp`, full width.
pub fn to_bottom(disp: Rect, num: i32, den: i32) -> Rect {
    Rect {
        top: disp.bottom.saturating_sub(fraction(disp.height(), num, den)),
        ..disp
    }
}

pub fn left_half(disp: Rect, _cur: Rect) -> Rect {
    to_left(disp, 1, 2)
}

pub fn left_two_thirds(disp: Rect, _cur: Rect) -> Rect {
    to_left(disp, 2, 3)
}

pub fn left_one_third(disp: Rect, _cur: Rect) -> Rect {
    to_left(disp, 1, 3)
}

pub fn right_half(disp: Rect, _cur: Rect) -> Rect {
    to_right(disp, 1, 2)
}

pub fn right_two_thirds(disp: Rect, _cur: Rect) -> Rect {
    to_right(disp, 2, 3)
}

pub fn right_one_third(disp: Rect, _cur: Rect) -> Rect {
    to_right(disp, 1, 3)
}

pub fn top_half(disp: Rect, _cur: Rect) -> Rect {
    to_top(disp, 1, 2)
}

pub fn top_two_thirds(disp: Rect, _cur: Rect) -> Rect {
    to_top(disp, 2, 3)
}

pub fn top_one_third(disp: Rect, _cur: Rect) -> Rect {
    to_top(disp, 1, 3)
}

pub fn bottom_half(disp: Rect, _cur: Rect) -> Rect {
    to_bottom(disp, 1, 2)
}

pub fn bottom_two_thirds(disp: Rect, _cur: Rect) -> Rect {
    to_bottom(disp, 2, 3)
}

pub fn bottom_one_third(disp: Rect, _cur: Rect) -> Rect {
    to_bottom(disp, 1, 3)
}

//  Corners

/// Intersect a horizontal partition with a vertical one.
///
/// `merge(left_half, top_half)` is the top-left quadrant.
pub fn merge(a: Rect, b: Rect) -> Rect {
    Rect {
        left: a.left.max(b.left),
        top: a.top.max(b.top),
        right: a.right.min(b.right),
        bottom: a.bottom.min(b.bottom),
    }
}

// Corner variants cycle the horizontal fraction; the vertical split stays at
// one half.

pub fn top_left_half(disp: Rect, cur: Rect) -> Rect {
    merge(left_half(disp, cur), top_half(disp, cur))
}

pub fn top_left_two_thirds(disp: Rect, cur: Rect) -> Rect {
    merge(left_two_thirds(disp, cur), top_half(disp, cur))
}

pub fn top_left_one_third(disp: Rect, cur: Rect) -> Rect {
    merge(left_one_third(disp, cur), top_half(disp, cur))
}

pub fn top_right_half(disp: Rect, cur: Rect) -> Rect {
    merge(right_half(disp, cur), top_half(disp, cur))
}

pub fn top_right_two_thirds(disp: Rect, cur: Rect) -> Rect {
    merge(right_two_thirds(disp, cur), top_half(disp, cur))
}

pub fn top_right_one_third(disp: Rect, cur: Rect) -> Rect {
    merge(right_one_third(disp, cur), top_half(disp, cur))
}

pub fn bottom_left_half(disp: Rect, cur: Rect) -> Rect {
    merge(left_half(disp, cur), bottom_half(disp, cur))
}

pub fn bottom_left_two_thirds(disp: Rect, cur: Rect) -> Rect {
    merge(left_two_thirds(disp, cur), bottom_half(disp, cur))
}

pub fn bottom_left_one_third(disp: Rect, cur: Rect) -> Rect {
    merge(left_one_third(disp, cur), bottom_half(disp, cur))
}

pub fn bottom_right_half(disp: Rect, cur: Rect) -> Rect {
    merge(right_half(disp, cur), bottom_half(disp, cur))
}

pub fn bottom_right_two_thirds(disp: Rect, cur: Rect) -> Rect {
    merge(right_two_thirds(disp, cur), bottom_half(disp, cur))
}

pub fn bottom_right_one_third(disp: Rect, cur: Rect) -> Rect {
    merge(right_one_third(disp, cur), bottom_half(disp, cur))
}

//  Size-preserving moves

/// Keep the size of `cur` and centre it in `disp`.
pub fn center(disp: Rect, cur: Rect) -> Rect {
    let dx = (disp.width() - cur.width()) / 2;
    let dy = (disp.height() - cur.height()) / 2;
    Rect {
        left: disp.left + dx,
        top: disp.top + dy,
        right: disp.left + dx + cur.width(),
        bottom: disp.top + dy + cur.height(),
    }
}

pub fn push_left(disp: Rect, cur: Rect) -> Rect {
    Rect {
        left: disp.left,
        right: disp.left + cur.width(),
        ..cur
    }
}

pub fn push_right(disp: Rect, cur: Rect) -> Rect {
    Rect {
        left: disp.right - cur.width(),
        right: disp.right,
        ..cur
    }
}

pub fn push_top(disp: Rect, cur: Rect) -> Rect {
    Rect {
        top: disp.top,
        bottom: disp.top + cur.height(),
        ..cur
    }
}

pub fn push_bottom(disp: Rect, cur: Rect) -> Rect {
    Rect {
        top: disp.bottom - cur.height(),
        bottom: disp.bottom,
        ..cur
    }
}

//  Grow / shrink

/// Move every edge of `cur` by [`RESIZE_PERCENT`] of the display extent on
/// that axis: inward for [`Resize::Shrink`], outward for [`Resize::Grow`].
///
/// Growing clamps each edge to the matching edge of `disp` independently,
/// so a window already touching one side keeps growing on the others.
/// Shrinking stops (returns `cur`) once another step would invert the
/// rectangle.
pub fn resize_by_percent(disp: Rect, cur: Rect, step: Resize) -> Rect {
    let dx = fraction(disp.width(), RESIZE_PERCENT, 100) * step.sign();
    let dy = fraction(disp.height(), RESIZE_PERCENT, 100) * step.sign();
    let moved = Rect {
        left: cur.left.saturating_sub(dx),
        top: cur.top.saturating_sub(dy),
        right: cur.right.saturating_add(dx),
        bottom: cur.bottom.saturating_add(dy),
    };
    match step {
        Resize::Shrink if moved.width() <= 0 || moved.height() <= 0 => cur,
        Resize::Shrink => moved,
        Resize::Grow => Rect {
            left: moved.left.max(disp.left),
            top: moved.top.max(disp.top),
            right: moved.right.min(disp.right),
            bottom: moved.bottom.min(disp.bottom),
        },
    }
}

pub fn make_smaller(disp: Rect, cur: Rect) -> Rect {
    resize_by_percent(disp, cur, Resize::Shrink)
}

pub fn make_larger(disp: Rect, cur: Rect) -> Rect {
    resize_by_percent(disp, cur, Resize::Grow)
}

/// Keep the horizontal extent of `cur`, span the full display height.
pub fn full_height(disp: Rect, cur: Rect) -> Rect {
    Rect {
        top: disp.top,
        bottom: disp.bottom,
        ..cur
    }
}

/// The whole work area shrunk by one step on every edge.
pub fn almost_maximize(disp: Rect, _cur: Rect) -> Rect {
    resize_by_percent(disp, disp, Resize::Shrink)
}

//  Tests
