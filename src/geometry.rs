//! Value types shared by every placement component.
//!
//! All coordinates are integer screen pixels.  A [`Rect`] is stored as its
//! four edges (`left`, `top`, `right`, `bottom`) rather than origin + size,
//! because that is the shape the window system reports and accepts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque window handle as handed out by the window system.
///
/// `0` is the null handle and never refers to a real window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    /// The null handle.
    pub const NULL: Self = Self(0);

    /// Whether this is the null handle.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Opaque monitor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorId(pub isize);

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// An axis-aligned rectangle in screen pixels.
///
/// Intermediate results may be inverted (`left > right`); only a rectangle
/// that passes [`Rect::is_valid`] may be handed to the window system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Build a rectangle from its four edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent, saturating at the `i32` range.
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Centre point, truncated toward zero.
    pub const fn center(&self) -> (i32, i32) {
        (
            self.left + self.width() / 2,
            self.top + self.height() / 2,
        )
    }

    /// Whether `(x, y)` lies inside the rectangle (right/bottom exclusive).
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Non-negative extents on both axes.
    pub const fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}) [W:{}, H:{}]",
            self.left,
            self.top,
            self.right,
            self.bottom,
            self.width(),
            self.height()
        )
    }
}

/// Baseline DPI (100 % scaling).
pub const BASE_DPI: u32 = 96;

/// A monitor as seen by the placement engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    pub id: MonitorId,
    /// Usable area excluding the taskbar and other reserved UI.
    pub work_area: Rect,
    pub dpi: u32,
}

/// Geometry of a single window at the moment an operation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFrame {
    /// Outer rectangle as reported by the window system.
    pub visible_rect: Rect,
    /// Compositor-reported visual bounds; differs from `visible_rect` by the
    /// invisible resize border.
    pub extended_frame_rect: Rect,
    pub window_dpi: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_extents() {
        let r = Rect::new(10, 20, 110, 220);
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 200);
        assert_eq!(r.center(), (60, 120));
    }

    #[test]
    fn inverted_rect_is_not_valid() {
        assert!(Rect::new(0, 0, 0, 0).is_valid());
        assert!(!Rect::new(10, 0, 5, 10).is_valid());
        assert!(!Rect::new(0, 10, 10, 5).is_valid());
    }

    #[test]
    fn contains_excludes_far_edges() {
        let r = Rect::new(0, 0, 1920, 1080);
        assert!(r.contains(0, 0));
        assert!(r.contains(1919, 1079));
        assert!(!r.contains(1920, 500));
        assert!(!r.contains(-1, 500));
    }

    #[test]
    fn handle_display_and_null() {
        assert!(WindowHandle::NULL.is_null());
        assert!(!WindowHandle(0xbeef).is_null());
        assert_eq!(WindowHandle(0xbeef).to_string(), "0xbeef");
        assert_eq!(MonitorId(0x1a).to_string(), "0x1A");
    }

    #[test]
    fn rect_display_includes_size() {
        assert_eq!(
            Rect::new(0, 0, 500, 300).to_string(),
            "(0, 0, 500, 300) [W:500, H:300]"
        );
    }
}
