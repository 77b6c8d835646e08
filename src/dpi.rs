//! Reconciles what the compositor draws with what the window system sets.
//!
//! A window's outer rectangle includes an invisible resize border whose
//! width depends on the OS theme and version.  Layouts are computed on the
//! *visible* content (the extended frame bounds), so the border has to be
//! stripped before the layout runs and added back afterwards:
//!
//! 1. measure the padding between the outer rectangle and the extended frame,
//! 2. scale the extended frame from the window's DPI to the target display's,
//! 3. run the layout on the scaled frame and the display's work area,
//! 4. grow the result by the padding again so the OS places the visible
//!    content exactly where the layout asked.
//!
//! DPI scaling uses integer arithmetic and truncates; a sub-pixel error per
//! edge is accepted.

use crate::geometry::{Display, Rect, WindowFrame};
use crate::layout::LayoutFn;

/// Invisible border on each side of a window.  May be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BorderPadding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BorderPadding {
    /// Padding between the outer rectangle and the extended frame.
    pub fn of(frame: &WindowFrame) -> Self {
        let outer = frame.visible_rect;
        let inner = frame.extended_frame_rect;
        Self {
            left: inner.left - outer.left,
            top: inner.top - outer.top,
            right: outer.right - inner.right,
            bottom: outer.bottom - inner.bottom,
        }
    }

    /// Turn a desired content rectangle back into the outer rectangle the
    /// window system expects.
    pub fn reapply(&self, content: Rect) -> Rect {
        Rect {
            left: content.left - self.left,
            top: content.top - self.top,
            right: content.right + self.right,
            bottom: content.bottom + self.bottom,
        }
    }
}

/// Scale every coordinate of `src` by `to / from`.
///
/// A zero DPI on either side (the window system could not tell) leaves
/// `src` untouched.
pub fn scale_for_dpi(src: Rect, from: u32, to: u32) -> Rect {
    if from == 0 || to == 0 || from == to {
        return src;
    }
    let scale = |v: i32| -> i32 {
        let scaled = i64::from(v) * i64::from(to) / i64::from(from);
        scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    };
    Rect {
        left: scale(src.left),
        top: scale(src.top),
        right: scale(src.right),
        bottom: scale(src.bottom),
    }
}

/// Result of running a layout through the border/DPI correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub padding: BorderPadding,
    /// Extended frame scaled to the target display's DPI.
    pub scaled_frame: Rect,
    /// Where the visible content should end up.
    pub content: Rect,
    /// Outer rectangle to hand to the window system.
    pub target: Rect,
}

impl FramePlan {
    /// Whether applying the plan would leave the window where it is.
    pub fn is_noop(&self, current: Rect) -> bool {
        self.target == current
    }
}

/// Run `layout` for `frame` on `display`.
pub fn plan(frame: &WindowFrame, display: &Display, layout: LayoutFn) -> FramePlan {
    let padding = BorderPadding::of(frame);
    let scaled_frame = scale_for_dpi(frame.extended_frame_rect, frame.window_dpi, display.dpi);
    let content = layout(display.work_area, scaled_frame);
    FramePlan {
        padding,
        scaled_frame,
        content,
        target: padding.reapply(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MonitorId;
    use crate::layout;

    fn display(dpi: u32) -> Display {
        Display {
            id: MonitorId(1),
            work_area: Rect::new(0, 0, 1920, 1080),
            dpi,
        }
    }

    /// A Windows 10 style frame: 7px invisible border left, right and bottom.
    fn bordered(outer: Rect) -> WindowFrame {
        WindowFrame {
            visible_rect: outer,
            extended_frame_rect: Rect::new(
                outer.left + 7,
                outer.top,
                outer.right - 7,
                outer.bottom - 7,
            ),
            window_dpi: 96,
        }
    }

    #[test]
    fn padding_between_outer_and_frame() {
        let frame = bordered(Rect::new(93, 0, 1007, 507));
        assert_eq!(
            BorderPadding::of(&frame),
            BorderPadding {
                left: 7,
                top: 0,
                right: 7,
                bottom: 7,
            }
        );
    }

    #[test]
    fn negative_padding_is_preserved() {
        let frame = WindowFrame {
            visible_rect: Rect::new(10, 10, 100, 100),
            extended_frame_rect: Rect::new(8, 10, 102, 100),
            window_dpi: 96,
        };
        let pad = BorderPadding::of(&frame);
        assert_eq!(pad.left, -2);
        assert_eq!(pad.right, -2);
        assert_eq!(pad.reapply(frame.extended_frame_rect), frame.visible_rect);
    }

    #[test]
    fn scale_doubles_from_96_to_192() {
        let src = Rect::new(10, 20, 110, 220);
        assert_eq!(scale_for_dpi(src, 96, 192), Rect::new(20, 40, 220, 440));
    }

    #[test]
    fn scale_with_unknown_dpi_is_identity() {
        let src = Rect::new(10, 20, 110, 220);
        assert_eq!(scale_for_dpi(src, 0, 144), src);
        assert_eq!(scale_for_dpi(src, 96, 0), src);
        assert_eq!(scale_for_dpi(src, 120, 120), src);
    }

    #[test]
    fn display_without_dpi_keeps_window_size() {
        let frame = WindowFrame {
            visible_rect: Rect::new(100, 100, 900, 700),
            extended_frame_rect: Rect::new(100, 100, 900, 700),
            window_dpi: 96,
        };
        let p = plan(&frame, &display(0), layout::center);
        assert_eq!(p.scaled_frame, frame.extended_frame_rect);
        assert_eq!(p.target, Rect::new(560, 240, 1360, 840));
    }

    #[test]
    fn scale_truncates() {
        // 150 % -> 100 %: 101 * 96 / 144 = 67.33
        let src = Rect::new(101, 0, 301, 3);
        assert_eq!(scale_for_dpi(src, 144, 96), Rect::new(67, 0, 200, 2));
    }

    #[test]
    fn zero_border_round_trip_is_unchanged() {
        let outer = Rect::new(10, 20, 110, 220);
        let frame = WindowFrame {
            visible_rect: outer,
            extended_frame_rect: outer,
            window_dpi: 96,
        };
        let p = plan(&frame, &display(192), |_, cur| cur);
        assert_eq!(p.scaled_frame, Rect::new(20, 40, 220, 440));
        assert_eq!(p.padding, BorderPadding::default());
        assert_eq!(p.target, p.content);
        assert_eq!(p.target, Rect::new(20, 40, 220, 440));
    }

    #[test]
    fn border_is_added_back_around_layout() {
        let frame = bordered(Rect::new(493, 200, 1007, 707));
        let p = plan(&frame, &display(96), layout::left_half);
        assert_eq!(p.content, Rect::new(0, 0, 960, 1080));
        assert_eq!(p.target, Rect::new(-7, 0, 967, 1087));
    }

    #[test]
    fn already_placed_window_is_noop() {
        let frame = bordered(Rect::new(-7, 0, 967, 1087));
        let p = plan(&frame, &display(96), layout::left_half);
        assert!(p.is_noop(frame.visible_rect));
    }

    #[test]
    fn moved_window_is_not_noop() {
        let frame = bordered(Rect::new(0, 0, 967, 1087));
        let p = plan(&frame, &display(96), layout::left_half);
        assert!(!p.is_noop(frame.visible_rect));
    }

    #[test]
    fn center_keeps_scaled_size() {
        // 800x600 content on a 96 DPI window, moved onto a 192 DPI display.
        let frame = WindowFrame {
            visible_rect: Rect::new(0, 0, 800, 600),
            extended_frame_rect: Rect::new(0, 0, 800, 600),
            window_dpi: 96,
        };
        let p = plan(&frame, &display(192), layout::center);
        assert_eq!(p.content.width(), 1600);
        assert_eq!(p.content.height(), 1200);
    }
}
