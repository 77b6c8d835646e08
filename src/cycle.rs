//! "Press again for a narrower fraction" state.
//!
//! Each [`CycleSlot`] keeps a turn counter.  Invoking a slot picks the
//! variant at `turn % variants.len()`, advances that slot and zeroes every
//! other slot.  All counters start over when the target window changes, or
//! when a non-cycling operation runs (see [`CycleTracker::reset`]).

use crate::geometry::WindowHandle;
use std::collections::HashMap;
use std::fmt;

/// A repeatable operation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleSlot {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl fmt::Display for CycleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleSlot::Left => write!(f, "left"),
            CycleSlot::Right => write!(f, "right"),
            CycleSlot::Top => write!(f, "top"),
            CycleSlot::Bottom => write!(f, "bottom"),
            CycleSlot::TopLeft => write!(f, "top-left"),
            CycleSlot::TopRight => write!(f, "top-right"),
            CycleSlot::BottomLeft => write!(f, "bottom-left"),
            CycleSlot::BottomRight => write!(f, "bottom-right"),
        }
    }
}

/// Turn counters plus the window the last operation acted upon.
#[derive(Debug, Default)]
pub struct CycleTracker {
    /// Slots absent from the map are at turn 0.
    turns: HashMap<CycleSlot, usize>,
    last_window: Option<WindowHandle>,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the variant for `slot` acting on `window` and advance the cycle.
    ///
    /// Returns `None` only when `variants` is empty, in which case no state
    /// changes.
    pub fn select<'v, T>(
        &mut self,
        window: WindowHandle,
        slot: CycleSlot,
        variants: &'v [T],
    ) -> Option<&'v T> {
        self.select_index(window, slot, variants.len())
            .map(|i| &variants[i])
    }

    /// Index of the variant chosen out of `len`, advancing the cycle.
    pub fn select_index(
        &mut self,
        window: WindowHandle,
        slot: CycleSlot,
        len: usize,
    ) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if self.last_window != Some(window) {
            self.turns.clear();
        }
        let turn = self.turn(slot);
        self.turns.retain(|s, _| *s == slot);
        self.turns.insert(slot, turn.wrapping_add(1));
        self.last_window = Some(window);
        Some(turn % len)
    }

    /// Zero every counter.  Used by operations that do not cycle.
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    /// Remember `window` as the last window acted upon.
    pub fn record(&mut self, window: WindowHandle) {
        self.last_window = Some(window);
    }

    /// Current turn counter of `slot`.
    pub fn turn(&self, slot: CycleSlot) -> usize {
        self.turns.get(&slot).copied().unwrap_or(0)
    }

    pub fn last_window(&self) -> Option<WindowHandle> {
        self.last_window
    }
}
