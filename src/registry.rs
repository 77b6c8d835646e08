//! Table of every operation a trigger can invoke.
//!
//! Each entry maps a stable feature name (as used in key bindings and on
//! the command socket) to what the operation does.  Menus and settings
//! screens iterate [`OPERATIONS`] instead of re-deriving the list.

use crate::cycle::CycleSlot;
use crate::layout::{self, LayoutFn};

static LEFT: [LayoutFn; 3] = [
    layout::left_half,
    layout::left_two_thirds,
    layout::left_one_third,
];
static RIGHT: [LayoutFn; 3] = [
    layout::right_half,
    layout::right_two_thirds,
    layout::right_one_third,
];
static TOP: [LayoutFn; 3] = [
    layout::top_half,
    layout::top_two_thirds,
    layout::top_one_third,
];
static BOTTOM: [LayoutFn; 3] = [
    layout::bottom_half,
    layout::bottom_two_thirds,
    layout::bottom_one_third,
];
static TOP_LEFT: [LayoutFn; 3] = [
    layout::top_left_half,
    layout::top_left_two_thirds,
    layout::top_left_one_third,
];
static TOP_RIGHT: [LayoutFn; 3] = [
    layout::top_right_half,
    layout::top_right_two_thirds,
    layout::top_right_one_third,
];
static BOTTOM_LEFT: [LayoutFn; 3] = [
    layout::bottom_left_half,
    layout::bottom_left_two_thirds,
    layout::bottom_left_one_third,
];
static BOTTOM_RIGHT: [LayoutFn; 3] = [
    layout::bottom_right_half,
    layout::bottom_right_two_thirds,
    layout::bottom_right_one_third,
];

/// What an operation does when invoked.
#[derive(Debug, Clone, Copy)]
pub enum OperationKind {
    /// Step through `variants` on repeated invocation.
    Cycle {
        slot: CycleSlot,
        variants: &'static [LayoutFn],
    },
    /// Apply a single layout on the window's current display.
    Layout(LayoutFn),
    /// Centre the window on the display `offset` steps away.
    Display { offset: i32 },
    /// Hand the window to the window system's own maximize.
    Maximize,
    /// Flip the always-on-top style.
    ToggleTopmost,
}

/// A registered operation.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Feature name used in bindings and commands, e.g. `"moveToLeft"`.
    pub name: &'static str,
    /// Label for menus.
    pub display_name: &'static str,
    pub kind: OperationKind,
    /// Alternative names accepted by [`lookup`].
    pub aliases: &'static [&'static str],
}

impl Operation {
    /// Number of layout variants this operation steps through.
    pub fn arity(&self) -> usize {
        match self.kind {
            OperationKind::Cycle { variants, .. } => variants.len(),
            _ => 1,
        }
    }

    /// Whether repeated invocation cycles through variants.
    pub fn is_cycling(&self) -> bool {
        matches!(self.kind, OperationKind::Cycle { .. })
    }
}

const fn cycle(
    name: &'static str,
    display_name: &'static str,
    slot: CycleSlot,
    variants: &'static [LayoutFn],
) -> Operation {
    Operation {
        name,
        display_name,
        kind: OperationKind::Cycle { slot, variants },
        aliases: &[],
    }
}

const fn single(name: &'static str, display_name: &'static str, f: LayoutFn) -> Operation {
    Operation {
        name,
        display_name,
        kind: OperationKind::Layout(f),
        aliases: &[],
    }
}

/// Every operation, in menu order.
pub static OPERATIONS: &[Operation] = &[
    cycle("moveToLeft", "Left", CycleSlot::Left, &LEFT),
    cycle("moveToRight", "Right", CycleSlot::Right, &RIGHT),
    cycle("moveToTop", "Top", CycleSlot::Top, &TOP),
    cycle("moveToBottom", "Bottom", CycleSlot::Bottom, &BOTTOM),
    cycle("moveToTopLeft", "Top Left", CycleSlot::TopLeft, &TOP_LEFT),
    cycle("moveToTopRight", "Top Right", CycleSlot::TopRight, &TOP_RIGHT),
    cycle("moveToBottomLeft", "Bottom Left", CycleSlot::BottomLeft, &BOTTOM_LEFT),
    cycle("moveToBottomRight", "Bottom Right", CycleSlot::BottomRight, &BOTTOM_RIGHT),
    single("moveToCenter", "Center", layout::center),
    Operation {
        name: "maximize",
        display_name: "Maximize",
        kind: OperationKind::Maximize,
        aliases: &[],
    },
    single("almostMaximize", "Almost Maximize", layout::almost_maximize),
    single("makeLarger", "Make Larger", layout::make_larger),
    single("makeSmaller", "Make Smaller", layout::make_smaller),
    single("makeFullHeight", "Maximize Height", layout::full_height),
    Operation {
        name: "nextDisplay",
        display_name: "Next Display",
        kind: OperationKind::Display { offset: 1 },
        aliases: &[],
    },
    Operation {
        name: "prevDisplay",
        display_name: "Previous Display",
        kind: OperationKind::Display { offset: -1 },
        aliases: &["previousDisplay"],
    },
    Operation {
        name: "toggleAlwaysOnTop",
        display_name: "Toggle Always on Top",
        kind: OperationKind::ToggleTopmost,
        aliases: &[],
    },
    single("pushToLeft", "Push Left", layout::push_left),
    single("pushToRight", "Push Right", layout::push_right),
    single("pushToTop", "Push Up", layout::push_top),
    single("pushToBottom", "Push Down", layout::push_bottom),
];

/// Lower-case `name` and drop separators so `"move-to-left"`,
/// `"MoveToLeft"` and `"move_to_left"` all compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Find an operation by feature name or alias.
pub fn lookup(name: &str) -> Option<&'static Operation> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    OPERATIONS.iter().find(|op| {
        normalize(op.name) == wanted || op.aliases.iter().any(|a| normalize(a) == wanted)
    })
}
