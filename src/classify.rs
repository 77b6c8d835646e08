//! Which windows may be snapped at all.
//!
//! The desktop, the taskbars and the shell's helper windows report ordinary
//! window rectangles, but moving them is never what the user wants.  They
//! are recognised by window class name.

use crate::geometry::WindowHandle;
use crate::traits::WindowSystem;
use log::{debug, warn};

/// Shell classes that are never zonable.
pub const SYSTEM_CLASSES: &[&str] = &[
    // Desktop
    "Progman",
    // Desktop icon list view
    "SysListView32",
    // Wallpaper and desktop component hosts
    "WorkerW",
    // Primary taskbar
    "Shell_TrayWnd",
    // Taskbar on secondary monitors
    "Shell_SecondaryTrayWnd",
];

/// Whether `class` names one of the built-in shell windows
/// (ASCII case-insensitive).
pub fn is_system_class_name(class: &str) -> bool {
    SYSTEM_CLASSES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(class))
}

/// Decides whether a window is eligible for placement.
#[derive(Debug, Clone, Default)]
pub struct WindowClassifier {
    /// Additional class names rejected on top of [`SYSTEM_CLASSES`].
    extra_classes: Vec<String>,
}

impl WindowClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `classes` in addition to the built-in shell classes.
    pub fn with_extra_classes(classes: impl IntoIterator<Item = String>) -> Self {
        Self {
            extra_classes: classes.into_iter().collect(),
        }
    }

    /// Whether `class` is rejected by this classifier.
    pub fn is_excluded_class(&self, class: &str) -> bool {
        is_system_class_name(class)
            || self
                .extra_classes
                .iter()
                .any(|c| c.eq_ignore_ascii_case(class))
    }

    /// Whether `window` is a zonable window.
    ///
    /// The null handle, the shell window, child windows and shell classes
    /// are not.  A window whose class cannot be read is not either.
    pub fn is_zonable<W: WindowSystem>(&self, ws: &W, window: WindowHandle) -> bool {
        if window.is_null() {
            return false;
        }
        if ws.shell_window() == Some(window) {
            debug!("{} is the shell window", window);
            return false;
        }
        if ws.root_window(window) != window {
            debug!("{} is not a top-level window", window);
            return false;
        }
        match ws.window_class_name(window) {
            Ok(class) if self.is_excluded_class(&class) => {
                debug!("{} has system class {:?}", window, class);
                false
            }
            Ok(_) => true,
            Err(e) => {
                warn!("cannot read class of {}: {}", window, e);
                false
            }
        }
    }
}
