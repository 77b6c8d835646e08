//! Core traits that decouple winsnap from any specific window system or
//! trigger transport.
//!
//! The [`Placer`](crate::placer::Placer) only ever talks to a
//! [`WindowSystem`]; triggers reach it through a [`CommandSource`].  A
//! native backend, the in-memory
//! [`VirtualDesktop`](crate::backend::virtual_desktop::VirtualDesktop) and
//! the test doubles all sit behind the same two seams.

use crate::command::Command;
use crate::geometry::{Display, MonitorId, Rect, WindowHandle};
use std::sync::mpsc;

/// The window-system primitives the placement engine consumes.
///
/// Implementations return raw values; all layout math, DPI correction and
/// no-op detection happens on the engine side.
pub trait WindowSystem {
    /// The error type produced by this window system.
    type Error: std::error::Error + Send + 'static;

    /// Outer rectangle of the window, invisible border included.
    fn window_rect(&self, window: WindowHandle) -> Result<Rect, Self::Error>;

    /// Compositor-reported visual bounds of the window.
    fn extended_frame_bounds(&self, window: WindowHandle) -> Result<Rect, Self::Error>;

    /// DPI the window is rendered at.  `0` means unknown.
    fn window_dpi(&self, window: WindowHandle) -> Result<u32, Self::Error>;

    /// Monitor the window is on (nearest one if it straddles several).
    fn monitor_for_window(&self, window: WindowHandle) -> Result<MonitorId, Self::Error>;

    /// Work area and DPI of `monitor`.
    fn monitor_info(&self, monitor: MonitorId) -> Result<Display, Self::Error>;

    /// All attached monitors in enumeration order.
    ///
    /// The order is not required to be stable between calls.
    fn enumerate_monitors(&self) -> Result<Vec<MonitorId>, Self::Error>;

    /// Clear the maximized/minimized state so a new rectangle sticks.
    fn normalize_window(&self, window: WindowHandle) -> Result<(), Self::Error>;

    fn set_window_rect(&self, window: WindowHandle, rect: Rect) -> Result<(), Self::Error>;

    fn maximize_window(&self, window: WindowHandle) -> Result<(), Self::Error>;

    /// Whether the window carries the always-on-top style.
    fn is_topmost(&self, window: WindowHandle) -> Result<bool, Self::Error>;

    fn set_topmost(&self, window: WindowHandle, topmost: bool) -> Result<(), Self::Error>;

    fn window_class_name(&self, window: WindowHandle) -> Result<String, Self::Error>;

    /// The window that currently has keyboard focus, or the null handle.
    fn foreground_window(&self) -> Result<WindowHandle, Self::Error>;

    /// Window title, used for log messages only.
    fn window_title(&self, _window: WindowHandle) -> Result<String, Self::Error> {
        Ok(String::new())
    }

    /// The desktop shell's own window, if the window system has one.
    fn shell_window(&self) -> Option<WindowHandle> {
        None
    }

    /// Top-level ancestor of `window`.  Backends without a window hierarchy
    /// report the window itself.
    fn root_window(&self, window: WindowHandle) -> WindowHandle {
        window
    }
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport (a Unix socket, a hotkey hook,
/// an in-memory channel, ...) and forward parsed commands into the provided
/// [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}
