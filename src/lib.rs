//! **winsnap**: keyboard-driven window snapping.
//!
//! A trigger names an operation ("move to left", "next display", "make
//! larger", ...).  The engine resolves the window it applies to, computes the
//! window's new rectangle from the monitor's work area and hands it back to
//! the window system.  Repeating an edge or corner operation on the same
//! window cycles through half, two-thirds and one-third of the screen.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::WindowSystem`]: the raw window and monitor primitives, so
//!   the layout math is not coupled to any specific platform.
//! * [`traits::CommandSource`]: the transport that delivers triggers (a
//!   Unix socket, a hotkey hook, …) so the main loop is not coupled to any
//!   specific IPC mechanism.
//!
//! [`placer::Placer`] ties them together using the pure building blocks:
//! [`layout`] (rectangle math), [`dpi`] (invisible border and DPI
//! correction), [`monitor`] (display hopping), [`cycle`] (repeat cycling),
//! [`classify`] (which windows may be moved) and [`registry`] (the table of
//! operations).  [`backend::virtual_desktop`] is an in-memory window system;
//! [`ipc`] carries the Unix-socket command listener.

pub mod backend;
pub mod classify;
pub mod command;
pub mod config;
pub mod cycle;
pub mod dpi;
pub mod geometry;
pub mod ipc;
pub mod layout;
pub mod monitor;
pub mod placer;
pub mod poller;
pub mod registry;
pub mod traits;
