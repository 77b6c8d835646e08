//! Concrete [`WindowSystem`](crate::traits::WindowSystem) backends.
//!
//! Native backends translate the trait calls into the platform's window
//! APIs.  [`virtual_desktop`] keeps the whole desktop in memory; the daemon
//! drives it from the `desktop` config section and the tests use it for
//! end-to-end placement runs.

pub mod virtual_desktop;
