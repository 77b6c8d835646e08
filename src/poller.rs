//! Remembers the last zonable window that had focus.
//!
//! When a trigger fires while focus sits on something that cannot be
//! snapped (a tray menu, a dialog of our own), the engine still wants to act
//! on the window the user was working in.  A background thread polls the
//! foreground window at a fixed interval and stores every zonable hit in a
//! [`LastActiveWindow`].
//!
//! The slot is a single atomic: the poller is the only writer, the placement
//! path only reads, and a stale value is harmless.

use crate::geometry::WindowHandle;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Shared, last-writer-wins window slot.
#[derive(Debug, Clone, Default)]
pub struct LastActiveWindow(Arc<AtomicIsize>);

impl LastActiveWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> WindowHandle {
        WindowHandle(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, window: WindowHandle) {
        self.0.store(window.0, Ordering::Release);
    }
}

/// Handle to a running poller thread.
///
/// Dropping the handle stops the thread without waiting for it.
pub struct ForegroundPoller {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ForegroundPoller {
    /// Start probing every `interval`.
    ///
    /// `sample` returns the current foreground window when it is zonable and
    /// `None` otherwise; hits are written into `slot`.
    pub fn spawn<F>(interval: Duration, slot: LastActiveWindow, mut sample: F) -> Self
    where
        F: FnMut() -> Option<WindowHandle> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let thread = {
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                info!("foreground poller running every {:?}", interval);
                while !stop.load(Ordering::Acquire) {
                    if let Some(window) = sample() {
                        if slot.get() != window {
                            debug!("last active window -> {}", window);
                            slot.set(window);
                        }
                    }
                    thread::sleep(interval);
                }
                debug!("foreground poller stopped");
            })
        };
        Self {
            stop,
            thread: Some(thread),
        }
    }

    /// Signal the thread to exit and wait for it.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ForegroundPoller {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}
