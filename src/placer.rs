//! The orchestrator that ties classification, layout math, DPI correction
//! and monitor navigation to a [`WindowSystem`].
//!
//! [`Placer`] owns the cycle state and reacts to [`Command`]s by resolving
//! the target window, computing its new rectangle and issuing calls to the
//! window system.  Every attempt is independent: a failure is returned to
//! the caller and never poisons later attempts.

use crate::classify::WindowClassifier;
use crate::command::{Command, DisplayOffset};
use crate::config::PlacementConfig;
use crate::cycle::CycleTracker;
use crate::dpi;
use crate::geometry::{Rect, WindowFrame, WindowHandle};
use crate::layout::{self, LayoutFn};
use crate::monitor::{self, DEFAULT_MAX_PASSES};
use crate::poller::LastActiveWindow;
use crate::registry::{Operation, OperationKind};
use crate::traits::WindowSystem;
use log::{debug, info, warn};

/// What a successful placement attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The window was moved to this outer rectangle.
    Applied(Rect),
    /// The window already sat at the target; nothing was sent.
    NoOp,
    Maximized,
    /// The always-on-top style is now set to this value.
    Topmost(bool),
}

/// Possible errors from a placement attempt.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    /// Neither the foreground window nor the last active one may be placed.
    #[error("window {0} cannot be placed")]
    NotZonable(WindowHandle),

    /// The compositor could not report the window's extended frame.
    #[error("extended frame unavailable: {0}")]
    FrameUnavailable(String),

    #[error("monitor info unavailable: {0}")]
    MonitorInfoUnavailable(String),

    /// The window system rejected the new rectangle.
    #[error("apply failed: {0}")]
    ApplyFailed(String),

    /// The computed rectangle has a negative extent.
    #[error("layout produced a degenerate rectangle {0}")]
    DegenerateTarget(Rect),

    /// Any other window-system query failed.
    #[error("window system error: {0}")]
    Backend(String),
}

/// Orchestrates placement operations against a [`WindowSystem`].
///
/// The placer is generic over the window system, so the same engine drives
/// a native backend, the virtual desktop and the test doubles.
///
/// # Typical usage
///
/// ```ignore
/// let ws = VirtualDesktop::from_config(&cfg.desktop)?;
/// let mut placer = Placer::with_config(ws, &cfg.placement);
/// placer.handle(Command::Invoke(Feature::parse("moveToLeft").unwrap()))?;
/// ```
pub struct Placer<W: WindowSystem> {
    ws: W,
    classifier: WindowClassifier,
    cycles: CycleTracker,
    last_active: Option<LastActiveWindow>,
    monitor_passes: usize,
}

impl<W: WindowSystem> Placer<W> {
    pub fn new(ws: W) -> Self {
        Self {
            ws,
            classifier: WindowClassifier::new(),
            cycles: CycleTracker::new(),
            last_active: None,
            monitor_passes: DEFAULT_MAX_PASSES,
        }
    }

    pub fn with_config(ws: W, config: &PlacementConfig) -> Self {
        Self {
            classifier: WindowClassifier::with_extra_classes(
                config.extra_system_classes.iter().cloned(),
            ),
            monitor_passes: config.monitor_search_passes.max(1),
            ..Self::new(ws)
        }
    }

    /// Attach the slot the foreground poller writes to.  Used as the target
    /// when focus sits on a window that cannot be placed.
    pub fn set_last_active(&mut self, slot: LastActiveWindow) {
        self.last_active = Some(slot);
    }

    pub fn window_system(&self) -> &W {
        &self.ws
    }

    pub fn classifier(&self) -> &WindowClassifier {
        &self.classifier
    }

    pub fn cycles(&self) -> &CycleTracker {
        &self.cycles
    }

    /// Process a single [`Command`].
    pub fn handle(&mut self, cmd: Command) -> Result<Outcome, PlacementError> {
        match cmd {
            Command::Invoke(feature) => {
                info!("invoke {}", feature);
                self.run(feature.operation())
            }
            Command::MoveToDisplay(DisplayOffset(offset)) => {
                info!("move to display {:+}", offset);
                let window = self.target_window()?;
                self.cycles.reset();
                self.apply(window, layout::center, offset)
            }
        }
    }

    /// Run a registered operation on the target window.
    pub fn run(&mut self, op: &Operation) -> Result<Outcome, PlacementError> {
        let window = self.target_window()?;
        match op.kind {
            OperationKind::Cycle { slot, variants } => {
                let Some(index) = self.cycles.select_index(window, slot, variants.len()) else {
                    warn!("{} has no variants", op.name);
                    return Ok(Outcome::NoOp);
                };
                debug!(
                    "{} variant {}/{} on {}",
                    slot,
                    index + 1,
                    variants.len(),
                    window
                );
                self.apply(window, variants[index], 0)
            }
            OperationKind::Layout(f) => {
                self.cycles.reset();
                self.apply(window, f, 0)
            }
            OperationKind::Display { offset } => {
                self.cycles.reset();
                self.apply(window, layout::center, offset)
            }
            OperationKind::Maximize => {
                self.cycles.reset();
                self.maximize(window)
            }
            OperationKind::ToggleTopmost => {
                self.cycles.reset();
                self.toggle_topmost(window)
            }
        }
    }

    /// The window an operation acts on: the foreground window when it can be
    /// placed, else the last placeable window the poller saw.
    pub fn target_window(&self) -> Result<WindowHandle, PlacementError> {
        let foreground = self.ws.foreground_window().unwrap_or_else(|e| {
            warn!("cannot read foreground window: {}", e);
            WindowHandle::NULL
        });
        if self.classifier.is_zonable(&self.ws, foreground) {
            return Ok(foreground);
        }
        if let Some(slot) = &self.last_active {
            let last = slot.get();
            if self.classifier.is_zonable(&self.ws, last) {
                debug!("foreground {} not placeable, using last active {}", foreground, last);
                return Ok(last);
            }
        }
        warn!("no placeable window (foreground {})", foreground);
        Err(PlacementError::NotZonable(foreground))
    }

    /// Move `window` to `layout` on the monitor `monitor_offset` steps from
    /// the one it is on.
    pub fn apply(
        &mut self,
        window: WindowHandle,
        layout: LayoutFn,
        monitor_offset: i32,
    ) -> Result<Outcome, PlacementError> {
        self.ensure_zonable(window)?;
        self.cycles.record(window);

        if log::log_enabled!(log::Level::Debug) {
            let title = self.ws.window_title(window).unwrap_or_default();
            debug!("window {} {:?}", window, title);
        }

        let visible_rect = self
            .ws
            .window_rect(window)
            .map_err(|e| PlacementError::Backend(e.to_string()))?;

        let current_monitor = self
            .ws
            .monitor_for_window(window)
            .map_err(|e| PlacementError::MonitorInfoUnavailable(e.to_string()))?;
        let target_monitor = {
            let ws = &self.ws;
            monitor::resolve_monitor(current_monitor, monitor_offset, self.monitor_passes, || {
                ws.enumerate_monitors().unwrap_or_else(|e| {
                    warn!("cannot enumerate monitors: {}", e);
                    Vec::new()
                })
            })
        };
        let display = self
            .ws
            .monitor_info(target_monitor)
            .map_err(|e| PlacementError::MonitorInfoUnavailable(e.to_string()))?;

        let extended_frame_rect = self
            .ws
            .extended_frame_bounds(window)
            .map_err(|e| PlacementError::FrameUnavailable(e.to_string()))?;
        let window_dpi = self.ws.window_dpi(window).unwrap_or_else(|e| {
            warn!("cannot read DPI of {}, assuming {}: {}", window, display.dpi, e);
            display.dpi
        });
        let frame = WindowFrame {
            visible_rect,
            extended_frame_rect,
            window_dpi,
        };

        let plan = dpi::plan(&frame, &display, layout);
        debug!("window rect  {}", frame.visible_rect);
        debug!("DWM frame    {}", frame.extended_frame_rect);
        debug!(
            "frame at {} DPI {} (window {} DPI)",
            display.dpi, plan.scaled_frame, frame.window_dpi
        );
        debug!("target       {}", plan.target);

        if plan.is_noop(visible_rect) {
            debug!("no resize");
            return Ok(Outcome::NoOp);
        }
        if !plan.target.is_valid() {
            return Err(PlacementError::DegenerateTarget(plan.target));
        }

        self.ws
            .normalize_window(window)
            .map_err(|e| PlacementError::ApplyFailed(e.to_string()))?;
        self.ws
            .set_window_rect(window, plan.target)
            .map_err(|e| PlacementError::ApplyFailed(e.to_string()))?;

        match self.ws.window_rect(window) {
            Ok(after) => debug!("after resize {}", after),
            Err(e) => debug!("cannot re-read rect of {}: {}", window, e),
        }
        Ok(Outcome::Applied(plan.target))
    }

    fn ensure_zonable(&self, window: WindowHandle) -> Result<(), PlacementError> {
        if self.classifier.is_zonable(&self.ws, window) {
            Ok(())
        } else {
            warn!("window {} is not placeable", window);
            Err(PlacementError::NotZonable(window))
        }
    }

    /// Hand `window` to the window system's own maximize.
    pub fn maximize(&mut self, window: WindowHandle) -> Result<Outcome, PlacementError> {
        self.ensure_zonable(window)?;
        self.cycles.record(window);
        self.ws
            .maximize_window(window)
            .map_err(|e| PlacementError::ApplyFailed(e.to_string()))?;
        Ok(Outcome::Maximized)
    }

    /// Flip the always-on-top style of `window`.
    pub fn toggle_topmost(&mut self, window: WindowHandle) -> Result<Outcome, PlacementError> {
        self.ensure_zonable(window)?;
        let topmost = !self
            .ws
            .is_topmost(window)
            .map_err(|e| PlacementError::Backend(e.to_string()))?;
        self.ws
            .set_topmost(window, topmost)
            .map_err(|e| PlacementError::ApplyFailed(e.to_string()))?;
        info!("{} always on top: {}", window, topmost);
        Ok(Outcome::Topmost(topmost))
    }
}

//  Tests
