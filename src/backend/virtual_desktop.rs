//! [`WindowSystem`] implementation backed by an in-memory desktop.
//!
//! The virtual desktop keeps ordered monitors, a set of windows and the
//! foreground window behind an `Arc<Mutex<_>>`, so clones share one desktop:
//! the daemon hands one clone to the [`Placer`](crate::placer::Placer) and
//! another to the foreground poller.
//!
//! Windows carry a Windows 10 style invisible resize border on their left,
//! right and bottom edges, and maximizing one remembers the rectangle it is
//! restored to.

use crate::config::{DesktopConfig, WindowSpec};
use crate::geometry::{Display, MonitorId, Rect, WindowHandle};
use crate::traits::WindowSystem;
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard};

/// Largest absolute coordinate accepted from a desktop description.
pub const COORD_LIMIT: i32 = 1 << 20;

fn check_rect(what: &str, rect: Rect) -> Result<(), VirtualDesktopError> {
    let edges = [rect.left, rect.top, rect.right, rect.bottom];
    if !rect.is_valid() || edges.iter().any(|v| v.unsigned_abs() > COORD_LIMIT.unsigned_abs()) {
        return Err(VirtualDesktopError(format!("{} out of range: {}", what, rect)));
    }
    Ok(())
}

/// Errors reported by the virtual desktop.
#[derive(Debug, thiserror::Error)]
#[error("virtual desktop error: {0}")]
pub struct VirtualDesktopError(String);

/// State of one virtual window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualWindow {
    pub class: String,
    pub title: String,
    pub rect: Rect,
    pub border: i32,
    pub dpi: u32,
    pub topmost: bool,
    pub maximized: bool,
    /// Rectangle restored when a maximized window is normalized.
    restore: Option<Rect>,
}

impl From<&WindowSpec> for VirtualWindow {
    fn from(spec: &WindowSpec) -> Self {
        Self {
            class: spec.class.clone(),
            title: spec.title.clone(),
            rect: spec.rect,
            border: spec.border,
            dpi: spec.dpi,
            topmost: spec.topmost,
            maximized: false,
            restore: None,
        }
    }
}

impl VirtualWindow {
    fn frame(&self) -> Rect {
        Rect::new(
            self.rect.left + self.border,
            self.rect.top,
            self.rect.right - self.border,
            self.rect.bottom - self.border,
        )
    }
}

#[derive(Debug, Default)]
struct Desktop {
    monitors: Vec<Display>,
    /// Kept in insertion order; handles are unique.
    windows: Vec<(WindowHandle, VirtualWindow)>,
    foreground: WindowHandle,
}

impl Desktop {
    fn window(&self, handle: WindowHandle) -> Result<&VirtualWindow, VirtualDesktopError> {
        self.windows
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, w)| w)
            .ok_or_else(|| VirtualDesktopError(format!("no window {}", handle)))
    }

    fn window_mut(
        &mut self,
        handle: WindowHandle,
    ) -> Result<&mut VirtualWindow, VirtualDesktopError> {
        self.windows
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .map(|(_, w)| w)
            .ok_or_else(|| VirtualDesktopError(format!("no window {}", handle)))
    }

    fn display(&self, id: MonitorId) -> Result<Display, VirtualDesktopError> {
        self.monitors
            .iter()
            .find(|d| d.id == id)
            .copied()
            .ok_or_else(|| VirtualDesktopError(format!("no monitor {}", id)))
    }

    /// Monitor whose work area contains the centre of `rect`, else the one
    /// nearest to it.
    fn display_for(&self, rect: Rect) -> Result<Display, VirtualDesktopError> {
        let (x, y) = rect.center();
        let distance = |d: &Display| -> i64 {
            let a = d.work_area;
            let dx = i64::from((a.left - x).max(0).max(x - a.right));
            let dy = i64::from((a.top - y).max(0).max(y - a.bottom));
            dx * dx + dy * dy
        };
        self.monitors
            .iter()
            .find(|d| d.work_area.contains(x, y))
            .or_else(|| self.monitors.iter().min_by_key(|d| distance(*d)))
            .copied()
            .ok_or_else(|| VirtualDesktopError("no monitors".into()))
    }
}

/// In-memory desktop.  Cloning yields another handle to the same desktop.
#[derive(Debug, Clone, Default)]
pub struct VirtualDesktop {
    inner: Arc<Mutex<Desktop>>,
}

impl VirtualDesktop {
    /// An empty desktop with the given monitors.
    pub fn new(monitors: Vec<Display>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Desktop {
                monitors,
                ..Desktop::default()
            })),
        }
    }

    /// Build a desktop from the `desktop` configuration section.
    pub fn from_config(config: &DesktopConfig) -> Result<Self, VirtualDesktopError> {
        if config.monitors.is_empty() {
            return Err(VirtualDesktopError("desktop has no monitors".into()));
        }
        for display in &config.monitors {
            check_rect(&format!("work area of monitor {}", display.id), display.work_area)?;
        }
        for spec in &config.windows {
            check_rect(&format!("window {}", spec.handle), spec.rect)?;
        }
        let desktop = Self::new(config.monitors.clone());
        for spec in &config.windows {
            desktop.add_window(spec.handle, VirtualWindow::from(spec))?;
        }
        if let Some(fg) = config.foreground {
            desktop.set_foreground(fg)?;
        }
        Ok(desktop)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Desktop>, VirtualDesktopError> {
        self.inner
            .lock()
            .map_err(|_| VirtualDesktopError("desktop state poisoned".into()))
    }

    pub fn add_window(
        &self,
        handle: WindowHandle,
        window: VirtualWindow,
    ) -> Result<(), VirtualDesktopError> {
        if handle.is_null() {
            return Err(VirtualDesktopError("the null handle is not a window".into()));
        }
        let mut desktop = self.lock()?;
        if desktop.windows.iter().any(|(h, _)| *h == handle) {
            return Err(VirtualDesktopError(format!("duplicate window {}", handle)));
        }
        desktop.windows.push((handle, window));
        Ok(())
    }

    /// Give focus to `handle`; the null handle clears focus.
    pub fn set_foreground(&self, handle: WindowHandle) -> Result<(), VirtualDesktopError> {
        let mut desktop = self.lock()?;
        if !handle.is_null() {
            desktop.window(handle)?;
        }
        desktop.foreground = handle;
        Ok(())
    }

    /// Snapshot of one window.
    pub fn window(&self, handle: WindowHandle) -> Result<VirtualWindow, VirtualDesktopError> {
        Ok(self.lock()?.window(handle)?.clone())
    }

    pub fn windows(&self) -> Result<Vec<WindowHandle>, VirtualDesktopError> {
        Ok(self.lock()?.windows.iter().map(|(h, _)| *h).collect())
    }
}

impl WindowSystem for VirtualDesktop {
    type Error = VirtualDesktopError;

    fn window_rect(&self, window: WindowHandle) -> Result<Rect, Self::Error> {
        Ok(self.lock()?.window(window)?.rect)
    }

    fn extended_frame_bounds(&self, window: WindowHandle) -> Result<Rect, Self::Error> {
        Ok(self.lock()?.window(window)?.frame())
    }

    fn window_dpi(&self, window: WindowHandle) -> Result<u32, Self::Error> {
        Ok(self.lock()?.window(window)?.dpi)
    }

    fn monitor_for_window(&self, window: WindowHandle) -> Result<MonitorId, Self::Error> {
        let desktop = self.lock()?;
        let rect = desktop.window(window)?.rect;
        Ok(desktop.display_for(rect)?.id)
    }

    fn monitor_info(&self, monitor: MonitorId) -> Result<Display, Self::Error> {
        self.lock()?.display(monitor)
    }

    fn enumerate_monitors(&self) -> Result<Vec<MonitorId>, Self::Error> {
        Ok(self.lock()?.monitors.iter().map(|d| d.id).collect())
    }

    fn normalize_window(&self, window: WindowHandle) -> Result<(), Self::Error> {
        let mut desktop = self.lock()?;
        let win = desktop.window_mut(window)?;
        if win.maximized {
            win.maximized = false;
            if let Some(restore) = win.restore.take() {
                win.rect = restore;
            }
            debug!("restored {} to {}", window, win.rect);
        }
        Ok(())
    }

    fn set_window_rect(&self, window: WindowHandle, rect: Rect) -> Result<(), Self::Error> {
        if !rect.is_valid() {
            return Err(VirtualDesktopError(format!("invalid rectangle {}", rect)));
        }
        self.lock()?.window_mut(window)?.rect = rect;
        Ok(())
    }

    fn maximize_window(&self, window: WindowHandle) -> Result<(), Self::Error> {
        let mut desktop = self.lock()?;
        let rect = desktop.window(window)?.rect;
        let area = desktop.display_for(rect)?.work_area;
        let win = desktop.window_mut(window)?;
        if !win.maximized {
            win.restore = Some(win.rect);
            win.maximized = true;
        }
        win.rect = Rect::new(
            area.left - win.border,
            area.top,
            area.right + win.border,
            area.bottom + win.border,
        );
        Ok(())
    }

    fn is_topmost(&self, window: WindowHandle) -> Result<bool, Self::Error> {
        Ok(self.lock()?.window(window)?.topmost)
    }

    fn set_topmost(&self, window: WindowHandle, topmost: bool) -> Result<(), Self::Error> {
        self.lock()?.window_mut(window)?.topmost = topmost;
        Ok(())
    }

    fn window_class_name(&self, window: WindowHandle) -> Result<String, Self::Error> {
        Ok(self.lock()?.window(window)?.class.clone())
    }

    fn foreground_window(&self) -> Result<WindowHandle, Self::Error> {
        Ok(self.lock()?.foreground)
    }

    fn window_title(&self, window: WindowHandle) -> Result<String, Self::Error> {
        Ok(self.lock()?.window(window)?.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, Feature};
    use crate::placer::{Outcome, Placer};

    const LEFT: MonitorId = MonitorId(1);
    const RIGHT: MonitorId = MonitorId(2);
    const EDITOR: WindowHandle = WindowHandle(0x100);
    const TASKBAR: WindowHandle = WindowHandle(0x200);

    /// A 96 DPI 1080p monitor next to a 144 DPI 1440p one.
    fn desktop_config() -> DesktopConfig {
        let json = r#"{
            "monitors": [
                { "id": 1, "work_area": { "left": 0, "top": 0, "right": 1920, "bottom": 1040 }, "dpi": 96 },
                { "id": 2, "work_area": { "left": 1920, "top": 0, "right": 4480, "bottom": 1400 }, "dpi": 144 }
            ],
            "windows": [
                { "handle": 256, "class": "Notepad", "title": "notes.txt",
                  "rect": { "left": 93, "top": 100, "right": 607, "bottom": 507 }, "border": 7 },
                { "handle": 512, "class": "Shell_TrayWnd",
                  "rect": { "left": 0, "top": 1040, "right": 1920, "bottom": 1080 } }
            ],
            "foreground": 256
        }"#;
        serde_json::from_str(json).unwrap()
    }

    fn desktop() -> VirtualDesktop {
        VirtualDesktop::from_config(&desktop_config()).unwrap()
    }

    fn invoke(name: &str) -> Command {
        Command::Invoke(Feature::parse(name).unwrap())
    }

    #[test]
    fn from_config_builds_desktop() {
        let vd = desktop();
        assert_eq!(vd.windows().unwrap(), vec![EDITOR, TASKBAR]);
        assert_eq!(vd.foreground_window().unwrap(), EDITOR);
        assert_eq!(vd.enumerate_monitors().unwrap(), vec![LEFT, RIGHT]);
        assert_eq!(vd.window_title(EDITOR).unwrap(), "notes.txt");
    }

    #[test]
    fn from_config_rejects_bad_desktops() {
        let mut cfg = desktop_config();
        cfg.foreground = Some(WindowHandle(0x999));
        assert!(VirtualDesktop::from_config(&cfg).is_err());

        let mut cfg = desktop_config();
        let dup = cfg.windows[0].clone();
        cfg.windows.push(dup);
        assert!(VirtualDesktop::from_config(&cfg).is_err());

        let mut cfg = desktop_config();
        cfg.monitors.clear();
        assert!(VirtualDesktop::from_config(&cfg).is_err());
    }

    #[test]
    fn from_config_rejects_extreme_coordinates() {
        let mut cfg = desktop_config();
        cfg.monitors[1].work_area.right = i32::MAX;
        let err = VirtualDesktop::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");

        let mut cfg = desktop_config();
        cfg.windows[0].rect = Rect::new(600, 0, 100, 100);
        assert!(VirtualDesktop::from_config(&cfg).is_err());
    }

    #[test]
    fn frame_excludes_invisible_border() {
        let vd = desktop();
        assert_eq!(
            vd.extended_frame_bounds(EDITOR).unwrap(),
            Rect::new(100, 100, 600, 500)
        );
    }

    #[test]
    fn monitor_by_centre_or_nearest() {
        let vd = desktop();
        assert_eq!(vd.monitor_for_window(EDITOR).unwrap(), LEFT);
        vd.set_window_rect(EDITOR, Rect::new(3000, 100, 3500, 600)).unwrap();
        assert_eq!(vd.monitor_for_window(EDITOR).unwrap(), RIGHT);
        // Entirely below both work areas, closer to the right one.
        vd.set_window_rect(EDITOR, Rect::new(4000, 2000, 4400, 2400)).unwrap();
        assert_eq!(vd.monitor_for_window(EDITOR).unwrap(), RIGHT);
    }

    #[test]
    fn maximize_then_normalize_restores() {
        let vd = desktop();
        let before = vd.window_rect(EDITOR).unwrap();
        vd.maximize_window(EDITOR).unwrap();
        let max = vd.window(EDITOR).unwrap();
        assert!(max.maximized);
        assert_eq!(max.rect, Rect::new(-7, 0, 1927, 1047));
        vd.normalize_window(EDITOR).unwrap();
        assert_eq!(vd.window_rect(EDITOR).unwrap(), before);
        assert!(!vd.window(EDITOR).unwrap().maximized);
    }

    #[test]
    fn rejects_unknown_windows_and_inverted_rects() {
        let vd = desktop();
        assert!(vd.window_rect(WindowHandle(0x1)).is_err());
        assert!(vd
            .set_window_rect(EDITOR, Rect::new(10, 10, 0, 0))
            .is_err());
        assert!(vd.set_foreground(WindowHandle(0x1)).is_err());
        vd.set_foreground(WindowHandle::NULL).unwrap();
        assert!(vd.foreground_window().unwrap().is_null());
    }

    //  End to end through the placer

    #[test]
    fn snap_left_keeps_visible_edge_flush() {
        let vd = desktop();
        let mut placer = Placer::new(vd.clone());
        assert_eq!(
            placer.handle(invoke("moveToLeft")).unwrap(),
            Outcome::Applied(Rect::new(-7, 0, 967, 1047))
        );
        assert_eq!(
            vd.extended_frame_bounds(EDITOR).unwrap(),
            Rect::new(0, 0, 960, 1040)
        );
    }

    #[test]
    fn next_display_scales_to_target_dpi() {
        let vd = desktop();
        let mut placer = Placer::new(vd.clone());
        placer.handle(invoke("nextDisplay")).unwrap();
        // The 500x400 frame becomes 750x600 at 144 DPI and is centred on
        // the 2560x1400 work area.
        assert_eq!(
            vd.extended_frame_bounds(EDITOR).unwrap(),
            Rect::new(2825, 400, 3575, 1000)
        );
        assert_eq!(vd.monitor_for_window(EDITOR).unwrap(), RIGHT);
    }

    #[test]
    fn maximized_window_is_normalized_before_snapping() {
        let vd = desktop();
        let mut placer = Placer::new(vd.clone());
        assert_eq!(placer.handle(invoke("maximize")).unwrap(), Outcome::Maximized);
        placer.handle(invoke("moveToRight")).unwrap();
        let win = vd.window(EDITOR).unwrap();
        assert!(!win.maximized);
        assert_eq!(win.rect, Rect::new(953, 0, 1927, 1047));
    }

    #[test]
    fn taskbar_focus_is_rejected() {
        let vd = desktop();
        vd.set_foreground(TASKBAR).unwrap();
        let mut placer = Placer::new(vd.clone());
        assert!(placer.handle(invoke("moveToLeft")).is_err());
        assert_eq!(
            vd.window_rect(TASKBAR).unwrap(),
            Rect::new(0, 1040, 1920, 1080)
        );
    }

    #[test]
    fn toggle_topmost_round_trip() {
        let vd = desktop();
        let mut placer = Placer::new(vd.clone());
        placer.handle(invoke("toggleAlwaysOnTop")).unwrap();
        assert!(vd.is_topmost(EDITOR).unwrap());
        placer.handle(invoke("toggleAlwaysOnTop")).unwrap();
        assert!(!vd.is_topmost(EDITOR).unwrap());
    }
}
