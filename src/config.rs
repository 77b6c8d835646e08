//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/winsnap/config.json`; `--config <path>` overrides it.
//! Every section is optional so the file can grow without breaking older
//! files.
//!
//! # Example
//!
//! ```json
//! {
//!   "placement": {
//!     "poll_interval_ms": 200,
//!     "monitor_search_passes": 20,
//!     "extra_system_classes": ["MyOverlayWnd"]
//!   },
//!   "desktop": {
//!     "monitors": [
//!       { "id": 1, "work_area": { "left": 0, "top": 0, "right": 1920, "bottom": 1040 }, "dpi": 96 }
//!     ],
//!     "windows": [
//!       { "handle": 4096, "class": "Notepad", "title": "notes.txt",
//!         "rect": { "left": 100, "top": 100, "right": 900, "bottom": 700 }, "border": 7 }
//!     ],
//!     "foreground": 4096
//!   }
//! }
//! ```

use crate::geometry::{Display, MonitorId, Rect, WindowHandle, BASE_DPI};
use crate::monitor::DEFAULT_MAX_PASSES;
use crate::poller::DEFAULT_POLL_INTERVAL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
///
/// Every field is optional; a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Placement engine tuning.
    #[serde(default)]
    pub placement: PlacementConfig,

    /// Layout of the in-memory desktop the daemon drives.
    #[serde(default)]
    pub desktop: DesktopConfig,
}

/// Placement engine tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// How often the foreground window is polled (ms).
    pub poll_interval_ms: u64,
    /// Cap on monitor re-enumeration passes when hopping displays.
    pub monitor_search_passes: usize,
    /// Window classes never snapped, on top of the built-in shell classes.
    pub extra_system_classes: Vec<String>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            monitor_search_passes: DEFAULT_MAX_PASSES,
            extra_system_classes: Vec::new(),
        }
    }
}

impl PlacementConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Monitors and windows of the virtual desktop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Monitors in enumeration order.
    pub monitors: Vec<Display>,
    pub windows: Vec<WindowSpec>,
    /// Window that has focus at start-up.
    pub foreground: Option<WindowHandle>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            monitors: vec![Display {
                id: MonitorId(1),
                work_area: Rect::new(0, 0, 1920, 1040),
                dpi: BASE_DPI,
            }],
            windows: Vec::new(),
            foreground: None,
        }
    }
}

/// One window of the virtual desktop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub handle: WindowHandle,
    pub class: String,
    #[serde(default)]
    pub title: String,
    /// Outer rectangle, invisible border included.
    pub rect: Rect,
    /// Invisible resize border on the left, right and bottom edges.
    #[serde(default)]
    pub border: i32,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default)]
    pub topmost: bool,
}

fn default_dpi() -> u32 {
    BASE_DPI
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/winsnap/config.json`, falling back to
    /// `$HOME/.config`.  `None` when neither variable is set.
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("winsnap").join("config.json"))
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
