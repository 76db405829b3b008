//! Per-process activation settings.

use serde::{Deserialize, Serialize};
use slick_core::{ModelTime, TimeRange};

/// On/off switch and active window for one weathering process.
///
/// A process is active at `t` when it is on and `t` lies in
/// `[active_range.start, active_range.end)`. Missing bounds are unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeathererConfig {
    /// Whether the process participates in the run at all.
    pub on: bool,
    /// Simulated times during which the process applies flux.
    pub active_range: TimeRange,
}

impl WeathererConfig {
    /// A switched-off process.
    pub fn off() -> Self {
        Self {
            on: false,
            ..Self::default()
        }
    }

    /// An enabled process restricted to `active_range`.
    pub fn windowed(active_range: TimeRange) -> Self {
        Self {
            on: true,
            active_range,
        }
    }

    /// Whether the process applies flux at `t`.
    pub fn is_active_at(&self, t: ModelTime) -> bool {
        self.on && self.active_range.contains(t)
    }
}

impl Default for WeathererConfig {
    fn default() -> Self {
        Self {
            on: true,
            active_range: TimeRange::ALWAYS,
        }
    }
}
