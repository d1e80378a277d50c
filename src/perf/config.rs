//! Sampler and quality-controller configuration.

use serde::{Deserialize, Serialize};

/// Performance sampler parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Number of instantaneous fps samples kept in the rolling window.
    pub window: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { window: 60 }
    }
}

/// Quality tier thresholds and hysteresis.
///
/// The constants are tuning knobs rather than a compatibility contract; the
/// defaults keep a device hovering around one boundary from flipping tiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Average fps at or above which the High tier is proposed.
    pub high_fps: f32,
    /// Average fps at or above which Medium is proposed (below it: Low).
    pub medium_fps: f32,
    /// Below this average a downgrade is committed without confirmation.
    pub emergency_fps: f32,
    /// Consecutive same-direction proposals needed to commit a change.
    pub confirmations: u32,
    /// Wall-clock interval between evaluations.
    pub eval_interval_ms: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            high_fps: 55.0,
            medium_fps: 35.0,
            emergency_fps: 20.0,
            confirmations: 2,
            eval_interval_ms: 2000.0,
        }
    }
}
