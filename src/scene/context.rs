//! Per-frame context shared read-only with every stage.

use crate::atmosphere::DayNight;
use crate::perf::QualityTier;

/// Snapshot of global state for one frame.
///
/// Built once at the top of a frame after any tier or mode change has been
/// applied, then passed by reference; no stage observes a change mid-frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub frame_index: u64,
    /// Seconds since the pipeline started.
    pub elapsed: f32,
    /// Seconds since the previous frame, clamped.
    pub dt: f32,
    pub tier: QualityTier,
    pub mode: DayNight,
}

impl FrameContext {
    pub fn new(tier: QualityTier, mode: DayNight) -> Self {
        Self {
            frame_index: 0,
            elapsed: 0.0,
            dt: 0.0,
            tier,
            mode,
        }
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new(QualityTier::default(), DayNight::default())
    }
}
