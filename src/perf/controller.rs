//! Hysteresis-based quality tier controller.
//!
//! Evaluated on a coarse wall-clock cadence (not per frame) with the sampler's
//! rolling average. A proposed change must repeat on consecutive evaluations
//! before it is committed, except for severe drops which downgrade at once.

use std::cmp::Ordering;

use super::config::QualityConfig;
use super::tier::QualityTier;

/// Why a tier change was committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeReason {
    /// The proposal held for the configured number of evaluations.
    Sustained,
    /// Average fps fell below the emergency threshold.
    Emergency,
}

/// A committed tier change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierChange {
    pub from: QualityTier,
    pub to: QualityTier,
    pub reason: ChangeReason,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    direction: Ordering,
    streak: u32,
}

/// Owns the current [`QualityTier`]; the only writer of it.
#[derive(Clone, Debug)]
pub struct QualityController {
    config: QualityConfig,
    tier: QualityTier,
    pending: Option<Pending>,
}

impl QualityController {
    pub fn new(config: QualityConfig, initial: QualityTier) -> Self {
        Self {
            config,
            tier: initial,
            pending: None,
        }
    }

    #[inline]
    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Whether a change is waiting for confirmation.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one evaluation cycle. Returns the change if one was committed.
    pub fn evaluate(&mut self, average_fps: f32) -> Option<TierChange> {
        // No samples yet (or garbage): never act on it
        if !average_fps.is_finite() || average_fps <= 0.0 {
            return None;
        }

        let proposed = QualityTier::from_fps(average_fps, &self.config);
        let direction = proposed.cmp(&self.tier);

        if direction == Ordering::Equal {
            self.pending = None;
            return None;
        }

        if direction == Ordering::Less && average_fps < self.config.emergency_fps {
            return Some(self.commit(proposed, ChangeReason::Emergency));
        }

        let streak = match self.pending {
            Some(p) if p.direction == direction => p.streak + 1,
            _ => 1,
        };

        if streak >= self.config.confirmations.max(1) {
            Some(self.commit(proposed, ChangeReason::Sustained))
        } else {
            log::debug!(
                "quality: {} -> {} proposed at {:.1} fps ({}/{})",
                self.tier, proposed, average_fps, streak, self.config.confirmations
            );
            self.pending = Some(Pending { direction, streak });
            None
        }
    }

    /// Re-initialize (scene reload); drops any pending proposal.
    pub fn reset(&mut self, initial: QualityTier) {
        self.tier = initial;
        self.pending = None;
    }

    fn commit(&mut self, to: QualityTier, reason: ChangeReason) -> TierChange {
        let change = TierChange {
            from: self.tier,
            to,
            reason,
        };
        self.tier = to;
        self.pending = None;
        log::info!("quality tier {} -> {} ({:?})", change.from, change.to, reason);
        change
    }
}

impl Default for QualityController {
    fn default() -> Self {
        Self::new(QualityConfig::default(), QualityTier::High)
    }
}
