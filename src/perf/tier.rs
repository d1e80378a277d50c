//! Quality tiers and the per-tier work budgets every stage reads.

use serde::{Deserialize, Serialize};

use super::config::QualityConfig;

/// Global rendering quality, ordered `Low < Medium < High`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    #[default]
    High,
}

/// Work limits for one tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierBudget {
    /// Multiplier on LOD distance thresholds.
    pub lod_scale: f32,
    /// Most entities allowed at full detail (point light + decorations) at once.
    pub full_detail_cap: usize,
    /// Ambient particles (fireflies, dust) animated per frame.
    pub particles: usize,
    /// Lights allowed to flicker at once.
    pub flicker_lights: usize,
    /// Whether fog is simulated at all.
    pub fog: bool,
    /// Multiplier on procedural texture scatter counts.
    pub scatter_scale: f32,
    /// Multiplier on procedural texture resolution.
    pub resolution_scale: f32,
    /// Upper bound on the device pixel ratio used for rendering.
    pub pixel_ratio_cap: f32,
}

const HIGH_BUDGET: TierBudget = TierBudget {
    lod_scale: 1.0,
    full_detail_cap: 48,
    particles: 120,
    flicker_lights: 24,
    fog: true,
    scatter_scale: 1.0,
    resolution_scale: 1.0,
    pixel_ratio_cap: 2.0,
};

const MEDIUM_BUDGET: TierBudget = TierBudget {
    lod_scale: 0.75,
    full_detail_cap: 24,
    particles: 60,
    flicker_lights: 12,
    fog: true,
    scatter_scale: 0.5,
    resolution_scale: 0.5,
    pixel_ratio_cap: 1.5,
};

const LOW_BUDGET: TierBudget = TierBudget {
    lod_scale: 0.5,
    full_detail_cap: 8,
    particles: 20,
    flicker_lights: 4,
    fog: false,
    scatter_scale: 0.25,
    resolution_scale: 0.25,
    pixel_ratio_cap: 1.0,
};

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [QualityTier::Low, QualityTier::Medium, QualityTier::High];

    /// Map an average frame rate onto a tier.
    ///
    /// ```
    /// use vigil::perf::{QualityConfig, QualityTier};
    ///
    /// let cfg = QualityConfig::default();
    /// assert_eq!(QualityTier::from_fps(60.0, &cfg), QualityTier::High);
    /// assert_eq!(QualityTier::from_fps(55.0, &cfg), QualityTier::High);
    /// assert_eq!(QualityTier::from_fps(40.0, &cfg), QualityTier::Medium);
    /// assert_eq!(QualityTier::from_fps(34.9, &cfg), QualityTier::Low);
    /// ```
    pub fn from_fps(fps: f32, config: &QualityConfig) -> Self {
        if fps >= config.high_fps {
            QualityTier::High
        } else if fps >= config.medium_fps {
            QualityTier::Medium
        } else {
            QualityTier::Low
        }
    }

    pub fn budget(self) -> &'static TierBudget {
        match self {
            QualityTier::High => &HIGH_BUDGET,
            QualityTier::Medium => &MEDIUM_BUDGET,
            QualityTier::Low => &LOW_BUDGET,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityTier::High => "high",
            QualityTier::Medium => "medium",
            QualityTier::Low => "low",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(QualityTier::Low < QualityTier::Medium);
        assert!(QualityTier::Medium < QualityTier::High);
        assert_eq!(QualityTier::default(), QualityTier::High);
    }

    #[test]
    fn test_budgets_shrink_with_tier() {
        let [low, medium, high] = QualityTier::ALL.map(|t| *t.budget());
        assert!(low.full_detail_cap < medium.full_detail_cap);
        assert!(medium.full_detail_cap < high.full_detail_cap);
        assert!(low.lod_scale < medium.lod_scale && medium.lod_scale < high.lod_scale);
        assert!(low.particles < high.particles);
        assert!(low.flicker_lights < high.flicker_lights);
        assert!(!low.fog);
        assert!(high.fog);
    }

    #[test]
    fn test_boundaries() {
        let cfg = QualityConfig::default();
        assert_eq!(QualityTier::from_fps(54.99, &cfg), QualityTier::Medium);
        assert_eq!(QualityTier::from_fps(35.0, &cfg), QualityTier::Medium);
        assert_eq!(QualityTier::from_fps(0.0, &cfg), QualityTier::Low);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&QualityTier::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let tier: QualityTier = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(tier, QualityTier::Low);
    }
}
