//! Detail levels and tier-scaled distance thresholds.

use serde::{Deserialize, Serialize};

use crate::perf::QualityTier;

/// Per-entity detail decision, ordered `Culled < Low < Medium < High`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LodLevel {
    #[default]
    Culled,
    Low,
    Medium,
    High,
}

impl LodLevel {
    pub const ALL: [LodLevel; 4] = [LodLevel::Culled, LodLevel::Low, LodLevel::Medium, LodLevel::High];

    #[inline]
    pub fn is_visible(self) -> bool {
        self != LodLevel::Culled
    }

    pub fn name(self) -> &'static str {
        match self {
            LodLevel::Culled => "culled",
            LodLevel::Low => "low",
            LodLevel::Medium => "medium",
            LodLevel::High => "high",
        }
    }
}

impl std::fmt::Display for LodLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Distance bands, in world units, for the High tier.
///
/// Lower tiers contract every band by the tier's `lod_scale`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodThresholds {
    /// Below this distance: High.
    pub high: f32,
    /// Below this distance: Medium.
    pub medium: f32,
    /// Below this distance: Low. At or beyond: Culled.
    pub low: f32,
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self {
            high: 15.0,
            medium: 35.0,
            low: 60.0,
        }
    }
}

impl LodThresholds {
    /// Thresholds contracted for `tier`.
    pub fn for_tier(&self, tier: QualityTier) -> Self {
        let s = tier.budget().lod_scale;
        Self {
            high: self.high * s,
            medium: self.medium * s,
            low: self.low * s,
        }
    }

    /// Distance at and beyond which entities are culled.
    #[inline]
    pub fn cull_distance(&self) -> f32 {
        self.low
    }

    /// Level for a camera distance.
    ///
    /// ```
    /// use vigil::lod::{LodLevel, LodThresholds};
    ///
    /// let t = LodThresholds::default();
    /// assert_eq!(t.classify(10.0), LodLevel::High);
    /// assert_eq!(t.classify(15.0), LodLevel::Medium);
    /// assert_eq!(t.classify(40.0), LodLevel::Low);
    /// assert_eq!(t.classify(60.0), LodLevel::Culled);
    /// ```
    pub fn classify(&self, distance: f32) -> LodLevel {
        if !distance.is_finite() {
            LodLevel::Culled
        } else if distance < self.high {
            LodLevel::High
        } else if distance < self.medium {
            LodLevel::Medium
        } else if distance < self.low {
            LodLevel::Low
        } else {
            LodLevel::Culled
        }
    }

    /// Bands must be increasing and positive.
    pub fn is_valid(&self) -> bool {
        self.high > 0.0 && self.high <= self.medium && self.medium <= self.low && self.low.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LodLevel::Culled < LodLevel::Low);
        assert!(LodLevel::Medium < LodLevel::High);
        assert!(!LodLevel::Culled.is_visible());
    }

    #[test]
    fn test_tier_contracts_bands() {
        let base = LodThresholds::default();
        assert_eq!(base.for_tier(QualityTier::High), base);

        let medium = base.for_tier(QualityTier::Medium);
        assert!((medium.low - 45.0).abs() < 1e-5);

        let low = base.for_tier(QualityTier::Low);
        assert!((low.high - 7.5).abs() < 1e-5);
        assert!((low.cull_distance() - 30.0).abs() < 1e-5);
        assert_eq!(low.classify(40.0), LodLevel::Culled);
    }

    #[test]
    fn test_non_finite_distance_culled() {
        let t = LodThresholds::default();
        assert_eq!(t.classify(f32::NAN), LodLevel::Culled);
        assert_eq!(t.classify(f32::INFINITY), LodLevel::Culled);
    }

    #[test]
    fn test_validity() {
        assert!(LodThresholds::default().is_valid());
        let bad = LodThresholds { high: 50.0, medium: 20.0, low: 60.0 };
        assert!(!bad.is_valid());
    }
}
