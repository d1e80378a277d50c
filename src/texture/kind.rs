//! Texture kinds and cache keys.

use serde::{Deserialize, Serialize};

use crate::atmosphere::DayNight;
use crate::perf::QualityTier;

/// Procedurally synthesized surface families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureKind {
    /// Grass and soil with scattered grass patches.
    Ground,
    /// Tree bark with vertical line grain.
    Bark,
    /// Sky backdrop with clouds by day, stars by night.
    Sky,
    /// Screen-edge darkening overlay.
    Vignette,
}

impl TextureKind {
    pub const ALL: [TextureKind; 4] = [
        TextureKind::Ground,
        TextureKind::Bark,
        TextureKind::Sky,
        TextureKind::Vignette,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextureKind::Ground => "ground",
            TextureKind::Bark => "bark",
            TextureKind::Sky => "sky",
            TextureKind::Vignette => "vignette",
        }
    }

    /// Fixed per-kind seed so output is reproducible.
    pub fn seed(self) -> u32 {
        match self {
            TextureKind::Ground => 1009,
            TextureKind::Bark => 2017,
            TextureKind::Sky => 3041,
            TextureKind::Vignette => 4051,
        }
    }

    /// Size relative to `TextureConfig::base_size`.
    pub fn size_factor(self) -> f32 {
        match self {
            TextureKind::Ground => 1.0,
            TextureKind::Bark | TextureKind::Sky | TextureKind::Vignette => 0.5,
        }
    }

    /// Scattered features at High tier (grass patches, bark lines, clouds or stars).
    pub fn base_scatter(self, mode: DayNight) -> usize {
        match (self, mode) {
            (TextureKind::Ground, _) => 400,
            (TextureKind::Bark, _) => 160,
            (TextureKind::Sky, DayNight::Day) => 24,
            (TextureKind::Sky, DayNight::Night) => 300,
            (TextureKind::Vignette, _) => 0,
        }
    }

    /// Flat color used when no drawing surface is available.
    pub fn flat_color(self, mode: DayNight) -> [u8; 4] {
        match (self, mode) {
            (TextureKind::Ground, DayNight::Day) => [84, 112, 58, 255],
            (TextureKind::Ground, DayNight::Night) => [22, 32, 28, 255],
            (TextureKind::Bark, DayNight::Day) => [92, 66, 44, 255],
            (TextureKind::Bark, DayNight::Night) => [34, 26, 22, 255],
            (TextureKind::Sky, DayNight::Day) => [184, 214, 242, 255],
            (TextureKind::Sky, DayNight::Night) => [6, 8, 22, 255],
            (TextureKind::Vignette, _) => [0, 0, 0, 0],
        }
    }
}

impl std::fmt::Display for TextureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Cache key: one bitmap per kind, mode and tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureKey {
    pub kind: TextureKind,
    pub mode: DayNight,
    pub tier: QualityTier,
}

impl TextureKey {
    pub fn new(kind: TextureKind, mode: DayNight, tier: QualityTier) -> Self {
        Self { kind, mode, tier }
    }

    /// Scatter count scaled by the tier.
    ///
    /// ```
    /// use vigil::atmosphere::DayNight;
    /// use vigil::perf::QualityTier;
    /// use vigil::texture::{TextureKey, TextureKind};
    ///
    /// let grass = |tier| TextureKey::new(TextureKind::Ground, DayNight::Day, tier).scatter_count();
    /// assert_eq!(grass(QualityTier::High), 400);
    /// assert_eq!(grass(QualityTier::Medium), 200);
    /// assert_eq!(grass(QualityTier::Low), 100);
    /// ```
    pub fn scatter_count(&self) -> usize {
        let base = self.kind.base_scatter(self.mode) as f32;
        (base * self.tier.budget().scatter_scale).round() as usize
    }

    /// Square bitmap edge in pixels.
    pub fn size(&self, base_size: u32, min_size: u32) -> u32 {
        let scaled = base_size as f32 * self.kind.size_factor() * self.tier.budget().resolution_scale;
        (scaled.round() as u32).max(min_size)
    }
}

impl std::fmt::Display for TextureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.kind, self.mode, self.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_shrinks_with_tier() {
        let size = |tier| TextureKey::new(TextureKind::Ground, DayNight::Day, tier).size(512, 16);
        assert_eq!(size(QualityTier::High), 512);
        assert_eq!(size(QualityTier::Medium), 256);
        assert_eq!(size(QualityTier::Low), 128);
    }

    #[test]
    fn test_min_size() {
        let key = TextureKey::new(TextureKind::Sky, DayNight::Night, QualityTier::Low);
        assert_eq!(key.size(32, 16), 16);
    }

    #[test]
    fn test_sky_scatter_depends_on_mode() {
        let day = TextureKey::new(TextureKind::Sky, DayNight::Day, QualityTier::High);
        let night = TextureKey::new(TextureKind::Sky, DayNight::Night, QualityTier::High);
        assert!(night.scatter_count() > day.scatter_count());
    }

    #[test]
    fn test_seeds_distinct() {
        let mut seeds: Vec<_> = TextureKind::ALL.iter().map(|k| k.seed()).collect();
        seeds.dedup();
        assert_eq!(seeds.len(), TextureKind::ALL.len());
    }
}
