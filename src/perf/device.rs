//! Static device-capability hints read once at startup.

use serde::{Deserialize, Serialize};

use super::tier::QualityTier;

/// Capability hints supplied by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceHints {
    /// Logical CPU cores (`navigator.hardwareConcurrency` or equivalent).
    pub cores: u32,
    /// Approximate device memory in GB.
    pub memory_gb: f32,
    pub is_mobile: bool,
    /// Viewport size in CSS / logical pixels.
    pub viewport: [u32; 2],
    pub device_pixel_ratio: f32,
}

impl Default for DeviceHints {
    fn default() -> Self {
        Self {
            cores: 4,
            memory_gb: 4.0,
            is_mobile: false,
            viewport: [1280, 720],
            device_pixel_ratio: 1.0,
        }
    }
}

impl DeviceHints {
    /// Initial tier before any frame has been measured.
    pub fn classify(&self) -> QualityTier {
        classify_device(self.cores, self.memory_gb, self.is_mobile)
    }

    /// Pixel ratio to render at: the device ratio, capped by the tier.
    pub fn render_pixel_ratio(&self, tier: QualityTier) -> f32 {
        let dpr = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        dpr.min(tier.budget().pixel_ratio_cap)
    }

    /// Backbuffer size in physical pixels for the given tier.
    pub fn render_size(&self, tier: QualityTier) -> [u32; 2] {
        let ratio = self.render_pixel_ratio(tier);
        [
            ((self.viewport[0] as f32 * ratio).round() as u32).max(1),
            ((self.viewport[1] as f32 * ratio).round() as u32).max(1),
        ]
    }
}

/// One-shot classification of a device from static hints.
///
/// ```
/// use vigil::perf::{classify_device, QualityTier};
///
/// assert_eq!(classify_device(8, 16.0, true), QualityTier::Low);   // mobile
/// assert_eq!(classify_device(2, 16.0, false), QualityTier::Low);  // few cores
/// assert_eq!(classify_device(8, 8.0, false), QualityTier::High);
/// assert_eq!(classify_device(6, 8.0, false), QualityTier::Medium);
/// ```
pub fn classify_device(cores: u32, memory_gb: f32, is_mobile: bool) -> QualityTier {
    if is_mobile || cores < 4 || memory_gb < 4.0 {
        QualityTier::Low
    } else if cores >= 8 && memory_gb >= 8.0 {
        QualityTier::High
    } else {
        QualityTier::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_memory_is_low() {
        assert_eq!(classify_device(16, 2.0, false), QualityTier::Low);
    }

    #[test]
    fn test_default_hints_are_medium() {
        assert_eq!(DeviceHints::default().classify(), QualityTier::Medium);
    }

    #[test]
    fn test_pixel_ratio_capped_by_tier() {
        let hints = DeviceHints {
            device_pixel_ratio: 3.0,
            ..Default::default()
        };
        assert_eq!(hints.render_pixel_ratio(QualityTier::High), 2.0);
        assert_eq!(hints.render_pixel_ratio(QualityTier::Medium), 1.5);
        assert_eq!(hints.render_pixel_ratio(QualityTier::Low), 1.0);
    }

    #[test]
    fn test_bad_pixel_ratio_falls_back_to_one() {
        let hints = DeviceHints {
            device_pixel_ratio: f32::NAN,
            ..Default::default()
        };
        assert_eq!(hints.render_pixel_ratio(QualityTier::High), 1.0);
    }

    #[test]
    fn test_render_size() {
        let hints = DeviceHints {
            viewport: [800, 600],
            device_pixel_ratio: 2.0,
            ..Default::default()
        };
        assert_eq!(hints.render_size(QualityTier::High), [1600, 1200]);
        assert_eq!(hints.render_size(QualityTier::Low), [800, 600]);
    }
}
