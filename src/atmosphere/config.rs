//! Day and night lighting presets.

use serde::{Deserialize, Serialize};

use super::lerp::Lerp;
use super::mode::DayNight;

/// A directional or ambient light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightParams {
    /// Linear RGB.
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Lerp for LightParams {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            color: self.color.lerp(&other.color, t),
            intensity: self.intensity.lerp(&other.intensity, t),
        }
    }
}

/// Linear distance fog.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FogParams {
    pub enabled: bool,
    pub color: [f32; 3],
    /// Distance where fog starts.
    pub near: f32,
    /// Distance where fog is opaque.
    pub far: f32,
}

/// Every mode-dependent parameter, swapped as one unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightingPreset {
    pub background: [f32; 3],
    pub fog: FogParams,
    pub key_light: LightParams,
    pub fill_light: LightParams,
    pub ambient: LightParams,
    /// Whether glow/emissive materials are lit.
    pub emissive_enabled: bool,
    /// Multiplier on per-entity emissive strength.
    pub glow_strength: f32,
    pub exposure: f32,
}

impl LightingPreset {
    pub fn day() -> Self {
        Self {
            background: [0.72, 0.84, 0.95],
            fog: FogParams {
                enabled: true,
                color: [0.72, 0.84, 0.95],
                near: 40.0,
                far: 160.0,
            },
            key_light: LightParams { color: [1.0, 0.97, 0.9], intensity: 1.2 },
            fill_light: LightParams { color: [0.75, 0.85, 1.0], intensity: 0.4 },
            ambient: LightParams { color: [0.9, 0.9, 0.95], intensity: 0.6 },
            emissive_enabled: false,
            glow_strength: 0.0,
            exposure: 1.0,
        }
    }

    pub fn night() -> Self {
        Self {
            background: [0.02, 0.03, 0.08],
            fog: FogParams {
                enabled: true,
                color: [0.03, 0.04, 0.1],
                near: 20.0,
                far: 110.0,
            },
            // Moonlight
            key_light: LightParams { color: [0.55, 0.62, 0.9], intensity: 0.25 },
            fill_light: LightParams { color: [0.3, 0.3, 0.55], intensity: 0.15 },
            ambient: LightParams { color: [0.2, 0.22, 0.35], intensity: 0.2 },
            emissive_enabled: true,
            glow_strength: 1.0,
            exposure: 1.1,
        }
    }

    /// Whole-set blend toward `target`.
    ///
    /// Continuous parameters interpolate with one shared factor; discrete
    /// flags always come from `target`, so they switch together with the mode.
    pub fn blend(&self, target: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            background: self.background.lerp(&target.background, t),
            fog: FogParams {
                enabled: target.fog.enabled,
                color: self.fog.color.lerp(&target.fog.color, t),
                near: self.fog.near.lerp(&target.fog.near, t),
                far: self.fog.far.lerp(&target.fog.far, t),
            },
            key_light: self.key_light.lerp(&target.key_light, t),
            fill_light: self.fill_light.lerp(&target.fill_light, t),
            ambient: self.ambient.lerp(&target.ambient, t),
            emissive_enabled: target.emissive_enabled,
            glow_strength: self.glow_strength.lerp(&target.glow_strength, t),
            exposure: self.exposure.lerp(&target.exposure, t),
        }
    }
}

/// Day/night controller configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    pub initial: DayNight,
    /// Seconds to blend between presets; 0 swaps on the next frame.
    pub transition_seconds: f32,
    pub day: LightingPreset,
    pub night: LightingPreset,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            initial: DayNight::Day,
            transition_seconds: 0.0,
            day: LightingPreset::day(),
            night: LightingPreset::night(),
        }
    }
}

impl ModeConfig {
    pub fn preset(&self, mode: DayNight) -> &LightingPreset {
        match mode {
            DayNight::Day => &self.day,
            DayNight::Night => &self.night,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ() {
        let day = LightingPreset::day();
        let night = LightingPreset::night();
        assert_ne!(day.background, night.background);
        assert!(day.key_light.intensity > night.key_light.intensity);
        assert!(!day.emissive_enabled);
        assert!(night.emissive_enabled);
    }

    #[test]
    fn test_blend_endpoints() {
        let day = LightingPreset::day();
        let night = LightingPreset::night();
        let start = day.blend(&night, 0.0);
        assert_eq!(start.background, day.background);
        assert_eq!(start.key_light, day.key_light);
        // Flags already belong to the target
        assert!(start.emissive_enabled);

        let end = day.blend(&night, 1.0);
        assert_eq!(end.key_light.intensity, night.key_light.intensity);
    }

    #[test]
    fn test_blend_is_uniform_across_fields() {
        let day = LightingPreset::day();
        let night = LightingPreset::night();
        let mid = day.blend(&night, 0.5);
        let expect = |a: f32, b: f32| a + (b - a) * 0.5;
        assert_eq!(mid.key_light.intensity, expect(day.key_light.intensity, night.key_light.intensity));
        assert_eq!(mid.fog.far, expect(day.fog.far, night.fog.far));
        assert_eq!(mid.exposure, expect(day.exposure, night.exposure));
    }

    #[test]
    fn test_config_roundtrip_json() {
        let cfg = ModeConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ModeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
