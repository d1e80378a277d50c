//! Presented lighting state and GPU uniform.

use bytemuck::{Pod, Zeroable};

use super::config::LightingPreset;
use super::mode::DayNight;

// ---------------------------------------------------------------------------
// CPU-side state
// ---------------------------------------------------------------------------

/// Lighting presented to the renderer this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LightingState {
    /// Mode the state is settling toward.
    pub mode: DayNight,
    /// Parameters in effect. Equal to the mode's preset once settled.
    pub lighting: LightingPreset,
    /// Blend progress toward `mode`, 1.0 when settled.
    pub progress: f32,
}

impl LightingState {
    pub fn settled(mode: DayNight, preset: &LightingPreset) -> Self {
        Self {
            mode,
            lighting: preset.clone(),
            progress: 1.0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn uniform(&self) -> LightingUniform {
        LightingUniform::from(self)
    }
}

// ---------------------------------------------------------------------------
// GPU uniform
// ---------------------------------------------------------------------------

/// GPU-ready lighting uniform buffer.
///
/// All `vec3` fields are padded to 16-byte alignment for WGSL compatibility.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightingUniform {
    // -- Background (16 bytes) --
    pub background: [f32; 3],
    pub exposure: f32,

    // -- Fog (16 + 16 = 32 bytes) --
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub fog_enabled: u32,
    pub glow_strength: f32,
    pub emissive_enabled: u32,

    // -- Lights (3 x 16 = 48 bytes) --
    pub key_color: [f32; 3],
    pub key_intensity: f32,
    pub fill_color: [f32; 3],
    pub fill_intensity: f32,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::from(&LightingState::settled(DayNight::Day, &LightingPreset::day()))
    }
}

impl From<&LightingState> for LightingUniform {
    fn from(s: &LightingState) -> Self {
        let l = &s.lighting;
        Self {
            background: l.background,
            exposure: l.exposure,
            fog_color: l.fog.color,
            fog_near: l.fog.near,
            fog_far: l.fog.far,
            fog_enabled: l.fog.enabled as u32,
            glow_strength: l.glow_strength,
            emissive_enabled: l.emissive_enabled as u32,
            key_color: l.key_light.color,
            key_intensity: l.key_light.intensity,
            fill_color: l.fill_light.color,
            fill_intensity: l.fill_light.intensity,
            ambient_color: l.ambient.color,
            ambient_intensity: l.ambient.intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_alignment() {
        // Must be a multiple of 16 bytes for GPU buffer alignment
        let size = std::mem::size_of::<LightingUniform>();
        assert_eq!(size % 16, 0, "LightingUniform size {size} is not 16-byte aligned");
        assert_eq!(size, 96);
    }

    #[test]
    fn test_bytemuck_cast() {
        let u = LightingUniform::default();
        let bytes = bytemuck::bytes_of(&u);
        assert_eq!(bytes.len(), std::mem::size_of::<LightingUniform>());
    }

    #[test]
    fn test_from_state() {
        let state = LightingState::settled(DayNight::Night, &LightingPreset::night());
        let uniform = state.uniform();
        assert_eq!(uniform.key_intensity, state.lighting.key_light.intensity);
        assert_eq!(uniform.background, state.lighting.background);
        assert_eq!(uniform.emissive_enabled, 1);
    }
}
