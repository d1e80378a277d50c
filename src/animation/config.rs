//! Ambient animation configuration

use serde::{Deserialize, Serialize};

/// Tunables for ambient effects. Counts come from the tier budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Sway oscillation, radians per second.
    pub wind_frequency: f32,
    /// Peak sway angle in radians.
    pub wind_amplitude: f32,
    /// Fog layer drift, world units per second on XZ.
    pub fog_drift: [f32; 2],
    /// Seconds between re-choosing which lights flicker.
    pub flicker_reshuffle_secs: f32,
    /// Fraction of intensity a flickering light can lose.
    pub flicker_depth: f32,
    /// Half extent of the square area particles roam, centered on the origin.
    pub particle_extent: f32,
    /// Min/max particle height above ground.
    pub particle_height: [f32; 2],
    /// Particle orbit speed, radians per second.
    pub particle_speed: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            wind_frequency: 0.8,
            wind_amplitude: 0.035,
            fog_drift: [0.4, 0.15],
            flicker_reshuffle_secs: 1.5,
            flicker_depth: 0.35,
            particle_extent: 40.0,
            particle_height: [0.3, 3.0],
            particle_speed: 0.6,
        }
    }
}
