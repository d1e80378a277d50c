//! Day/night lighting.
//!
//! [`DayNightController`] is a two-state machine over [`DayNight`]. Every
//! mode-dependent parameter lives in one [`LightingPreset`], so a toggle
//! replaces the whole set at once and toggling twice restores the original
//! values bit for bit. An optional transition blends the whole set with a
//! single factor and snaps to the exact preset when it completes.

pub mod config;
pub mod fog;
pub mod lerp;
pub mod mode;
pub mod state;

// Re-exports
pub use config::{FogParams, LightParams, LightingPreset, ModeConfig};
pub use fog::fog_factor;
pub use lerp::Lerp;
pub use mode::DayNight;
pub use state::{LightingState, LightingUniform};

/// Blend in progress from a snapshot toward the current mode's preset.
#[derive(Clone, Debug)]
struct Transition {
    from: LightingPreset,
    elapsed: f32,
    duration: f32,
}

// ---------------------------------------------------------------------------
// DayNightController
// ---------------------------------------------------------------------------

/// Owns the mode flag and the lighting derived from it.
pub struct DayNightController {
    config: ModeConfig,
    mode: DayNight,
    transition: Option<Transition>,
    state: LightingState,
}

impl DayNightController {
    pub fn new(config: ModeConfig) -> Self {
        let mode = config.initial;
        let state = LightingState::settled(mode, config.preset(mode));
        Self {
            config,
            mode,
            transition: None,
            state,
        }
    }

    pub fn mode(&self) -> DayNight {
        self.mode
    }

    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    pub fn state(&self) -> &LightingState {
        &self.state
    }

    pub fn uniform(&self) -> LightingUniform {
        self.state.uniform()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Flip the mode. Returns the new mode.
    pub fn toggle(&mut self) -> DayNight {
        let previous = self.mode;
        self.mode = self.mode.toggled();
        let target = self.config.preset(self.mode);

        let duration = self.config.transition_seconds;
        if duration > 0.0 && duration.is_finite() {
            // Start from what is on screen, which may itself be mid-blend.
            let from = self.state.lighting.clone();
            self.state = LightingState {
                mode: self.mode,
                lighting: from.blend(target, 0.0),
                progress: 0.0,
            };
            self.transition = Some(Transition {
                from,
                elapsed: 0.0,
                duration,
            });
        } else {
            self.transition = None;
            self.state = LightingState::settled(self.mode, target);
        }

        log::info!("Mode {} -> {}", previous, self.mode);
        self.mode
    }

    /// Switch to `mode` if not already there.
    pub fn set_mode(&mut self, mode: DayNight) -> bool {
        if mode == self.mode {
            return false;
        }
        self.toggle();
        true
    }

    /// Advance an in-progress transition by `dt` seconds.
    ///
    /// Returns the blend progress, 1.0 when settled.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let Some(transition) = self.transition.as_mut() else {
            return 1.0;
        };
        if dt.is_finite() && dt > 0.0 {
            transition.elapsed += dt;
        }

        let t = transition.elapsed / transition.duration;
        let target = self.config.preset(self.mode);
        if t >= 1.0 {
            self.state = LightingState::settled(self.mode, target);
            self.transition = None;
            log::debug!("Mode transition to {} complete", self.mode);
        } else {
            self.state = LightingState {
                mode: self.mode,
                lighting: transition.from.blend(target, t),
                progress: t,
            };
        }
        self.state.progress
    }

    /// Replace presets; the current mode is kept and presented settled.
    pub fn reconfigure(&mut self, config: ModeConfig) {
        self.config = config;
        self.transition = None;
        self.state = LightingState::settled(self.mode, self.config.preset(self.mode));
    }
}

impl Default for DayNightController {
    fn default() -> Self {
        Self::new(ModeConfig::default())
    }
}
