//! Ambient animation: wind sway, fog drift, particles, light flicker and
//! day/night transitions, advanced once per frame by [`AnimationScheduler`].

pub mod config;
pub mod effects;
pub mod scheduler;

pub use config::AnimationConfig;
pub use effects::{LightFlicker, Particle, ParticleKind, SwayParams};
pub use scheduler::{AnimationFrame, AnimationScheduler, EffectBudget};
