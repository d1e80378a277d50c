//! Vigil - adaptive-quality rendering core for large entity scenes
//!
//! Measures frame rate, picks a quality tier with hysteresis, and derives
//! per-entity detail, procedural textures, ambient animation and day/night
//! lighting from it. [`scene::AdaptivePipeline`] drives everything once per
//! frame.

pub mod core;
pub mod math;
pub mod perf;
pub mod variation;
pub mod texture;
pub mod lod;
pub mod animation;
pub mod atmosphere;
pub mod scene;

pub use crate::core::{Camera, Error};
pub use scene::{AdaptivePipeline, FrameOutput, SceneConfig};
