//! Frame-rate sampling and adaptive quality selection.
//!
//! [`PerformanceSampler`] records instantaneous fps every frame;
//! [`QualityController`] turns its rolling average into a [`QualityTier`] on
//! a slower cadence, with hysteresis. [`classify_device`] picks the starting
//! tier from static hints before any frame has been measured.

pub mod config;
pub mod controller;
pub mod device;
pub mod sampler;
pub mod tier;

pub use config::{QualityConfig, SamplerConfig};
pub use controller::{ChangeReason, QualityController, TierChange};
pub use device::{classify_device, DeviceHints};
pub use sampler::{FpsWindow, PerformanceSampler};
pub use tier::{QualityTier, TierBudget};
