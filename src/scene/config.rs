//! Scene configuration: every tunable in one serde document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::AnimationConfig;
use crate::atmosphere::ModeConfig;
use crate::core::types::Result;
use crate::core::Error;
use crate::lod::LodThresholds;
use crate::perf::{DeviceHints, QualityConfig, QualityTier, SamplerConfig};
use crate::texture::TextureConfig;

/// Configuration for an adaptive scene
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Host capabilities. Without hints the scene starts at High.
    pub device: Option<DeviceHints>,
    pub sampler: SamplerConfig,
    pub quality: QualityConfig,
    pub lod: LodThresholds,
    pub texture: TextureConfig,
    pub animation: AnimationConfig,
    pub mode: ModeConfig,
}

impl SceneConfig {
    /// Tier the scene starts at.
    pub fn initial_tier(&self) -> QualityTier {
        self.device.as_ref().map_or(QualityTier::High, DeviceHints::classify)
    }

    /// Reject values that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.sampler.window == 0 {
            return Err(Error::Config("sampler.window must be at least 1".into()));
        }
        let q = &self.quality;
        if !(q.emergency_fps <= q.medium_fps && q.medium_fps <= q.high_fps) {
            return Err(Error::Config(format!(
                "quality thresholds must satisfy emergency <= medium <= high, got {}/{}/{}",
                q.emergency_fps, q.medium_fps, q.high_fps
            )));
        }
        if q.confirmations == 0 {
            return Err(Error::Config("quality.confirmations must be at least 1".into()));
        }
        if !(q.eval_interval_ms > 0.0) {
            return Err(Error::Config("quality.eval_interval_ms must be positive".into()));
        }
        if !self.lod.is_valid() {
            return Err(Error::Config(format!("lod thresholds not increasing: {:?}", self.lod)));
        }
        if self.texture.base_size == 0 || self.texture.min_size == 0 {
            return Err(Error::Config("texture sizes must be non-zero".into()));
        }
        if !(self.mode.transition_seconds >= 0.0) {
            return Err(Error::Config("mode.transition_seconds must be >= 0".into()));
        }
        Ok(())
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file (sync) and validate
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
