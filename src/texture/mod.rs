//! Procedural texture synthesis.
//!
//! [`TextureSynthesizer::get_texture`] returns a shared bitmap for a
//! `(kind, mode, tier)` key, synthesizing it on a miss. When no drawing
//! surface is available the caller still gets a texture: a 1x1 flat color
//! flagged with [`Texture::is_fallback`].

pub mod cache;
pub mod kind;
pub mod surface;
pub mod synth;

use std::sync::Arc;

use image::{ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::atmosphere::DayNight;
use crate::core::types::Result;
use crate::perf::QualityTier;

pub use cache::{CacheStats, TextureCache, TextureHandle};
pub use kind::{TextureKey, TextureKind};
pub use surface::{Canvas, ImageSurfaces, NoSurfaces, SurfaceProvider};

/// Texture synthesis configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Edge length of a full-size (Ground, High tier) bitmap.
    pub base_size: u32,
    /// Smallest edge any tier produces.
    pub min_size: u32,
    /// Largest edge the default surface provider accepts.
    pub max_dimension: u32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            base_size: 512,
            min_size: 16,
            max_dimension: 2048,
        }
    }
}

/// A synthesized (or fallback) bitmap.
pub struct Texture {
    key: TextureKey,
    image: RgbaImage,
    fallback: bool,
}

impl Texture {
    pub fn new(key: TextureKey, image: RgbaImage) -> Self {
        Self {
            key,
            image,
            fallback: false,
        }
    }

    /// 1x1 flat-color stand-in.
    pub fn flat(key: TextureKey, color: [u8; 4]) -> Self {
        Self {
            key,
            image: RgbaImage::from_pixel(1, 1, image::Rgba(color)),
            fallback: true,
        }
    }

    pub fn key(&self) -> TextureKey {
        self.key
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA8 bytes, row-major, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn byte_size(&self) -> usize {
        self.image.as_raw().len()
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png_data = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
        encoder.write_image(
            self.image.as_raw(),
            self.width(),
            self.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(png_data)
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("key", &self.key)
            .field("size", &(self.width(), self.height()))
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// The textures live materials hold for one `(mode, tier)`.
#[derive(Clone, Debug)]
pub struct TextureSet {
    pub ground: TextureHandle,
    pub bark: TextureHandle,
    pub sky: TextureHandle,
    pub vignette: TextureHandle,
}

impl TextureSet {
    pub fn iter(&self) -> impl Iterator<Item = &TextureHandle> {
        [&self.ground, &self.bark, &self.sky, &self.vignette].into_iter()
    }

    pub fn fallback_count(&self) -> usize {
        self.iter().filter(|t| t.is_fallback()).count()
    }
}

/// Owns the texture cache and the surface provider.
pub struct TextureSynthesizer {
    config: TextureConfig,
    surfaces: Box<dyn SurfaceProvider>,
    cache: TextureCache,
}

impl TextureSynthesizer {
    /// Synthesizer drawing onto [`ImageSurfaces`].
    pub fn new(config: TextureConfig) -> Self {
        let surfaces = ImageSurfaces {
            max_dimension: config.max_dimension,
        };
        Self::with_surfaces(config, Box::new(surfaces))
    }

    pub fn with_surfaces(config: TextureConfig, surfaces: Box<dyn SurfaceProvider>) -> Self {
        Self {
            config,
            surfaces,
            cache: TextureCache::new(),
        }
    }

    pub fn config(&self) -> &TextureConfig {
        &self.config
    }

    /// Apply a new config. Cached bitmaps were built for the old sizes.
    pub fn reconfigure(&mut self, config: TextureConfig) {
        self.surfaces.set_max_dimension(config.max_dimension);
        self.config = config;
        self.cache.clear();
    }

    /// Shared texture for `(kind, mode, tier)`, synthesized on a miss.
    pub fn get_texture(&mut self, kind: TextureKind, mode: DayNight, tier: QualityTier) -> TextureHandle {
        let key = TextureKey::new(kind, mode, tier);
        if let Some(handle) = self.cache.get(&key) {
            return handle;
        }

        let size = key.size(self.config.base_size, self.config.min_size);
        let texture = match self.surfaces.create(size, size) {
            Ok(mut canvas) => {
                synth::synthesize(&key, &mut canvas);
                log::debug!("Synthesized {key} at {size}x{size}");
                Texture::new(key, canvas.into_image())
            }
            Err(e) => {
                log::warn!("Texture {key}: {e}, using flat color");
                Texture::flat(key, kind.flat_color(mode))
            }
        };

        let handle = Arc::new(texture);
        self.cache.insert(key, Arc::clone(&handle));
        handle
    }

    /// Every kind for `(mode, tier)`.
    pub fn texture_set(&mut self, mode: DayNight, tier: QualityTier) -> TextureSet {
        TextureSet {
            ground: self.get_texture(TextureKind::Ground, mode, tier),
            bark: self.get_texture(TextureKind::Bark, mode, tier),
            sky: self.get_texture(TextureKind::Sky, mode, tier),
            vignette: self.get_texture(TextureKind::Vignette, mode, tier),
        }
    }

    pub fn invalidate_tier(&mut self, tier: QualityTier) -> usize {
        self.cache.invalidate_tier(tier)
    }

    pub fn invalidate_mode(&mut self, mode: DayNight) -> usize {
        self.cache.invalidate_mode(mode)
    }

    pub fn release_unreferenced(&mut self) -> usize {
        self.cache.release_unreferenced()
    }

    pub fn clear(&mut self) -> usize {
        self.cache.clear()
    }

    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for TextureSynthesizer {
    fn default() -> Self {
        Self::new(TextureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> TextureSynthesizer {
        TextureSynthesizer::new(TextureConfig {
            base_size: 64,
            ..Default::default()
        })
    }

    #[test]
    fn test_cache_hit_same_handle() {
        let mut synth = small();
        let a = synth.get_texture(TextureKind::Ground, DayNight::Day, QualityTier::High);
        let b = synth.get_texture(TextureKind::Ground, DayNight::Day, QualityTier::High);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!a.is_fallback());
        assert_eq!(a.width(), 64);
        assert_eq!(synth.stats().hits, 1);
        assert_eq!(synth.stats().misses, 1);
    }

    #[test]
    fn test_distinct_keys_distinct_handles() {
        let mut synth = small();
        let day = synth.get_texture(TextureKind::Sky, DayNight::Day, QualityTier::High);
        let night = synth.get_texture(TextureKind::Sky, DayNight::Night, QualityTier::High);
        let low = synth.get_texture(TextureKind::Sky, DayNight::Day, QualityTier::Low);
        assert!(!Arc::ptr_eq(&day, &night));
        assert!(low.width() < day.width());
    }

    #[test]
    fn test_resynthesis_is_identical() {
        let mut synth = small();
        let first = synth.get_texture(TextureKind::Bark, DayNight::Night, QualityTier::Medium);
        let bytes = first.as_bytes().to_vec();
        drop(first);
        synth.clear();
        let second = synth.get_texture(TextureKind::Bark, DayNight::Night, QualityTier::Medium);
        assert_eq!(second.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn test_fallback_without_surface() {
        let mut synth = TextureSynthesizer::with_surfaces(TextureConfig::default(), Box::new(NoSurfaces));
        let t = synth.get_texture(TextureKind::Ground, DayNight::Night, QualityTier::Low);
        assert!(t.is_fallback());
        assert_eq!((t.width(), t.height()), (1, 1));
        assert_eq!(t.image().get_pixel(0, 0).0, TextureKind::Ground.flat_color(DayNight::Night));
        // Fallbacks are cached like any other texture
        let again = synth.get_texture(TextureKind::Ground, DayNight::Night, QualityTier::Low);
        assert!(Arc::ptr_eq(&t, &again));
    }

    #[test]
    fn test_oversized_surface_falls_back() {
        let mut synth = TextureSynthesizer::new(TextureConfig {
            base_size: 1600,
            min_size: 16,
            max_dimension: 400,
        });
        let ground = synth.get_texture(TextureKind::Ground, DayNight::Day, QualityTier::High);
        assert!(ground.is_fallback());
        // Low tier fits under the limit
        let low = synth.get_texture(TextureKind::Ground, DayNight::Day, QualityTier::Low);
        assert!(!low.is_fallback());
    }

    #[test]
    fn test_reconfigure_applies_limit_to_default_surfaces() {
        let mut synth = TextureSynthesizer::new(TextureConfig {
            base_size: 1600,
            min_size: 16,
            max_dimension: 400,
        });
        assert!(synth.get_texture(TextureKind::Ground, DayNight::Day, QualityTier::High).is_fallback());

        synth.reconfigure(TextureConfig {
            base_size: 64,
            min_size: 16,
            max_dimension: 32,
        });
        assert!(synth.get_texture(TextureKind::Ground, DayNight::Day, QualityTier::High).is_fallback());
        assert!(!synth.get_texture(TextureKind::Ground, DayNight::Day, QualityTier::Low).is_fallback());
    }

    #[test]
    fn test_reconfigure_keeps_injected_provider() {
        let mut synth = TextureSynthesizer::with_surfaces(TextureConfig::default(), Box::new(NoSurfaces));
        synth.reconfigure(TextureConfig {
            base_size: 32,
            ..Default::default()
        });
        let sky = synth.get_texture(TextureKind::Sky, DayNight::Night, QualityTier::Medium);
        assert!(sky.is_fallback());
    }

    #[test]
    fn test_texture_set_and_release() {
        let mut synth = small();
        let set = synth.texture_set(DayNight::Day, QualityTier::Medium);
        assert_eq!(set.fallback_count(), 0);
        assert_eq!(synth.release_unreferenced(), 0);
        drop(set);
        assert_eq!(synth.release_unreferenced(), 4);
        assert!(synth.cache().is_empty());
    }

    #[test]
    fn test_png_export() {
        let mut synth = small();
        let t = synth.get_texture(TextureKind::Vignette, DayNight::Night, QualityTier::Low);
        let png = t.to_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
