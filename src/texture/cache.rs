//! Shared texture cache.
//!
//! Handles are `Arc`s: the cache holds one strong reference and every live
//! material holds another. An entry whose only owner is the cache is
//! unreferenced and is dropped by [`TextureCache::release_unreferenced`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::atmosphere::DayNight;
use crate::perf::QualityTier;

use super::kind::TextureKey;
use super::Texture;

pub type TextureHandle = Arc<Texture>;

/// Hit/miss/eviction counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }
}

#[derive(Default)]
pub struct TextureCache {
    entries: HashMap<TextureKey, TextureHandle>,
    stats: CacheStats,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a handle, counting the hit or miss.
    pub fn get(&mut self, key: &TextureKey) -> Option<TextureHandle> {
        match self.entries.get(key) {
            Some(handle) => {
                self.stats.hits += 1;
                log::trace!("Texture cache hit {key}");
                Some(Arc::clone(handle))
            }
            None => {
                self.stats.misses += 1;
                log::trace!("Texture cache miss {key}");
                None
            }
        }
    }

    pub fn insert(&mut self, key: TextureKey, handle: TextureHandle) {
        if self.entries.insert(key, handle).is_some() {
            self.stats.evictions += 1;
        }
    }

    pub fn contains(&self, key: &TextureKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop entries no material references any more. Returns how many.
    pub fn release_unreferenced(&mut self) -> usize {
        self.evict_where(|_, handle| Arc::strong_count(handle) == 1)
    }

    /// Drop every entry built for `tier`.
    pub fn invalidate_tier(&mut self, tier: QualityTier) -> usize {
        self.evict_where(|key, _| key.tier == tier)
    }

    /// Drop every entry built for `mode`.
    pub fn invalidate_mode(&mut self, mode: DayNight) -> usize {
        self.evict_where(|key, _| key.mode == mode)
    }

    pub fn clear(&mut self) -> usize {
        self.evict_where(|_, _| true)
    }

    fn evict_where(&mut self, pred: impl Fn(&TextureKey, &TextureHandle) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, handle| !pred(key, handle));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            self.stats.evictions += evicted as u64;
            log::trace!("Evicted {evicted} textures, {} remain", self.entries.len());
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Total bitmap bytes held by the cache.
    pub fn memory_bytes(&self) -> usize {
        self.entries.values().map(|t| t.byte_size()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::kind::TextureKind;

    fn key(kind: TextureKind, mode: DayNight, tier: QualityTier) -> TextureKey {
        TextureKey::new(kind, mode, tier)
    }

    fn handle(k: TextureKey) -> TextureHandle {
        Arc::new(Texture::flat(k, [1, 2, 3, 255]))
    }

    #[test]
    fn test_hit_returns_same_handle() {
        let mut cache = TextureCache::new();
        let k = key(TextureKind::Ground, DayNight::Day, QualityTier::High);
        assert!(cache.get(&k).is_none());
        cache.insert(k, handle(k));
        let a = cache.get(&k).unwrap();
        let b = cache.get(&k).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 1, evictions: 0 });
    }

    #[test]
    fn test_release_unreferenced_keeps_live() {
        let mut cache = TextureCache::new();
        let live = key(TextureKind::Ground, DayNight::Day, QualityTier::High);
        let dead = key(TextureKind::Bark, DayNight::Day, QualityTier::High);
        cache.insert(live, handle(live));
        cache.insert(dead, handle(dead));

        let held = cache.get(&live).unwrap();
        assert_eq!(cache.release_unreferenced(), 1);
        assert!(cache.contains(&live));
        assert!(!cache.contains(&dead));

        drop(held);
        assert_eq!(cache.release_unreferenced(), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().evictions, 2);
    }

    #[test]
    fn test_invalidate_by_tier_and_mode() {
        let mut cache = TextureCache::new();
        for kind in TextureKind::ALL {
            for mode in [DayNight::Day, DayNight::Night] {
                for tier in QualityTier::ALL {
                    let k = key(kind, mode, tier);
                    cache.insert(k, handle(k));
                }
            }
        }
        assert_eq!(cache.len(), 24);
        assert_eq!(cache.invalidate_tier(QualityTier::High), 8);
        assert_eq!(cache.invalidate_mode(DayNight::Night), 8);
        assert_eq!(cache.len(), 8);
        assert_eq!(cache.clear(), 8);
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats { hits: 3, misses: 1, evictions: 0 };
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
