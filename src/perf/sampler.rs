//! Rolling frame-rate sampler.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::config::SamplerConfig;

/// FPS statistics over the sample window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FpsWindow {
    pub avg: f32,
    pub min: f32,
    pub max: f32,
    pub samples: usize,
}

/// Keeps the most recent instantaneous fps values in a FIFO ring buffer.
#[derive(Debug, Clone)]
pub struct PerformanceSampler {
    samples: VecDeque<f32>,
    capacity: usize,
    last_frame_ms: Option<f64>,
}

impl PerformanceSampler {
    pub fn new(config: &SamplerConfig) -> Self {
        let capacity = config.window.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            last_frame_ms: None,
        }
    }

    /// Record a frame boundary at `now_ms` and return its instantaneous fps.
    ///
    /// Returns `None` (and records nothing) for the very first frame and for
    /// zero, negative or non-finite elapsed time.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<f32> {
        let previous = self.last_frame_ms;
        if now_ms.is_finite() {
            self.last_frame_ms = Some(now_ms);
        }

        let elapsed = now_ms - previous?;
        if !(elapsed > 0.0) || !elapsed.is_finite() {
            log::trace!("discarding frame sample with elapsed {elapsed}ms");
            return None;
        }

        let fps = (1000.0 / elapsed) as f32;
        self.push_sample(fps);
        Some(fps)
    }

    /// Push an externally measured fps value.
    pub fn push_sample(&mut self, fps: f32) {
        if !fps.is_finite() || fps <= 0.0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(fps);
    }

    /// Arithmetic mean of the window; 0 when empty.
    pub fn average_fps(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&s| s as f64).sum();
        (sum / self.samples.len() as f64) as f32
    }

    pub fn min_fps(&self) -> f32 {
        self.samples.iter().copied().reduce(f32::min).unwrap_or(0.0)
    }

    pub fn max_fps(&self) -> f32 {
        self.samples.iter().copied().reduce(f32::max).unwrap_or(0.0)
    }

    pub fn stats(&self) -> FpsWindow {
        FpsWindow {
            avg: self.average_fps(),
            min: self.min_fps(),
            max: self.max_fps(),
            samples: self.samples.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all samples and the previous timestamp.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.last_frame_ms = None;
    }
}

impl Default for PerformanceSampler {
    fn default() -> Self {
        Self::new(&SamplerConfig::default())
    }
}
