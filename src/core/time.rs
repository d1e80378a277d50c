//! Frame timing utilities driven by host timestamps
//!
//! The host owns the clock (a `requestAnimationFrame`-style callback hands us
//! a millisecond timestamp), so nothing in here reads `Instant::now()`.

/// Largest delta handed to simulations after a stall (tab switch, debugger).
pub const MAX_DELTA_SECS: f32 = 0.25;

/// Tracks elapsed wall time and per-frame delta from host timestamps
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    origin_ms: Option<f64>,
    last_ms: Option<f64>,
    elapsed: f32,
    delta: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a new clock; the first tick defines time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame with the host timestamp in milliseconds
    pub fn tick(&mut self, now_ms: f64) {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        self.delta = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_DELTA_SECS),
            None => 0.0,
        };
        // Timestamps that run backwards keep the previous elapsed value
        self.elapsed = self.elapsed.max(((now_ms - origin) / 1000.0) as f32);
        self.last_ms = Some(now_ms);
        self.frame_count += 1;
    }

    /// Seconds since the first tick
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }

    /// Seconds since the previous tick (clamped to [`MAX_DELTA_SECS`])
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Forget all history (scene reload)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fires at a fixed wall-clock interval, independent of frame rate.
///
/// The first poll arms the timer; it fires once `interval_ms` has passed.
/// After a long stall it fires once rather than replaying every missed slot.
#[derive(Clone, Debug)]
pub struct Cadence {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl Cadence {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            next_due_ms: None,
        }
    }

    /// Returns true when the interval has elapsed since the last firing
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.next_due_ms {
            None => {
                self.next_due_ms = Some(now_ms + self.interval_ms);
                false
            }
            Some(due) if now_ms >= due => {
                self.next_due_ms = Some(now_ms + self.interval_ms);
                true
            }
            Some(_) => false,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Disarm; the next poll starts a fresh interval
    pub fn reset(&mut self) {
        self.next_due_ms = None;
    }
}
