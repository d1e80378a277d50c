//! Deterministic sine-based pseudo-random sequence.
//!
//! `sample(seed, index)` is a pure function, so the n-th value for a seed
//! never changes between calls, frames or process runs.

/// Largest f32 strictly below 1.0.
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Seed for an entity id: the wrapping sum of its UTF-16 code units.
///
/// ```
/// use vigil::variation::rng::id_seed;
///
/// assert_eq!(id_seed("AB"), 65 + 66);
/// assert_eq!(id_seed(""), 0);
/// ```
pub fn id_seed(id: &str) -> u32 {
    id.encode_utf16().fold(0u32, |acc, unit| acc.wrapping_add(unit as u32))
}

/// The `index`-th value of the sequence for `seed`, in `[0, 1)`.
pub fn sample(seed: u32, index: u32) -> f32 {
    let x = (seed as f64 + index as f64).sin() * 10_000.0;
    let f = (x - x.floor()) as f32;
    if f >= 1.0 { BELOW_ONE } else { f }
}

/// Cursor over the sequence for one seed.
#[derive(Clone, Debug)]
pub struct SeededSequence {
    seed: u32,
    index: u32,
}

impl SeededSequence {
    pub fn new(seed: u32) -> Self {
        // Index 0 would start every seed at sin(seed); skip it so seed 0 is not degenerate
        Self { seed, index: 1 }
    }

    pub fn from_id(id: &str) -> Self {
        Self::new(id_seed(id))
    }

    /// Next value in `[0, 1)`
    pub fn next_f32(&mut self) -> f32 {
        let v = sample(self.seed, self.index);
        self.index = self.index.wrapping_add(1);
        v
    }

    /// Next value linearly remapped into `[min, max)`
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Next value as an index in `[0, len)`; `len` must be non-zero
    pub fn index_below(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Weighted pick. Falls back to the first entry when all weights are zero.
    pub fn pick_weighted<T: Copy>(&mut self, choices: &[(T, f32)]) -> Option<T> {
        let total: f32 = choices.iter().map(|(_, w)| w.max(0.0)).sum();
        let roll = self.next_f32() * total;
        let mut acc = 0.0;
        for &(item, weight) in choices {
            acc += weight.max(0.0);
            if roll < acc {
                return Some(item);
            }
        }
        choices.first().map(|&(item, _)| item)
    }

    /// Number of values drawn so far
    pub fn drawn(&self) -> u32 {
        self.index - 1
    }
}
