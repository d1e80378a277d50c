//! Per-kind bitmap synthesis.
//!
//! Layout is drawn in normalized coordinates from the kind's fixed seed, so
//! every tier shows the same composition at a different resolution and
//! scatter density.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::atmosphere::DayNight;
use crate::variation::rng::SeededSequence;

use super::kind::{TextureKey, TextureKind};
use super::surface::{Canvas, Color};

/// Draw the bitmap for `key` onto a blank canvas.
pub fn synthesize(key: &TextureKey, canvas: &mut Canvas) {
    let scatter = key.scatter_count();
    let mut rng = SeededSequence::new(key.kind.seed());
    match key.kind {
        TextureKind::Ground => ground(canvas, key.mode, scatter, &mut rng),
        TextureKind::Bark => bark(canvas, key.mode, scatter, &mut rng),
        TextureKind::Sky => sky(canvas, key.mode, scatter, &mut rng),
        TextureKind::Vignette => vignette(canvas, key.mode),
    }
    if key.kind != TextureKind::Vignette {
        grain(canvas, key.kind.seed(), grain_frequency(key.kind), grain_amount(key.kind));
    }
}

fn grain_frequency(kind: TextureKind) -> f64 {
    match kind {
        TextureKind::Ground => 12.0,
        TextureKind::Bark => 20.0,
        _ => 4.0,
    }
}

fn grain_amount(kind: TextureKind) -> f32 {
    match kind {
        TextureKind::Ground => 0.18,
        TextureKind::Bark => 0.25,
        _ => 0.05,
    }
}

/// Brightness modulation from fractal noise.
fn grain(canvas: &mut Canvas, seed: u32, frequency: f64, amount: f32) {
    let noise = Fbm::<Perlin>::new(seed)
        .set_octaves(4)
        .set_persistence(0.5)
        .set_lacunarity(2.0);
    canvas.modulate(|u, v| {
        let n = noise.get([u as f64 * frequency, v as f64 * frequency]) as f32;
        1.0 + n.clamp(-1.0, 1.0) * amount
    });
}

fn ground(canvas: &mut Canvas, mode: DayNight, patches: usize, rng: &mut SeededSequence) {
    let (top, bottom, grass): (Color, Color, Color) = match mode {
        DayNight::Day => ([0.36, 0.48, 0.24, 1.0], [0.30, 0.40, 0.20, 1.0], [0.42, 0.58, 0.26, 0.7]),
        DayNight::Night => ([0.09, 0.13, 0.11, 1.0], [0.07, 0.10, 0.09, 1.0], [0.12, 0.18, 0.13, 0.7]),
    };
    canvas.vertical_gradient(top, bottom);

    let size = canvas.width() as f32;
    for _ in 0..patches {
        let x = rng.next_f32() * size;
        let y = rng.next_f32() * size;
        let r = rng.range(0.004, 0.012) * size;
        let shade = rng.range(0.85, 1.15);
        let c = [grass[0] * shade, grass[1] * shade, grass[2] * shade, grass[3]];
        canvas.blob(x, y, r.max(1.0), c);
    }
}

fn bark(canvas: &mut Canvas, mode: DayNight, lines: usize, rng: &mut SeededSequence) {
    let (base, dark): (Color, Color) = match mode {
        DayNight::Day => ([0.38, 0.27, 0.18, 1.0], [0.22, 0.15, 0.10, 0.8]),
        DayNight::Night => ([0.14, 0.10, 0.09, 1.0], [0.07, 0.05, 0.05, 0.8]),
    };
    canvas.fill(base);

    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    for _ in 0..lines {
        let x = rng.next_f32() * w;
        let y = rng.next_f32() * h;
        let len = rng.range(0.1, 0.4) * h;
        let drift = rng.range(-0.02, 0.02) * w;
        canvas.line((x, y), (x + drift, y + len), dark);
    }
}

fn sky(canvas: &mut Canvas, mode: DayNight, features: usize, rng: &mut SeededSequence) {
    let size = canvas.width() as f32;
    match mode {
        DayNight::Day => {
            canvas.vertical_gradient([0.42, 0.64, 0.90, 1.0], [0.80, 0.88, 0.96, 1.0]);
            for _ in 0..features {
                let x = rng.next_f32() * size;
                let y = rng.range(0.05, 0.6) * size;
                let r = rng.range(0.04, 0.1) * size;
                canvas.blob(x, y, r, [1.0, 1.0, 1.0, 0.35]);
            }
        }
        DayNight::Night => {
            canvas.vertical_gradient([0.01, 0.02, 0.06, 1.0], [0.08, 0.06, 0.16, 1.0]);
            for _ in 0..features {
                let x = rng.next_f32() * size;
                let y = rng.range(0.0, 0.75) * size;
                let brightness = rng.range(0.5, 1.0);
                canvas.blob(x, y, 1.2, [1.0, 0.97, 0.9, brightness]);
            }
        }
    }
}

fn vignette(canvas: &mut Canvas, mode: DayNight) {
    let (start, edge_alpha) = match mode {
        DayNight::Day => (0.55, 0.35),
        DayNight::Night => (0.4, 0.7),
    };
    canvas.radial_gradient([0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, edge_alpha], start);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf::QualityTier;

    fn render(kind: TextureKind, mode: DayNight, size: u32) -> Canvas {
        let key = TextureKey::new(kind, mode, QualityTier::Low);
        let mut canvas = Canvas::new(size, size);
        synthesize(&key, &mut canvas);
        canvas
    }

    #[test]
    fn test_deterministic() {
        for kind in TextureKind::ALL {
            let a = render(kind, DayNight::Night, 32).into_image();
            let b = render(kind, DayNight::Night, 32).into_image();
            assert_eq!(a.as_raw(), b.as_raw(), "{kind} differs between runs");
        }
    }

    #[test]
    fn test_day_brighter_than_night() {
        let luma = |c: Canvas| {
            let img = c.into_image();
            let sum: u64 = img.pixels().map(|p| p[0] as u64 + p[1] as u64 + p[2] as u64).sum();
            sum / (img.width() * img.height()) as u64
        };
        let day = render(TextureKind::Sky, DayNight::Day, 32);
        let night = render(TextureKind::Sky, DayNight::Night, 32);
        assert!(luma(day) > luma(night));
    }

    #[test]
    fn test_vignette_clear_center_dark_edges() {
        let c = render(TextureKind::Vignette, DayNight::Night, 32);
        assert_eq!(c.pixel(16, 16)[3], 0);
        assert!(c.pixel(0, 0)[3] > 100);
    }

    #[test]
    fn test_opaque_surfaces() {
        let c = render(TextureKind::Ground, DayNight::Day, 32);
        assert_eq!(c.pixel(5, 5)[3], 255);
    }
}
