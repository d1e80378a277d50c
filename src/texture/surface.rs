//! 2D drawing surfaces.
//!
//! [`SurfaceProvider`] abstracts where bitmaps come from so a host without a
//! usable 2D surface can refuse; the synthesizer then falls back to a flat
//! color. [`Canvas`] holds the few primitives synthesis needs: gradients,
//! soft blobs, lines and per-pixel modulation, all alpha-blended.

use image::{Rgba, RgbaImage};

use crate::core::types::Result;
use crate::core::Error;

/// Source of drawing surfaces.
pub trait SurfaceProvider {
    /// A blank `width` x `height` canvas, or an error when unavailable.
    fn create(&self, width: u32, height: u32) -> Result<Canvas>;

    /// Apply a new edge limit from configuration. Providers without a
    /// limit ignore it.
    fn set_max_dimension(&mut self, _max_dimension: u32) {}
}

/// In-memory surfaces backed by [`RgbaImage`].
#[derive(Clone, Copy, Debug)]
pub struct ImageSurfaces {
    /// Largest edge accepted.
    pub max_dimension: u32,
}

impl Default for ImageSurfaces {
    fn default() -> Self {
        Self { max_dimension: 2048 }
    }
}

impl SurfaceProvider for ImageSurfaces {
    fn create(&self, width: u32, height: u32) -> Result<Canvas> {
        if width == 0 || height == 0 {
            return Err(Error::SurfaceUnavailable(format!("empty surface {width}x{height}")));
        }
        if width > self.max_dimension || height > self.max_dimension {
            return Err(Error::SurfaceUnavailable(format!(
                "{width}x{height} exceeds {} px limit",
                self.max_dimension
            )));
        }
        Ok(Canvas::new(width, height))
    }

    fn set_max_dimension(&mut self, max_dimension: u32) {
        self.max_dimension = max_dimension;
    }
}

/// Provider for hosts with no 2D surface at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSurfaces;

impl SurfaceProvider for NoSurfaces {
    fn create(&self, _width: u32, _height: u32) -> Result<Canvas> {
        Err(Error::SurfaceUnavailable("no 2D surface".into()))
    }
}

/// Linear RGBA in `[0, 1]`.
pub type Color = [f32; 4];

#[inline]
fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn mix(a: Color, b: Color, t: f32) -> Color {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// RGBA bitmap with alpha-blended drawing.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Source-over blend of `color` onto one pixel. Out-of-bounds is ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        let src_a = color[3].clamp(0.0, 1.0);
        let dst = px.0.map(|c| c as f32 / 255.0);
        let out_a = src_a + dst[3] * (1.0 - src_a);
        let channel = |i: usize| {
            if out_a <= 0.0 {
                0.0
            } else {
                (color[i] * src_a + dst[i] * dst[3] * (1.0 - src_a)) / out_a
            }
        };
        *px = Rgba([to_u8(channel(0)), to_u8(channel(1)), to_u8(channel(2)), to_u8(out_a)]);
    }

    pub fn fill(&mut self, color: Color) {
        let px = Rgba(color.map(to_u8));
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    /// Top-to-bottom gradient, replacing existing content.
    pub fn vertical_gradient(&mut self, top: Color, bottom: Color) {
        let h = self.height().max(2) - 1;
        for y in 0..self.height() {
            let px = Rgba(mix(top, bottom, y as f32 / h as f32).map(to_u8));
            for x in 0..self.width() {
                self.image.put_pixel(x, y, px);
            }
        }
    }

    /// Radial gradient from the center, blended over existing content.
    ///
    /// `inner` applies up to `start` (fraction of the half-diagonal), `outer`
    /// at the corners.
    pub fn radial_gradient(&mut self, inner: Color, outer: Color, start: f32) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        let (cx, cy) = (w * 0.5, h * 0.5);
        let max_r = (cx * cx + cy * cy).sqrt().max(f32::EPSILON);
        let span = (1.0 - start).max(f32::EPSILON);
        for y in 0..self.height() {
            for x in 0..self.width() {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let r = (dx * dx + dy * dy).sqrt() / max_r;
                let t = ((r - start) / span).clamp(0.0, 1.0);
                self.blend_pixel(x as i64, y as i64, mix(inner, outer, t * t));
            }
        }
    }

    /// Soft-edged disc. Alpha falls off linearly toward the rim.
    pub fn blob(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let x0 = (cx - radius).floor() as i64;
        let x1 = (cx + radius).ceil() as i64;
        let y0 = (cy - radius).floor() as i64;
        let y1 = (cy + radius).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt() / radius;
                if d < 1.0 {
                    let mut c = color;
                    c[3] *= 1.0 - d;
                    self.blend_pixel(x, y, c);
                }
            }
        }
    }

    /// One-pixel line (DDA).
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = from.0 + dx * t;
            let y = from.1 + dy * t;
            self.blend_pixel(x.floor() as i64, y.floor() as i64, color);
        }
    }

    /// Multiply RGB by `f(u, v)` where `u, v` are in `[0, 1)`.
    pub fn modulate(&mut self, f: impl Fn(f32, f32) -> f32) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        for (x, y, px) in self.image.enumerate_pixels_mut() {
            let k = f(x as f32 / w, y as f32 / h).max(0.0);
            for c in &mut px.0[..3] {
                *c = to_u8(*c as f32 / 255.0 * k);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_surfaces_limits() {
        let surfaces = ImageSurfaces { max_dimension: 64 };
        assert!(surfaces.create(64, 64).is_ok());
        assert!(matches!(surfaces.create(65, 8), Err(Error::SurfaceUnavailable(_))));
        assert!(surfaces.create(0, 8).is_err());
    }

    #[test]
    fn test_no_surfaces_refuses() {
        assert!(NoSurfaces.create(8, 8).is_err());
    }

    #[test]
    fn test_fill_and_gradient() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill([1.0, 0.0, 0.0, 1.0]);
        assert_eq!(canvas.pixel(2, 2), [255, 0, 0, 255]);

        canvas.vertical_gradient([0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(canvas.pixel(0, 3), [255, 255, 255, 255]);
    }

    #[test]
    fn test_blend_over_opaque() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill([0.0, 0.0, 0.0, 1.0]);
        canvas.blend_pixel(0, 0, [1.0, 1.0, 1.0, 0.5]);
        let p = canvas.pixel(0, 0);
        assert!((p[0] as i32 - 128).abs() <= 1);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_blob_stays_in_bounds() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill([0.0, 0.0, 0.0, 1.0]);
        canvas.blob(0.0, 0.0, 5.0, [1.0, 1.0, 1.0, 1.0]);
        canvas.blob(4.0, 4.0, 2.0, [1.0, 1.0, 1.0, 1.0]);
        assert!(canvas.pixel(3, 3)[0] > 0);
        assert_eq!(canvas.pixel(7, 7), [0, 0, 0, 255]);
    }

    #[test]
    fn test_line_endpoints() {
        let mut canvas = Canvas::new(8, 8);
        canvas.line((0.5, 0.5), (6.5, 0.5), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(canvas.pixel(0, 0)[3], 255);
        assert_eq!(canvas.pixel(6, 0)[3], 255);
        assert_eq!(canvas.pixel(0, 1)[3], 0);
    }

    #[test]
    fn test_modulate_darkens() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill([1.0, 1.0, 1.0, 1.0]);
        canvas.modulate(|_, _| 0.5);
        assert!((canvas.pixel(1, 1)[0] as i32 - 128).abs() <= 1);
        assert_eq!(canvas.pixel(1, 1)[3], 255);
    }
}
