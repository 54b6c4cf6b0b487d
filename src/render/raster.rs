//! Rasterising surface over an RGBA image buffer.
//!
//! Strokes are one canvas unit wide; fills use the even-odd rule. Arcs are
//! flattened to line segments before painting.

use std::f64::consts::TAU;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{Result, SketchError};
use crate::types::Colour;

use super::Surface;

/// Largest raster side in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

#[derive(Debug, Default, Clone)]
struct Subpath {
    points: Vec<(f64, f64)>,
    closed: bool,
}

/// A surface that paints into pixels.
#[derive(Debug)]
pub struct Raster {
    image: RgbaImage,
    scale: f64,
    offset: (f64, f64),
    saved: Vec<(f64, f64)>,
    path: Vec<Subpath>,
}

impl Raster {
    /// A `width` x `height` canvas, `scale` pixels per canvas unit.
    ///
    /// Fails when either side would exceed [`MAX_DIMENSION`] pixels.
    pub fn new(width: u32, height: u32, scale: u32, background: Colour) -> Result<Self> {
        let scale = scale.max(1);
        let side = |units: u32| {
            units
                .checked_mul(scale)
                .filter(|px| *px <= MAX_DIMENSION)
                .ok_or_else(|| SketchError::Build {
                    message: format!(
                        "Canvas {}x{} at scale {} is larger than {} pixels a side",
                        width, height, scale, MAX_DIMENSION
                    ),
                    help: Some("Use a smaller canvas or --scale".to_string()),
                })
        };
        let image = ImageBuffer::from_pixel(side(width)?, side(height)?, Rgba(background.to_rgba()));
        Ok(Self {
            image,
            scale: scale as f64,
            offset: (0.0, 0.0),
            saved: Vec::new(),
            path: Vec::new(),
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Canvas to pixel coordinates under the current translation.
    fn device(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x + self.offset.0) * self.scale,
            (y + self.offset.1) * self.scale,
        )
    }

    fn current(&mut self) -> &mut Subpath {
        if self.path.last().map_or(true, |s| s.closed) {
            self.path.push(Subpath::default());
        }
        let last = self.path.len() - 1;
        &mut self.path[last]
    }

    fn blend(&mut self, x: i64, y: i64, colour: Colour) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        let [r, g, b, a] = pixel.0;
        *pixel = Rgba(colour.over(Colour::new(r, g, b, a)).to_rgba());
    }

    /// Plot a square pen of one canvas unit centred on (x, y).
    fn dab(&mut self, x: f64, y: f64, colour: Colour) {
        let pen = self.scale.round() as i64;
        let x0 = (x - self.scale / 2.0 + 0.5).floor() as i64;
        let y0 = (y - self.scale / 2.0 + 0.5).floor() as i64;
        for dy in 0..pen {
            for dx in 0..pen {
                self.blend(x0 + dx, y0 + dy, colour);
            }
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), colour: Colour) {
        if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
            return;
        }
        // Keep a pen's width of margin so dabs overlapping the edge still land.
        let margin = self.scale;
        let bounds = (
            -margin,
            -margin,
            self.image.width() as f64 + margin,
            self.image.height() as f64 + margin,
        );
        let Some((from, to)) = clip(from, to, bounds) else {
            return;
        };

        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.dab(from.0 + dx * t, from.1 + dy * t, colour);
        }
    }

    fn edges(&self) -> Vec<((f64, f64), (f64, f64))> {
        let mut edges = Vec::new();
        for sub in &self.path {
            let n = sub.points.len();
            if n < 2 {
                continue;
            }
            for i in 0..n {
                edges.push((sub.points[i], sub.points[(i + 1) % n]));
            }
        }
        edges
    }
}

/// Liang-Barsky: the part of a segment inside `(x_min, y_min, x_max, y_max)`.
fn clip(
    from: (f64, f64),
    to: (f64, f64),
    (x_min, y_min, x_max, y_max): (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, from.0 - x_min),
        (dx, x_max - from.0),
        (-dy, from.1 - y_min),
        (dy, y_max - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

impl Surface for Raster {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.device(x, y);
        self.path.push(Subpath {
            points: vec![p],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.device(x, y);
        self.current().points.push(p);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        let sweep = end - start;
        let pixels = (sweep.abs().min(TAU) * radius * self.scale).abs();
        let segments = if pixels.is_finite() {
            (pixels / 2.0).ceil().clamp(8.0, 720.0) as usize
        } else {
            8
        };

        let points: Vec<_> = (0..=segments)
            .map(|i| {
                let t = start + sweep * i as f64 / segments as f64;
                self.device(cx + radius * t.cos(), cy + radius * t.sin())
            })
            .collect();
        self.current().points.extend(points);
    }

    fn close_path(&mut self) {
        if let Some(sub) = self.path.last_mut() {
            sub.closed = true;
        }
    }

    fn stroke(&mut self, colour: Colour) {
        let path = std::mem::take(&mut self.path);
        for sub in &path {
            for pair in sub.points.windows(2) {
                self.line(pair[0], pair[1], colour);
            }
            if sub.closed && sub.points.len() > 2 {
                if let (Some(&first), Some(&last)) = (sub.points.first(), sub.points.last()) {
                    self.line(last, first, colour);
                }
            }
        }
        self.path = path;
    }

    fn fill(&mut self, colour: Colour) {
        let edges = self.edges();
        if edges.is_empty() {
            return;
        }

        let height = self.image.height();
        let mut crossings = Vec::new();
        for row in 0..height {
            let y = row as f64 + 0.5;
            crossings.clear();
            for &((x0, y0), (x1, y1)) in &edges {
                if (y0 <= y && y < y1) || (y1 <= y && y < y0) {
                    crossings.push(x0 + (y - y0) * (x1 - x0) / (y1 - y0));
                }
            }
            crossings.retain(|x| x.is_finite());
            crossings.sort_by(|a, b| a.total_cmp(b));

            let last = self.image.width() as f64 - 1.0;
            for span in crossings.chunks_exact(2) {
                let from = (span[0] - 0.5).ceil().max(0.0) as i64;
                let to = (span[1] - 0.5).floor().min(last) as i64;
                for x in from..=to {
                    self.blend(x, row as i64, colour);
                }
            }
        }
    }

    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(raster: &Raster, x: u32, y: u32) -> [u8; 4] {
        raster.image().get_pixel(x, y).0
    }

    #[test]
    fn test_background_and_size() {
        let raster = Raster::new(10, 5, 2, Colour::WHITE).unwrap();
        assert_eq!(raster.image().dimensions(), (20, 10));
        assert_eq!(pixel(&raster, 19, 9), [255, 255, 255, 255]);
    }

    #[test]
    fn test_fill_square() {
        let mut raster = Raster::new(10, 10, 1, Colour::WHITE).unwrap();
        raster.begin_path();
        raster.move_to(2.0, 2.0);
        raster.line_to(8.0, 2.0);
        raster.line_to(8.0, 8.0);
        raster.line_to(2.0, 8.0);
        raster.close_path();
        raster.fill(Colour::BLACK);

        assert_eq!(pixel(&raster, 5, 5), [0, 0, 0, 255]);
        assert_eq!(pixel(&raster, 1, 5), [255, 255, 255, 255]);
        assert_eq!(pixel(&raster, 9, 9), [255, 255, 255, 255]);
    }

    #[test]
    fn test_stroke_circle_leaves_centre_clear() {
        let mut raster = Raster::new(20, 20, 1, Colour::WHITE).unwrap();
        raster.begin_path();
        raster.arc(10.0, 10.0, 6.0, 0.0, TAU);
        raster.stroke(Colour::RED);

        assert_eq!(pixel(&raster, 10, 10), [255, 255, 255, 255]);
        assert_eq!(pixel(&raster, 16, 10), Colour::RED.to_rgba());
    }

    #[test]
    fn test_translate_is_scoped() {
        let mut raster = Raster::new(10, 10, 1, Colour::WHITE).unwrap();
        raster.save();
        raster.translate(5.0, 5.0);
        raster.begin_path();
        raster.move_to(0.0, 0.0);
        raster.line_to(1.0, 0.0);
        raster.stroke(Colour::BLACK);
        raster.restore();

        raster.begin_path();
        raster.move_to(0.0, 9.0);
        raster.line_to(1.0, 9.0);
        raster.stroke(Colour::BLUE);

        assert_eq!(pixel(&raster, 5, 5), [0, 0, 0, 255]);
        assert_eq!(pixel(&raster, 0, 9), Colour::BLUE.to_rgba());
    }

    #[test]
    fn test_non_finite_geometry_is_skipped() {
        let mut raster = Raster::new(4, 4, 1, Colour::WHITE).unwrap();
        raster.begin_path();
        raster.move_to(f64::NAN, 0.0);
        raster.line_to(2.0, f64::INFINITY);
        raster.close_path();
        raster.stroke(Colour::BLACK);
        raster.fill(Colour::BLACK);
        assert!(raster.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let err = Raster::new(100_000, 100, 100_000, Colour::WHITE).unwrap_err();
        assert!(matches!(err, SketchError::Build { .. }));
        assert!(Raster::new(MAX_DIMENSION + 1, 1, 1, Colour::WHITE).is_err());
        assert!(Raster::new(MAX_DIMENSION / 4, 1, 4, Colour::WHITE).is_ok());
    }

    #[test]
    fn test_clip_keeps_inside_part() {
        let bounds = (0.0, 0.0, 10.0, 10.0);
        let (from, to) = clip((-1e12, 5.0), (1e12, 5.0), bounds).unwrap();
        assert!(from.0.abs() < 1e-3 && (to.0 - 10.0).abs() < 1e-3);
        assert_eq!((from.1, to.1), (5.0, 5.0));
        assert_eq!(clip((2.0, 2.0), (3.0, 4.0), bounds), Some(((2.0, 2.0), (3.0, 4.0))));
        assert_eq!(clip((-5.0, -5.0), (-1.0, 20.0), bounds), None);
    }

    #[test]
    fn test_far_geometry_strokes_quickly() {
        let mut raster = Raster::new(10, 10, 1, Colour::WHITE).unwrap();
        let started = std::time::Instant::now();

        raster.begin_path();
        raster.arc(0.0, 0.0, 1e9, 0.0, TAU);
        raster.stroke(Colour::BLACK);
        assert!(raster.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));

        raster.begin_path();
        raster.move_to(-1e12, 5.0);
        raster.line_to(1e12, 5.0);
        raster.stroke(Colour::BLACK);
        assert_eq!(pixel(&raster, 0, 5), [0, 0, 0, 255]);
        assert_eq!(pixel(&raster, 9, 5), [0, 0, 0, 255]);

        raster.begin_path();
        raster.move_to(-1e12, -1e12);
        raster.line_to(1e12, -1e12);
        raster.line_to(1e12, 1e12);
        raster.line_to(-1e12, 1e12);
        raster.close_path();
        raster.fill(Colour::BLUE);
        assert_eq!(pixel(&raster, 3, 3), Colour::BLUE.to_rgba());

        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }
}
