//! Hexagonal tilings.

use serde::Serialize;

use super::Point;

/// Largest ring count a tiling holds; 12 481 cells.
pub const MAX_RINGS: u32 = 64;

/// A patch of pointy-top hexagons arranged in rings around a centre cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HexTiling {
    pub center: Point,
    /// Circumradius of each cell.
    pub size: f64,
    /// Rings around the centre cell; 0 is a single hexagon.
    pub rings: u32,
}

impl HexTiling {
    /// Ring counts above [`MAX_RINGS`] are clamped to it.
    pub fn new(center: Point, size: f64, rings: u32) -> Self {
        Self {
            center,
            size,
            rings: rings.min(MAX_RINGS),
        }
    }

    /// Number of cells: `1 + 3n(n + 1)` for `n` rings.
    pub fn cell_count(&self) -> usize {
        let n = self.rings as usize;
        1 + 3 * n * (n + 1)
    }

    /// Cell centres, ring by ring in axial order.
    pub fn cell_centers(&self) -> Vec<Point> {
        let n = self.rings as i64;
        let width = self.size * 3f64.sqrt();
        let mut centers = Vec::with_capacity(self.cell_count());

        for q in -n..=n {
            let r_min = (-n).max(-q - n);
            let r_max = n.min(-q + n);
            for r in r_min..=r_max {
                let x = width * (q as f64 + r as f64 / 2.0);
                let y = self.size * 1.5 * r as f64;
                centers.push(self.center.offset(x, y));
            }
        }
        centers
    }

    /// Corners of one cell relative to its own centre.
    pub fn cell_corners(&self) -> [Point; 6] {
        let mut corners = [Point::default(); 6];
        for (i, corner) in corners.iter_mut().enumerate() {
            let angle = (60.0 * i as f64 - 30.0).to_radians();
            *corner = Point::new(self.size * angle.cos(), self.size * angle.sin());
        }
        corners
    }
}
