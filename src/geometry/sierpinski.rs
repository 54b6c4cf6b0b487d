//! Sierpinski triangle subdivision.
//!
//! Each step takes every triangle in the frontier, draws the triangle formed
//! by the feet of its three altitudes, and replaces it in the frontier with
//! the three corner triangles left around that inner one. For an equilateral
//! seed the feet are the edge midpoints and this is the classic medial
//! subdivision.
//!
//! The seed must be non-degenerate. A zero-area or collinear seed divides by
//! a zero side length and the resulting coordinates are NaN or infinite;
//! nothing here checks for it.

use serde::Serialize;

use super::Point;

/// A triangle with vertices `a`, `b`, `c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    /// Side lengths `(|BC|, |AC|, |AB|)`, each opposite the vertex of the same name.
    pub fn sides(&self) -> (f64, f64, f64) {
        (
            self.b.distance(self.c),
            self.a.distance(self.c),
            self.a.distance(self.b),
        )
    }

    /// Area by Heron's formula.
    pub fn area(&self) -> f64 {
        let (a, b, c) = self.sides();
        let s = (a + b + c) / 2.0;
        (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt()
    }

    /// Whether the triangle is too thin to subdivide meaningfully.
    pub fn is_degenerate(&self) -> bool {
        let (a, b, c) = self.sides();
        let longest = a.max(b).max(c);
        let cross = (self.b.x - self.a.x) * (self.c.y - self.a.y)
            - (self.b.y - self.a.y) * (self.c.x - self.a.x);
        !cross.is_finite() || longest == 0.0 || cross.abs() / 2.0 <= 1e-9 * longest * longest
    }

    /// Feet of the altitudes from `a`, `b` and `c` (`D` on BC, `E` on AC, `F` on AB).
    pub fn altitude_feet(&self) -> (Point, Point, Point) {
        let (a, b, c) = self.sides();
        let area = self.area();

        let h_a = 2.0 * area / a;
        let h_b = 2.0 * area / b;
        let h_c = 2.0 * area / c;

        // Distance of each foot from the vertex it is measured from, along its edge.
        let bd = leg(c, h_a);
        let ae = leg(c, h_b);
        let af = leg(b, h_c);

        let d = self.b.lerp(self.c, bd / a);
        let e = self.a.lerp(self.c, ae / b);
        let f = self.a.lerp(self.b, af / c);
        (d, e, f)
    }
}

/// The remaining leg of a right triangle with the given hypotenuse and leg.
fn leg(hypotenuse: f64, side: f64) -> f64 {
    (hypotenuse * hypotenuse - side * side).max(0.0).sqrt()
}

/// A Sierpinski fractal under construction.
#[derive(Debug, Clone, Serialize)]
pub struct Sierpinski {
    seed: Triangle,
    /// The seed followed by every inner triangle produced. Never shrinks.
    triangles: Vec<Triangle>,
    #[serde(skip)]
    frontier: Vec<Triangle>,
    generation: usize,
}

impl Sierpinski {
    pub fn new(seed: Triangle) -> Self {
        Self {
            seed,
            triangles: vec![seed],
            frontier: vec![seed],
            generation: 0,
        }
    }

    /// Subdivide every frontier triangle once. Returns the number of triangles drawn.
    pub fn next(&mut self) -> usize {
        let frontier = std::mem::take(&mut self.frontier);
        let mut next_frontier = Vec::with_capacity(frontier.len() * 3);

        for t in &frontier {
            let (d, e, f) = t.altitude_feet();
            self.triangles.push(Triangle::new(d, e, f));
            next_frontier.push(Triangle::new(d, e, t.c));
            next_frontier.push(Triangle::new(d, t.b, f));
            next_frontier.push(Triangle::new(t.a, e, f));
        }

        self.frontier = next_frontier;
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            added = frontier.len(),
            frontier = self.frontier.len(),
            "sierpinski step"
        );
        frontier.len()
    }

    pub fn seed(&self) -> &Triangle {
        &self.seed
    }

    /// The seed plus every inner triangle, in drawing order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn frontier(&self) -> &[Triangle] {
        &self.frontier
    }

    pub fn generation(&self) -> usize {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(p: Point, q: Point, tolerance: f64) -> bool {
        p.distance(q) < tolerance
    }

    fn equilateral() -> Triangle {
        Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, 86.6),
        )
    }

    #[test]
    fn test_equilateral_step_emits_medial_triangle() {
        let t = equilateral();
        let mut fractal = Sierpinski::new(t);
        assert_eq!(fractal.next(), 1);

        let inner = fractal.triangles()[1];
        assert!(close(inner.a, t.b.midpoint(t.c), 0.05));
        assert!(close(inner.b, t.a.midpoint(t.c), 0.05));
        assert!(close(inner.c, t.a.midpoint(t.b), 0.05));
    }

    #[test]
    fn test_right_triangle_feet() {
        // Right angle at A: the feet from B and C both land on A.
        let t = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        );
        let (d, e, f) = t.altitude_feet();

        assert!(close(d, Point::new(1.44, 1.92), 1e-9));
        assert!(close(e, t.a, 1e-6));
        assert!(close(f, t.a, 1e-6));
    }

    #[test]
    fn test_frontier_holds_corner_triangles() {
        let t = equilateral();
        let mut fractal = Sierpinski::new(t);
        fractal.next();

        let frontier = fractal.frontier();
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier[0].c, t.c);
        assert_eq!(frontier[1].b, t.b);
        assert_eq!(frontier[2].a, t.a);
    }

    #[test]
    fn test_drawn_collection_accumulates() {
        let mut fractal = Sierpinski::new(equilateral());
        let mut expected = 1;

        for step in 0..5 {
            let frontier = fractal.frontier().len();
            assert_eq!(frontier, 3usize.pow(step));
            assert_eq!(fractal.next(), frontier);
            expected += frontier;
            assert_eq!(fractal.triangles().len(), expected);
        }
        assert_eq!(fractal.triangles().len(), 1 + 1 + 3 + 9 + 27 + 81);
        assert_eq!(fractal.seed(), &equilateral());
    }

    #[test]
    fn test_area_and_degeneracy() {
        assert!((equilateral().area() - 4330.0).abs() < 1.0);
        assert!(!equilateral().is_degenerate());

        let flat = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!(flat.is_degenerate());

        let point = Triangle::new(Point::default(), Point::default(), Point::default());
        assert!(point.is_degenerate());
    }

    #[test]
    fn test_degenerate_seed_produces_non_finite_points() {
        let point = Triangle::new(Point::default(), Point::default(), Point::default());
        let mut fractal = Sierpinski::new(point);
        fractal.next();
        assert!(!fractal.triangles()[1].a.is_finite());
    }
}
