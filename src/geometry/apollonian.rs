//! Apollonian gasket generation.
//!
//! A gasket starts from three mutually tangent circles: an enclosing circle
//! and two equal circles side by side inside it. Every step fills each open
//! gap (a triple of mutually tangent circles) with the circle the Descartes
//! Circle Theorem predicts, then queues the three smaller gaps that circle
//! creates. Expansion is breadth first and has no built-in depth limit; each
//! generation roughly triples the frontier, so callers bound the number of
//! steps themselves.

use num_complex::Complex64;
use serde::Serialize;

use super::{Circle, Point, TANGENCY_EPSILON};

/// Three mutually tangent circles bounding one gap of the packing.
pub type Gap = [Circle; 3];

/// An Apollonian gasket under construction.
#[derive(Debug, Clone, Serialize)]
pub struct Gasket {
    origin: Point,
    enclosing: Option<Circle>,
    /// Every circle produced so far, seeds first. Never shrinks.
    circles: Vec<Circle>,
    /// Gaps waiting for their inscribed circle.
    #[serde(skip)]
    frontier: Vec<Gap>,
    generation: usize,
}

impl Gasket {
    /// An empty gasket centred on `origin`. Call [`Gasket::enclosing`] to seed it.
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            enclosing: None,
            circles: Vec::new(),
            frontier: Vec::new(),
            generation: 0,
        }
    }

    /// A gasket already seeded with an enclosing circle of radius `radius`.
    pub fn seeded(origin: Point, radius: f64) -> Self {
        let mut gasket = Self::new(origin);
        gasket.enclosing(radius);
        gasket
    }

    /// Seed the gasket inside an enclosing circle of radius `radius`.
    ///
    /// Places the boundary (curvature `-1/r`) at the origin and two circles of
    /// curvature `2/r` at `origin ± (r/2, 0)`. Any previous state is replaced.
    pub fn enclosing(&mut self, radius: f64) {
        let Point { x, y } = self.origin;
        let outer = Circle::with_curvature(x, y, -1.0 / radius);
        let left = Circle::with_curvature(x - radius / 2.0, y, 2.0 / radius);
        let right = Circle::with_curvature(x + radius / 2.0, y, 2.0 / radius);

        self.enclosing = Some(outer);
        self.circles = vec![outer, left, right];
        self.frontier = vec![[outer, left, right]];
        self.generation = 0;

        tracing::debug!(radius, "seeded gasket");
    }

    /// Run one generation: fill every gap in the frontier.
    ///
    /// Returns the number of circles added. An unseeded gasket is left as is.
    pub fn next(&mut self) -> usize {
        let frontier = std::mem::take(&mut self.frontier);
        let before = self.circles.len();
        let mut next_frontier = Vec::with_capacity(frontier.len() * 3);

        for [c1, c2, c3] in frontier {
            for circle in inscribed_circles(&c1, &c2, &c3) {
                self.circles.push(circle);
                next_frontier.push([circle, c1, c2]);
                next_frontier.push([circle, c2, c3]);
                next_frontier.push([circle, c1, c3]);
            }
        }

        self.frontier = next_frontier;
        self.generation += 1;

        let added = self.circles.len() - before;
        tracing::debug!(
            generation = self.generation,
            added,
            frontier = self.frontier.len(),
            "gasket step"
        );
        added
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The bounding circle, once seeded.
    pub fn enclosing_circle(&self) -> Option<&Circle> {
        self.enclosing.as_ref()
    }

    /// All circles drawn so far, in the order they were found.
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Gaps that the next step will fill.
    pub fn frontier(&self) -> &[Gap] {
        &self.frontier
    }

    /// Number of completed generation steps since seeding.
    pub fn generation(&self) -> usize {
        self.generation
    }
}

/// Both curvature roots of the Descartes Circle Theorem, larger first.
///
/// `k4 = k1 + k2 + k3 ± 2·sqrt(k1·k2 + k2·k3 + k1·k3)`. The radicand is
/// clamped at zero: for the symmetric seed it is exactly zero in theory and
/// may round to a tiny negative value, in which case both roots coincide.
pub fn descartes_curvatures(k1: f64, k2: f64, k3: f64) -> (f64, f64) {
    let sum = k1 + k2 + k3;
    let root = 2.0 * (k1 * k2 + k2 * k3 + k1 * k3).max(0.0).sqrt();
    (sum + root, sum - root)
}

/// Circles inscribed in the gap bounded by three mutually tangent circles.
///
/// Uses the larger Descartes curvature (the smaller circle nested in the
/// gap) and both centres given by the complex Descartes theorem, keeping
/// the candidates tangent to all three parents. Usually one survives; the
/// symmetric first gap of a seeded gasket yields two, one on each side.
pub fn inscribed_circles(c1: &Circle, c2: &Circle, c3: &Circle) -> Vec<Circle> {
    let (k1, k2, k3) = (c1.curvature, c2.curvature, c3.curvature);
    let (k4, _) = descartes_curvatures(k1, k2, k3);

    // Work relative to the first centre to keep the products small.
    let frame = Complex64::new(c1.center.x, c1.center.y);
    let z1 = Complex64::new(0.0, 0.0);
    let z2 = Complex64::new(c2.center.x, c2.center.y) - frame;
    let z3 = Complex64::new(c3.center.x, c3.center.y) - frame;

    let sum = z1 * k1 + z2 * k2 + z3 * k3;
    let product = z1 * z2 * (k1 * k2) + z2 * z3 * (k2 * k3) + z1 * z3 * (k1 * k3);
    let root = product.sqrt() * 2.0;

    [(sum + root) / k4, (sum - root) / k4]
        .into_iter()
        .map(|z| z + frame)
        .map(|z| Circle::with_curvature(z.re, z.im, k4))
        .filter(|candidate| {
            [c1, c2, c3]
                .iter()
                .all(|parent| candidate.is_tangent_to(parent, TANGENCY_EPSILON))
        })
        .collect()
}
