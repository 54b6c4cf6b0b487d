//! Circles with signed curvature, tangency and intersection.

use serde::Serialize;

use super::Point;

/// Tolerance used when deciding whether two circles touch.
pub const TANGENCY_EPSILON: f64 = 1e-7;

/// A circle carrying both its radius and its signed curvature.
///
/// A negative curvature marks an enclosing circle: the other circles of a
/// packing sit inside it. The radius is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub curvature: f64,
}

impl Circle {
    /// A circle from its radius; curvature is `1 / radius`.
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            center: Point::new(x, y),
            radius,
            curvature: 1.0 / radius,
        }
    }

    /// A circle from a signed curvature; radius is `|1 / curvature|`.
    pub fn with_curvature(x: f64, y: f64, curvature: f64) -> Self {
        Self {
            center: Point::new(x, y),
            radius: (1.0 / curvature).abs(),
            curvature,
        }
    }

    /// True when this circle encloses its neighbours.
    pub fn is_enclosing(&self) -> bool {
        self.curvature < 0.0
    }

    /// Whether the two circles touch at exactly one point, within `epsilon`.
    ///
    /// Covers both external tangency (`d = r1 + r2`) and internal tangency
    /// (`d = |r1 - r2|`).
    pub fn is_tangent_to(&self, other: &Circle, epsilon: f64) -> bool {
        let d = self.center.distance(other.center);
        let external = (d - (self.radius + other.radius)).abs() < epsilon;
        let internal = (d - (other.radius - self.radius).abs()).abs() < epsilon;
        external || internal
    }

    /// Intersection points with another circle. See [`intersect`].
    pub fn intersections(&self, other: &Circle) -> Vec<Point> {
        intersect(self.center, self.radius, other.center, other.radius)
    }
}

/// Intersect two circles given by centre and radius.
///
/// Returns no points when the circles are apart, nested without touching, or
/// concentric; one point when they are tangent; two points otherwise. No
/// tolerance is applied, so near-tangent inputs can carry extra rounding
/// error in the returned points.
pub fn intersect(c1: Point, r1: f64, c2: Point, r2: f64) -> Vec<Point> {
    let d = c1.distance(c2);

    if d == 0.0 || d > r1 + r2 || d < (r1 - r2).abs() {
        return Vec::new();
    }

    // Distance from c1 to the radical line along the centre line.
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let ux = (c2.x - c1.x) / d;
    let uy = (c2.y - c1.y) / d;
    let base = Point::new(c1.x + a * ux, c1.y + a * uy);

    if h == 0.0 {
        return vec![base];
    }

    vec![
        Point::new(base.x - h * uy, base.y + h * ux),
        Point::new(base.x + h * uy, base.y - h * ux),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_and_curvature_agree() {
        let c = Circle::new(0.0, 0.0, 4.0);
        assert_eq!(c.curvature, 0.25);

        let enclosing = Circle::with_curvature(1.0, 2.0, -0.5);
        assert_eq!(enclosing.radius, 2.0);
        assert!(enclosing.is_enclosing());
    }

    #[test]
    fn test_external_and_internal_tangency() {
        let a = Circle::new(0.0, 0.0, 1.0);
        let b = Circle::new(3.0, 0.0, 2.0);
        assert!(a.is_tangent_to(&b, TANGENCY_EPSILON));

        let outer = Circle::with_curvature(0.0, 0.0, -0.1);
        let inner = Circle::new(5.0, 0.0, 5.0);
        assert!(outer.is_tangent_to(&inner, TANGENCY_EPSILON));
        assert!(inner.is_tangent_to(&outer, TANGENCY_EPSILON));

        let apart = Circle::new(10.0, 0.0, 1.0);
        assert!(!a.is_tangent_to(&apart, TANGENCY_EPSILON));
    }

    #[test]
    fn test_two_intersections_are_symmetric() {
        let r = 5.0;
        let d = 6.0;
        let points = intersect(Point::new(-d / 2.0, 0.0), r, Point::new(d / 2.0, 0.0), r);

        assert_eq!(points.len(), 2);
        assert!(points[0].x.abs() < 1e-12);
        assert!(points[1].x.abs() < 1e-12);
        assert!((points[0].y + points[1].y).abs() < 1e-12);
        assert!((points[0].y.abs() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_tangent_circles_meet_once_on_centre_line() {
        let r = 5.0;
        let points = intersect(Point::new(-r, 0.0), r, Point::new(r, 0.0), r);
        assert_eq!(points, vec![Point::new(0.0, 0.0)]);

        let points = intersect(Point::new(0.0, 0.0), 2.0, Point::new(0.0, 5.0), 3.0);
        assert_eq!(points, vec![Point::new(0.0, 2.0)]);
    }

    #[test]
    fn test_no_intersection_cases() {
        let far = intersect(Point::new(0.0, 0.0), 1.0, Point::new(5.0, 0.0), 1.0);
        assert!(far.is_empty());

        let nested = intersect(Point::new(0.0, 0.0), 10.0, Point::new(1.0, 0.0), 2.0);
        assert!(nested.is_empty());

        let concentric = intersect(Point::new(1.0, 1.0), 3.0, Point::new(1.0, 1.0), 3.0);
        assert!(concentric.is_empty());
    }

    #[test]
    fn test_intersection_points_lie_on_both_circles() {
        let a = Circle::new(1.0, 2.0, 4.0);
        let b = Circle::new(4.0, 6.0, 3.0);
        for p in a.intersections(&b) {
            assert!((p.distance(a.center) - a.radius).abs() < 1e-9);
            assert!((p.distance(b.center) - b.radius).abs() < 1e-9);
        }
        assert_eq!(a.intersections(&b).len(), 2);
    }
}
