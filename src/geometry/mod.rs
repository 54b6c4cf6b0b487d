//! Geometry and the recursive generators.
//!
//! Everything here is plain computation over `f64` coordinates. Nothing in
//! this module knows about sessions, stacks or surfaces.

mod apollonian;
mod circle;
mod hexagon;
mod point;
mod rich;
mod sierpinski;

pub use apollonian::{descartes_curvatures, inscribed_circles, Gap, Gasket};
pub use circle::{intersect, Circle, TANGENCY_EPSILON};
pub use hexagon::{HexTiling, MAX_RINGS};
pub use point::Point;
pub use rich::{RichCircle, RichPoint};
pub use sierpinski::{Sierpinski, Triangle};
