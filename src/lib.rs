//! sketchpad - generative vector art from scripted native calls
//!
//! A typed native-function bridge (exact-type overload resolution over a
//! stack calling convention) and the recursive generators it exposes:
//! Apollonian gaskets, Sierpinski triangles, hexagonal tilings and
//! construction-diagram circles. Sketch files drive the natives from YAML
//! and render the result to PNG.

pub mod bridge;
pub mod cli;
pub mod error;
pub mod geometry;
pub mod library;
pub mod render;
pub mod sketch;
pub mod types;
pub mod validation;

pub use bridge::{
    call, registry, Args, ClassDesc, NativeCallable, NativeRegistry, OverloadSet, Session,
    Shown, Signature, ValueStack,
};
pub use error::{Result, SketchError};
pub use geometry::{
    descartes_curvatures, inscribed_circles, intersect, Circle, Gasket, HexTiling, Point,
    RichCircle, RichPoint, Sierpinski, Triangle,
};
pub use render::{draw_canvas, write_png, Raster, Recorder, Surface, SurfaceOp};
pub use sketch::{run, scan_paths, Run, RunOptions, Sketch};
pub use types::{ClassKind, Colour, ObjRef, Object, TypeDesc, Value};
pub use validation::{validate_sketch, Diagnostic, Severity, ValidationResult};
