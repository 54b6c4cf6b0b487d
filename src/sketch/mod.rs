//! Sketch files and the driver that runs them.
//!
//! A sketch is a YAML list of native calls. The runner executes it on a
//! fresh [`Session`](crate::bridge::Session) and counts the frames the
//! calls ask for.

mod document;
mod runner;
mod scanner;

pub use document::{Arg, CanvasConfig, Sketch, Step};
pub use runner::{lookup, run, Frame, Run, RunOptions};
pub use scanner::{is_sketch, scan_directory, scan_paths, SKETCH_SUFFIX};
