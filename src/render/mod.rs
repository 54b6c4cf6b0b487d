//! Drawing the render queue.
//!
//! [`Surface`] is the write-only drawing contract. [`Recorder`] keeps the
//! calls for inspection; [`Raster`] paints pixels that [`write_png`] saves.

mod paint;
mod png;
mod raster;
mod surface;

pub use paint::{draw_canvas, paint, FILL_LIGHTEN, POINT_RADIUS};
pub use png::write_png;
pub use raster::{Raster, MAX_DIMENSION};
pub use surface::{Recorder, Surface, SurfaceOp};
