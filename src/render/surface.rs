//! The write-only drawing surface and a recording implementation.
//!
//! Coordinates are canvas units: origin at top-left, y grows downward.

use crate::types::Colour;

/// A 2D surface that accepts paths, paints and translations.
///
/// Path calls accumulate into the current path; `stroke` and `fill` paint it
/// and leave it in place until the next `begin_path`.
pub trait Surface {
    /// Discard the current path.
    fn begin_path(&mut self);

    /// Start a new subpath at (x, y).
    fn move_to(&mut self, x: f64, y: f64);

    /// Extend the current subpath with a line to (x, y).
    fn line_to(&mut self, x: f64, y: f64);

    /// Add a circular arc, angles in radians, clockwise in screen space.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);

    /// Join the current subpath back to its start.
    fn close_path(&mut self);

    fn stroke(&mut self, colour: Colour);

    fn fill(&mut self, colour: Colour);

    /// Push the current transform.
    fn save(&mut self);

    /// Shift the origin of later path calls.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Pop back to the last saved transform.
    fn restore(&mut self);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    ClosePath,
    Stroke(Colour),
    Fill(Colour),
    Save,
    Translate(f64, f64),
    Restore,
}

/// A surface that only remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct Recorder {
    ops: Vec<SurfaceOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// How many paint calls were made.
    pub fn paints(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Stroke(_) | SurfaceOp::Fill(_)))
            .count()
    }
}

impl Surface for Recorder {
    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::LineTo(x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.ops.push(SurfaceOp::Arc {
            cx,
            cy,
            radius,
            start,
            end,
        });
    }

    fn close_path(&mut self) {
        self.ops.push(SurfaceOp::ClosePath);
    }

    fn stroke(&mut self, colour: Colour) {
        self.ops.push(SurfaceOp::Stroke(colour));
    }

    fn fill(&mut self, colour: Colour) {
        self.ops.push(SurfaceOp::Fill(colour));
    }

    fn save(&mut self) {
        self.ops.push(SurfaceOp::Save);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(SurfaceOp::Translate(dx, dy));
    }

    fn restore(&mut self) {
        self.ops.push(SurfaceOp::Restore);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_call_order() {
        let mut rec = Recorder::new();
        let surface: &mut dyn Surface = &mut rec;
        surface.begin_path();
        surface.move_to(1.0, 2.0);
        surface.line_to(3.0, 4.0);
        surface.close_path();
        surface.stroke(Colour::RED);

        assert_eq!(
            rec.ops(),
            &[
                SurfaceOp::BeginPath,
                SurfaceOp::MoveTo(1.0, 2.0),
                SurfaceOp::LineTo(3.0, 4.0),
                SurfaceOp::ClosePath,
                SurfaceOp::Stroke(Colour::RED),
            ]
        );
        assert_eq!(rec.paints(), 1);
    }
}
