//! Painting script objects onto a surface.

use std::f64::consts::TAU;

use crate::bridge::Shown;
use crate::geometry::{Circle, Gasket, HexTiling, Point, Sierpinski, Triangle};
use crate::types::{Colour, Object};

use super::Surface;

/// Radius of the dot drawn for a point.
pub const POINT_RADIUS: f64 = 2.0;

/// How far towards white Sierpinski fills are lightened, in percent.
pub const FILL_LIGHTEN: f32 = 60.0;

/// Paint the render queue in display order.
pub fn draw_canvas(canvas: &[Shown], surface: &mut dyn Surface) {
    for shown in canvas {
        paint(&shown.object.borrow(), shown.colour, surface);
    }
}

/// Paint one object in the given stroke colour.
pub fn paint(object: &Object, colour: Colour, surface: &mut dyn Surface) {
    match object {
        Object::Apollonian(gasket) => paint_gasket(gasket, colour, surface),
        Object::Sierpinski(fractal) => paint_sierpinski(fractal, colour, surface),
        Object::Hexagons(tiling) => paint_hexagons(tiling, colour, surface),
        Object::Point(p) => {
            circle_path(surface, p.point, POINT_RADIUS);
            surface.fill(colour);
        }
        Object::Circle(c) => stroke_circle(&c.circle, colour, surface),
    }
}

fn circle_path(surface: &mut dyn Surface, center: Point, radius: f64) {
    surface.begin_path();
    surface.arc(center.x, center.y, radius, 0.0, TAU);
    surface.close_path();
}

fn stroke_circle(circle: &Circle, colour: Colour, surface: &mut dyn Surface) {
    circle_path(surface, circle.center, circle.radius);
    surface.stroke(colour);
}

fn paint_gasket(gasket: &Gasket, colour: Colour, surface: &mut dyn Surface) {
    for circle in gasket.circles() {
        stroke_circle(circle, colour, surface);
    }
}

fn triangle_path(surface: &mut dyn Surface, t: &Triangle) {
    surface.begin_path();
    surface.move_to(t.a.x, t.a.y);
    surface.line_to(t.b.x, t.b.y);
    surface.line_to(t.c.x, t.c.y);
    surface.close_path();
}

fn paint_sierpinski(fractal: &Sierpinski, colour: Colour, surface: &mut dyn Surface) {
    triangle_path(surface, fractal.seed());
    surface.stroke(colour);

    let fill = colour.lighten(FILL_LIGHTEN);
    for t in fractal.triangles().iter().skip(1) {
        triangle_path(surface, t);
        surface.fill(fill);
        surface.stroke(colour);
    }
}

fn paint_hexagons(tiling: &HexTiling, colour: Colour, surface: &mut dyn Surface) {
    let corners = tiling.cell_corners();
    for center in tiling.cell_centers() {
        surface.save();
        surface.translate(center.x, center.y);
        surface.begin_path();
        surface.move_to(corners[0].x, corners[0].y);
        for corner in &corners[1..] {
            surface.line_to(corner.x, corner.y);
        }
        surface.close_path();
        surface.stroke(colour);
        surface.restore();
    }
}
