//! Labelled points and circles for construction diagrams.
//!
//! Unlike the generator-internal [`Circle`], these carry a label and expose
//! their coordinates as named fields to scripts.

use serde::Serialize;

use super::{Circle, Point};

/// A labelled point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichPoint {
    pub point: Point,
    pub label: Option<String>,
}

impl RichPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub const FIELDS: &'static [&'static str] = &["x", "y"];

    /// Read a named field.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "x" => Some(self.point.x),
            "y" => Some(self.point.y),
            _ => None,
        }
    }
}

/// A labelled circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichCircle {
    pub circle: Circle,
    pub label: Option<String>,
}

impl RichCircle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            circle: Circle::new(x, y, radius),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub const FIELDS: &'static [&'static str] = &["x", "y", "r"];

    /// Read a named field.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "x" => Some(self.circle.center.x),
            "y" => Some(self.circle.center.y),
            "r" => Some(self.circle.radius),
            _ => None,
        }
    }

    /// Where the two circles cross: zero, one (tangent) or two points.
    pub fn intersect(&self, other: &RichCircle) -> Vec<RichPoint> {
        self.circle
            .intersections(&other.circle)
            .into_iter()
            .map(|p| RichPoint {
                point: p,
                label: None,
            })
            .collect()
    }
}
