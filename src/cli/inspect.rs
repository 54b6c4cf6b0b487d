//! Inspect command implementation.
//!
//! Runs a sketch and prints the render queue's geometry as JSON.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{Result, SketchError};
use crate::sketch::{run as run_sketch, RunOptions, Sketch};
use crate::types::{Colour, Object};

/// Run a sketch and print what it put on the canvas as JSON
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Sketch file to run
    pub file: PathBuf,

    /// Print on one line
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub name: String,
    pub frames: usize,
    pub shown: Vec<ShownReport>,
}

#[derive(Debug, Serialize)]
pub struct ShownReport {
    pub colour: Colour,
    pub object: Object,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let sketch = Sketch::load(&args.file)?;
    println!("{}", to_json(&report(&sketch)?, args.compact)?);
    Ok(())
}

/// Run the sketch and collect its final render queue.
pub fn report(sketch: &Sketch) -> Result<Report> {
    let run = run_sketch(sketch, RunOptions::default())?;
    let shown = run
        .session
        .canvas()
        .iter()
        .map(|s| ShownReport {
            colour: s.colour,
            object: s.object.borrow().clone(),
        })
        .collect();

    Ok(Report {
        name: sketch.name.clone(),
        frames: run.frames,
        shown,
    })
}

fn to_json(report: &Report, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(report)
    } else {
        serde_json::to_string_pretty(report)
    };
    json.map_err(|e| SketchError::Build {
        message: format!("Failed to encode report: {}", e),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_report_geometry() {
        let sketch = Sketch::parse(
            r##"
name: pair
steps:
  - call: Point
    args: [1, 2, "A"]
    let: p
  - call: Circle
    args: ["$p", 3]
    let: c
  - call: Circle.draw
    args: ["$c", "#268BD2"]
  - call: Point.draw
    args: ["$p"]
"##,
        )
        .unwrap();

        let report = report(&sketch).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["name"], json!("pair"));
        assert_eq!(value["frames"], json!(2));
        assert_eq!(value["shown"][0]["colour"], json!("#268BD2"));
        assert_eq!(value["shown"][0]["object"]["class"], json!("circle"));
        assert_eq!(value["shown"][0]["object"]["circle"]["radius"], json!(3.0));
        assert_eq!(
            value["shown"][1]["object"],
            json!({"class": "point", "point": {"x": 1.0, "y": 2.0}, "label": "A"})
        );
    }

    #[test]
    fn test_compact_is_single_line() {
        let sketch = Sketch::parse("name: empty").unwrap();
        let text = to_json(&report(&sketch).unwrap(), true).unwrap();
        assert!(!text.contains('\n'));
        assert_eq!(text, r#"{"name":"empty","frames":0,"shown":[]}"#);
    }
}
