//! Sketch files (`*.sketch.yaml`).
//!
//! A sketch names a canvas and lists native calls to run in order:
//!
//! ```yaml
//! name: gasket
//! canvas: { width: 400, height: 400, background: "#FFFFFF" }
//! steps:
//!   - call: Apol
//!     args: [200, 200]
//!     let: g
//!   - call: Apol.enclosing
//!     args: ["$g", 180]
//!   - call: Apol.next
//!     args: ["$g"]
//!     repeat: 4
//!   - call: Apol.draw
//!     args: ["$g", "#268BD2"]
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SketchError};
use crate::types::Colour;

/// A parsed sketch.
#[derive(Debug, Clone, Deserialize)]
pub struct Sketch {
    pub name: String,

    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Canvas size and background.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Hex colour; `#00000000` for a transparent canvas.
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            background: "#FFFFFF".to_string(),
        }
    }
}

impl CanvasConfig {
    pub fn background_colour(&self) -> Result<Colour> {
        Colour::from_hex(&self.background).map_err(|_| SketchError::Parse {
            message: format!("Invalid canvas background '{}'", self.background),
            help: Some("Use a hex colour such as \"#FFFFFF\"".to_string()),
        })
    }
}

/// One native call.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Registered name, e.g. `Apol.next`.
    pub call: String,

    #[serde(default)]
    pub args: Vec<Arg>,

    /// Bind the call's result under this name.
    #[serde(default, rename = "let")]
    pub bind: Option<String>,

    /// How many times to run the call.
    #[serde(default = "one")]
    pub repeat: u32,
}

fn one() -> u32 {
    1
}

/// A literal argument as written in YAML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub enum Arg {
    Number(f64),
    /// `"#RRGGBB"` or any other form [`Colour::from_hex`] accepts.
    Colour(Colour),
    /// `"$name"`: the value bound by an earlier `let`.
    Binding(String),
    Text(String),
}

impl TryFrom<serde_yaml::Value> for Arg {
    type Error = String;

    fn try_from(value: serde_yaml::Value) -> std::result::Result<Self, Self::Error> {
        match value {
            serde_yaml::Value::Number(n) => n
                .as_f64()
                .map(Arg::Number)
                .ok_or_else(|| format!("number {} is out of range", n)),
            serde_yaml::Value::String(s) => Ok(Arg::from_text(s)),
            other => Err(format!(
                "arguments must be numbers or strings, found {:?}",
                other
            )),
        }
    }
}

impl Arg {
    fn from_text(s: String) -> Self {
        if let Some(name) = s.strip_prefix('$') {
            return Arg::Binding(name.to_string());
        }
        if s.starts_with('#') {
            if let Ok(colour) = Colour::from_hex(&s) {
                return Arg::Colour(colour);
            }
        }
        Arg::Text(s)
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Number(n) => write!(f, "{}", n),
            Arg::Colour(c) => write!(f, "{}", c),
            Arg::Binding(name) => write!(f, "${}", name),
            Arg::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl Sketch {
    /// Load a sketch from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SketchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read sketch: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a sketch from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| SketchError::Parse {
            message: format!("Invalid sketch: {}", e),
            help: Some("A sketch needs a name and a list of steps".to_string()),
        })
    }

    /// Total native calls the sketch will make.
    pub fn call_count(&self) -> usize {
        self.steps.iter().map(|s| s.repeat as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_sketch() {
        let sketch = Sketch::parse("name: empty").unwrap();
        assert_eq!(sketch.name, "empty");
        assert!(sketch.steps.is_empty());
        assert_eq!(sketch.canvas.width, 400);
        assert_eq!(sketch.canvas.background_colour().unwrap(), Colour::WHITE);
    }

    #[test]
    fn test_parse_steps_and_args() {
        let yaml = r##"
name: demo
canvas:
  width: 200
  height: 100
  background: "#000000"
steps:
  - call: Point
    args: [1, 2.5, "A"]
    let: p
  - call: Point.draw
    args: ["$p", "#DC322F"]
  - call: Apol.next
    args: ["$g"]
    repeat: 3
"##;
        let sketch = Sketch::parse(yaml).unwrap();

        assert_eq!(sketch.canvas.width, 200);
        assert_eq!(sketch.canvas.background_colour().unwrap(), Colour::BLACK);
        assert_eq!(sketch.steps.len(), 3);
        assert_eq!(
            sketch.steps[0].args,
            vec![
                Arg::Number(1.0),
                Arg::Number(2.5),
                Arg::Text("A".to_string())
            ]
        );
        assert_eq!(sketch.steps[0].bind.as_deref(), Some("p"));
        assert_eq!(sketch.steps[0].repeat, 1);
        assert_eq!(
            sketch.steps[1].args,
            vec![Arg::Binding("p".to_string()), Arg::Colour(Colour::RED)]
        );
        assert_eq!(sketch.steps[2].repeat, 3);
        assert_eq!(sketch.call_count(), 5);
    }

    #[test]
    fn test_hash_text_that_is_not_a_colour() {
        let sketch = Sketch::parse("name: t\nsteps:\n  - call: X\n    args: [\"#1\"]").unwrap();
        assert_eq!(sketch.steps[0].args, vec![Arg::Text("#1".to_string())]);
    }

    #[test]
    fn test_reject_non_scalar_args() {
        let err = Sketch::parse("name: t\nsteps:\n  - call: X\n    args: [[1, 2]]").unwrap_err();
        assert!(matches!(err, SketchError::Parse { .. }));

        let err = Sketch::parse("name: t\nsteps:\n  - call: X\n    args: [true]").unwrap_err();
        assert!(matches!(err, SketchError::Parse { .. }));
    }

    #[test]
    fn test_bad_background() {
        let sketch = Sketch::parse("name: t\ncanvas:\n  background: chartreuse").unwrap();
        assert!(sketch.canvas.background_colour().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Sketch::load(Path::new("/definitely/not/here.sketch.yaml")).unwrap_err();
        assert!(matches!(err, SketchError::Io { .. }));
    }
}
