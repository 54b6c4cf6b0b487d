//! Static checks over a sketch.
//!
//! Each check takes a `&Sketch` and returns a `ValidationResult`. Nothing is
//! executed; binding types come from the return types of resolved overloads.

use std::collections::{HashMap, HashSet};

use crate::bridge::registry;
use crate::error::SketchError;
use crate::geometry::{Point, Triangle};
use crate::render::MAX_DIMENSION;
use crate::sketch::{Arg, Sketch};
use crate::types::{format_types, TypeDesc};

use super::warning::{Diagnostic, ValidationResult};

/// Generations past which a single generator is flagged as expensive.
pub const DEEP_GENERATIONS: u32 = 10;

/// Check the canvas block.
pub fn check_canvas(sketch: &Sketch) -> ValidationResult {
    let mut result = ValidationResult::new();
    let canvas = &sketch.canvas;

    if canvas.width == 0 || canvas.height == 0 {
        result.push(
            Diagnostic::error(
                "sketchpad::check::empty-canvas",
                format!("Canvas is {}x{}", canvas.width, canvas.height),
            )
            .with_help("Give the canvas a non-zero width and height"),
        );
    }

    if canvas.width > MAX_DIMENSION || canvas.height > MAX_DIMENSION {
        result.push(
            Diagnostic::error(
                "sketchpad::check::oversize-canvas",
                format!("Canvas is {}x{}", canvas.width, canvas.height),
            )
            .with_help(format!(
                "Keep each side at or below {} units",
                MAX_DIMENSION
            )),
        );
    }

    if let Err(SketchError::Parse { message, help }) = canvas.background_colour() {
        let mut d = Diagnostic::error("sketchpad::check::bad-background", message);
        if let Some(help) = help {
            d = d.with_help(help);
        }
        result.push(d);
    }

    result
}

/// Follow bindings through the steps and resolve every call.
///
/// Reports unknown callables, undefined bindings, overload mismatches,
/// bindings of `Nothing`, and bindings never read.
pub fn check_calls(sketch: &Sketch) -> ValidationResult {
    let mut result = ValidationResult::new();
    let natives = registry();

    // `None` marks a binding whose type could not be worked out.
    let mut types: HashMap<&str, Option<TypeDesc>> = HashMap::new();
    let mut bound: Vec<(&str, usize)> = Vec::new();
    let mut used: HashSet<&str> = HashSet::new();

    for (i, step) in sketch.steps.iter().enumerate() {
        let mut args = Vec::with_capacity(step.args.len());
        let mut known = true;

        for arg in &step.args {
            let ty = match arg {
                Arg::Number(_) => Some(TypeDesc::Number),
                Arg::Colour(_) => Some(TypeDesc::Colour),
                Arg::Text(_) => Some(TypeDesc::Text),
                Arg::Binding(name) => {
                    used.insert(name.as_str());
                    match types.get(name.as_str()) {
                        Some(ty) => *ty,
                        None => {
                            result.push(
                                Diagnostic::error(
                                    "sketchpad::check::undefined-binding",
                                    format!("${} is used before it is bound", name),
                                )
                                .with_help(format!("Add `let: {}` to an earlier step", name))
                                .at_step(i),
                            );
                            None
                        }
                    }
                }
            };
            match ty {
                Some(ty) => args.push(ty),
                None => known = false,
            }
        }

        let returns = match natives.get(&step.call) {
            None => {
                let mut d = Diagnostic::error(
                    "sketchpad::check::unknown-callable",
                    format!("'{}' is not a registered native", step.call),
                )
                .at_step(i);
                if let Some(candidate) = natives.suggest(&step.call) {
                    d = d.with_help(format!("did you mean '{}'?", candidate));
                }
                result.push(d);
                None
            }
            Some(_) if !known => None,
            Some(callable) => match callable.resolve(&args) {
                Ok(resolved) => Some(resolved.signature.return_type()),
                Err(SketchError::TypeMismatch { help, .. }) => {
                    let mut d = Diagnostic::error(
                        "sketchpad::check::type-mismatch",
                        format!("No overload of {} accepts ({})", step.call, format_types(&args)),
                    )
                    .at_step(i);
                    if let Some(help) = help {
                        d = d.with_help(help);
                    }
                    result.push(d);
                    None
                }
                Err(other) => {
                    result.push(
                        Diagnostic::error("sketchpad::check::resolve", other.to_string()).at_step(i),
                    );
                    None
                }
            },
        };

        if let Some(name) = &step.bind {
            if returns == Some(TypeDesc::Nothing) {
                result.push(
                    Diagnostic::warning(
                        "sketchpad::check::binds-nothing",
                        format!("{} returns Nothing; ${} will hold Nothing", step.call, name),
                    )
                    .at_step(i),
                );
            }
            types.insert(name.as_str(), returns);
            bound.push((name.as_str(), i));
        }
    }

    for (name, step) in bound {
        if !used.contains(name) && !name.starts_with('_') {
            result.push(
                Diagnostic::warning(
                    "sketchpad::check::unused-binding",
                    format!("${} is bound but never used", name),
                )
                .with_help("Prefix the name with '_' to keep it anyway")
                .at_step(step),
            );
        }
    }

    result
}

/// Flag steps that will never run.
pub fn check_repeats(sketch: &Sketch) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (i, step) in sketch.steps.iter().enumerate() {
        if step.repeat == 0 {
            result.push(
                Diagnostic::warning(
                    "sketchpad::check::zero-repeat",
                    format!("{} has `repeat: 0` and never runs", step.call),
                )
                .at_step(i),
            );
        }
    }
    result
}

/// Flag generators stepped so often that their output explodes.
///
/// Both generators triple their frontier every step.
pub fn check_generation_depth(sketch: &Sketch) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut depth: HashMap<&str, u32> = HashMap::new();
    let mut flagged: HashSet<&str> = HashSet::new();

    for (i, step) in sketch.steps.iter().enumerate() {
        if step.call.ends_with(".next") {
            if let Some(Arg::Binding(name)) = step.args.first() {
                let generations = depth.entry(name.as_str()).or_insert(0);
                *generations = generations.saturating_add(step.repeat);
                if *generations > DEEP_GENERATIONS && flagged.insert(name.as_str()) {
                    result.push(
                        Diagnostic::warning(
                            "sketchpad::check::deep-generation",
                            format!(
                                "${} reaches generation {}; output grows threefold per step",
                                name, generations
                            ),
                        )
                        .with_help(format!("Keep generators to {} steps or fewer", DEEP_GENERATIONS))
                        .at_step(i),
                    );
                }
            }
        }

        if let Some(name) = &step.bind {
            depth.remove(name.as_str());
            flagged.remove(name.as_str());
        }
    }

    result
}

/// Flag literal Sierpinski seeds with no area.
pub fn check_sierpinski_seeds(sketch: &Sketch) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, step) in sketch.steps.iter().enumerate() {
        if step.call != "Sierp" {
            continue;
        }
        let coords: Vec<f64> = step
            .args
            .iter()
            .filter_map(|a| match a {
                Arg::Number(n) => Some(*n),
                _ => None,
            })
            .collect();
        if coords.len() != 6 || step.args.len() != 6 {
            continue;
        }

        let seed = Triangle::new(
            Point::new(coords[0], coords[1]),
            Point::new(coords[2], coords[3]),
            Point::new(coords[4], coords[5]),
        );
        if seed.is_degenerate() {
            result.push(
                Diagnostic::warning(
                    "sketchpad::check::degenerate-seed",
                    "Sierpinski seed has no area; subdivisions will be NaN",
                )
                .with_help("Use three points that are not on one line")
                .at_step(i),
            );
        }
    }

    result
}
