//! Static checks for sketches.
//!
//! Runs a suite of checks against a parsed sketch without executing it.
//! Used by both `sketchpad check` and `sketchpad render`.

mod checks;
mod warning;

pub use checks::DEEP_GENERATIONS;
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::sketch::Sketch;

/// Run all checks against a sketch.
pub fn validate_sketch(sketch: &Sketch) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_canvas(sketch));
    result.merge(checks::check_calls(sketch));
    result.merge(checks::check_repeats(sketch));
    result.merge(checks::check_generation_depth(sketch));
    result.merge(checks::check_sierpinski_seeds(sketch));

    tracing::debug!(
        sketch = %sketch.name,
        errors = result.error_count(),
        warnings = result.warning_count(),
        "validated"
    );
    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult) {
    for d in result.iter() {
        match d.step {
            Some(step) => eprintln!("  {}[{}] step {}: {}", d.severity, d.code, step + 1, d.message),
            None => eprintln!("  {}[{}]: {}", d.severity, d.code, d.message),
        }
        if let Some(help) = &d.help {
            for line in help.lines() {
                eprintln!("    help: {}", line);
            }
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        eprintln!("Check failed: {} error(s), {} warning(s)", errors, warnings);
    } else if warnings > 0 {
        eprintln!("Check passed ({} warning(s))", warnings);
    } else {
        eprintln!("Check passed.");
    }
}
