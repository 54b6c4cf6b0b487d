//! Check command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, SketchError};
use crate::sketch::{scan_paths, Sketch};
use crate::validation::{print_diagnostics, validate_sketch};

/// Check sketches without running them
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Sketch files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let files = scan_paths(&args.paths);
    let mut failed = 0;

    for file in &files {
        eprintln!("{}:", file.display());
        let sketch = match Sketch::load(file) {
            Ok(sketch) => sketch,
            Err(err) => {
                eprintln!("  error: {}", err);
                failed += 1;
                continue;
            }
        };

        let result = validate_sketch(&sketch);
        print_diagnostics(&result);
        if result.has_errors() || (args.strict && result.has_warnings()) {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(SketchError::Build {
            message: format!("{} of {} sketch(es) failed", failed, files.len()),
            help: None,
        });
    }

    println!("Checked {} sketch(es).", files.len());
    Ok(())
}
