//! Render command implementation.
//!
//! Runs sketch files and writes PNG images.

use std::path::{Path, PathBuf};

use clap::Args;
use image::RgbaImage;

use crate::bridge::Shown;
use crate::error::{Result, SketchError};
use crate::render::{draw_canvas, write_png, Raster};
use crate::sketch::{run as run_sketch, scan_paths, CanvasConfig, RunOptions, Sketch};
use crate::validation::{print_diagnostics, validate_sketch};

/// Run sketches and write PNG images
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Sketch files or directories to scan for `*.sketch.yaml`
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Pixels per canvas unit
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Also write every frame to `<output>/<name>/frame-NNN.png`
    #[arg(long)]
    pub frames: bool,

    /// Skip the static checks before running
    #[arg(long)]
    pub no_check: bool,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let files = scan_paths(&args.paths);
    if files.is_empty() {
        return Err(SketchError::Build {
            message: "No sketches found".to_string(),
            help: Some("Sketch files end in .sketch.yaml".to_string()),
        });
    }

    for file in &files {
        render_file(file, &args)?;
    }

    println!(
        "Rendered {} sketch(es) to {}",
        files.len(),
        args.output.display()
    );
    Ok(())
}

fn render_file(path: &Path, args: &RenderArgs) -> Result<()> {
    let sketch = Sketch::load(path)?;

    if !args.no_check {
        let result = validate_sketch(&sketch);
        if result.has_errors() || result.has_warnings() {
            eprintln!("{}:", path.display());
            print_diagnostics(&result);
        }
        if result.has_errors() {
            return Err(SketchError::Build {
                message: format!("Sketch '{}' failed its checks", sketch.name),
                help: Some("Fix the errors above or pass --no-check".to_string()),
            });
        }
    }

    let run = run_sketch(
        &sketch,
        RunOptions {
            snapshot_frames: args.frames,
        },
    )?;

    let output_path = args.output.join(format!("{}.png", sketch.name));
    let image = rasterise(run.session.canvas(), &sketch.canvas, args.scale)?;
    write_png(&image, &output_path)?;
    println!(
        "  {} -> {} ({} frame(s))",
        sketch.name,
        output_path.display(),
        run.frames
    );

    if args.frames {
        let frame_dir = args.output.join(&sketch.name);
        for frame in &run.snapshots {
            let image = rasterise(&frame.canvas, &sketch.canvas, args.scale)?;
            write_png(&image, &frame_dir.join(format!("frame-{:03}.png", frame.index)))?;
        }
    }

    Ok(())
}

/// Paint a render queue onto a fresh canvas.
pub fn rasterise(canvas: &[Shown], config: &CanvasConfig, scale: u32) -> Result<RgbaImage> {
    let mut raster = Raster::new(
        config.width,
        config.height,
        scale,
        config.background_colour()?,
    )?;
    draw_canvas(canvas, &mut raster);
    Ok(raster.into_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SKETCH: &str = r##"
name: tiles
canvas:
  width: 60
  height: 40
steps:
  - call: Hexa
    args: [30, 20, 6, 1]
    let: h
  - call: Hexa.draw
    args: ["$h", "#000000"]
  - call: Circle
    args: [30, 20, 15]
    let: c
  - call: Circle.draw
    args: ["$c"]
"##;

    fn args(paths: Vec<PathBuf>, output: PathBuf) -> RenderArgs {
        RenderArgs {
            paths,
            output,
            scale: 1,
            frames: false,
            no_check: false,
        }
    }

    #[test]
    fn test_render_writes_png_of_canvas_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiles.sketch.yaml");
        fs::write(&path, SKETCH).unwrap();
        let output = dir.path().join("out");

        run(args(vec![path], output.clone())).unwrap();

        let img = image::open(output.join("tiles.png")).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (60, 40));
        assert!(img.pixels().any(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_render_scans_directories_and_frames() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tiles.sketch.yaml"), SKETCH).unwrap();
        let output = dir.path().join("out");

        let mut a = args(vec![dir.path().to_path_buf()], output.clone());
        a.scale = 2;
        a.frames = true;
        run(a).unwrap();

        let img = image::open(output.join("tiles.png")).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (120, 80));
        assert!(output.join("tiles").join("frame-000.png").exists());
        assert!(output.join("tiles").join("frame-001.png").exists());
        assert!(!output.join("tiles").join("frame-002.png").exists());
    }

    #[test]
    fn test_render_refuses_failing_checks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.sketch.yaml");
        fs::write(&path, "name: bad\nsteps:\n  - call: Nope").unwrap();

        let err = run(args(vec![path], dir.path().join("out"))).unwrap_err();
        assert!(matches!(err, SketchError::Build { .. }));
        assert!(!dir.path().join("out").join("bad.png").exists());
    }

    #[test]
    fn test_demos_check_clean_and_render() {
        let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");
        let files = scan_paths(&[demos]);
        assert_eq!(files.len(), 3);

        for file in &files {
            let sketch = Sketch::load(file).unwrap();
            assert!(validate_sketch(&sketch).is_ok(), "{} has diagnostics", file.display());
            let run = run_sketch(&sketch, RunOptions::default()).unwrap();
            let image = rasterise(run.session.canvas(), &sketch.canvas, 1).unwrap();
            assert_eq!(image.dimensions(), (sketch.canvas.width, sketch.canvas.height));
        }
    }

    #[test]
    fn test_render_nothing_found() {
        let dir = tempdir().unwrap();
        let err = run(args(vec![dir.path().to_path_buf()], dir.path().join("out"))).unwrap_err();
        assert!(matches!(err, SketchError::Build { .. }));
    }

    #[test]
    fn test_oversized_scale_is_an_error() {
        let config = CanvasConfig {
            width: 100_000,
            height: 100,
            ..CanvasConfig::default()
        };
        let err = rasterise(&[], &config, 100_000).unwrap_err();
        assert!(matches!(err, SketchError::Build { .. }));
    }
}
