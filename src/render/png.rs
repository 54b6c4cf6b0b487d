//! PNG output for rasterised canvases.

use std::path::Path;

use image::RgbaImage;

use crate::error::{Result, SketchError};

/// Write a rasterised canvas to a PNG file, creating parent directories.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SketchError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    image.save(path).map_err(|e| SketchError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "wrote png");
    Ok(())
}
