//! Finding sketch files on disk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File suffix that marks a sketch.
pub const SKETCH_SUFFIX: &str = ".sketch.yaml";

/// Check whether a path names a sketch file.
pub fn is_sketch(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(SKETCH_SUFFIX) && n.len() > SKETCH_SUFFIX.len())
}

/// Recursively collect sketch files under a directory, sorted.
pub fn scan_directory(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_sketch(e.path()))
        .map(|e| e.into_path())
        .collect();
    found.sort();
    found
}

/// Expand command-line paths: directories are scanned, files kept as given.
pub fn scan_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            found.extend(scan_directory(path));
        } else {
            found.push(path.clone());
        }
    }
    tracing::debug!(count = found.len(), "sketches found");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_sketch() {
        assert!(is_sketch(Path::new("a/gasket.sketch.yaml")));
        assert!(!is_sketch(Path::new("a/gasket.yaml")));
        assert!(!is_sketch(Path::new(".sketch.yaml")));
    }

    #[test]
    fn test_scan_directory_recurses() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.sketch.yaml"), "name: b").unwrap();
        fs::write(dir.path().join("nested/a.sketch.yaml"), "name: a").unwrap();
        fs::write(dir.path().join("notes.yaml"), "x: 1").unwrap();

        let found = scan_directory(dir.path());
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| is_sketch(p)));
    }

    #[test]
    fn test_scan_paths_keeps_explicit_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("odd-name.yaml");
        fs::write(&file, "name: odd").unwrap();

        let found = scan_paths(&[file.clone(), dir.path().join("missing")]);
        assert_eq!(found[0], file);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_scan_missing_directory() {
        assert!(scan_directory(Path::new("/no/such/dir")).is_empty());
    }
}
