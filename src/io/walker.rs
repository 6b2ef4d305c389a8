//! Source file discovery
//!
//! Walks the given paths with gitignore semantics and keeps the JS-family
//! extensions the parser understands.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Expand files and directories into the sorted, deduplicated list of
/// source files to analyze.
pub fn discover_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_source_file(path) {
                files.push(path.clone());
            }
            continue;
        }

        for entry in WalkBuilder::new(path).build().flatten() {
            let entry_path = entry.path();
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if is_file && is_source_file(entry_path) {
                files.push(entry_path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("a.ts")));
        assert!(is_source_file(Path::new("a.mjs")));
        assert!(!is_source_file(Path::new("a.rs")));
        assert!(!is_source_file(Path::new("Makefile")));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.ts"), "const b = 1;").unwrap();
        fs::write(dir.path().join("a.ts"), "const a = 1;").unwrap();
        fs::write(dir.path().join("notes.md"), "# notes").unwrap();

        let files = discover_files(&[dir.path().to_path_buf()]);
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.ts", "b.ts"]);
    }

    #[test]
    fn test_discover_accepts_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.ts");
        fs::write(&file, "const x = 1;").unwrap();

        let files = discover_files(&[file.clone()]);
        assert_eq!(files, vec![file]);
    }
}
