//! Syntax-tree analyzers shared by the rules
//!
//! Everything here is a pure read over the tree-sitter tree: classifying
//! annotations, profiling return flow, and walking ancestors for
//! containment checks. Nothing in this module reports violations itself;
//! the one exception is [`analyze_file`], the per-file entry point that
//! strings parsing and the rule pass together for the host.

pub mod containment;
pub mod nullability;
pub mod parser;
pub mod return_flow;
pub mod type_classifier;

use crate::config::WraplintConfig;
use crate::core::FileReport;
use crate::errors::WraplintError;
use crate::registry::KnownApiRegistry;
use std::path::Path;

pub use parser::{detect_variant, parse_source};

/// Read, parse, and analyze one file. A tree with parse errors is still
/// analyzed best-effort; only a file that cannot be read or turned into a
/// tree at all is an error.
pub fn analyze_file(
    path: &Path,
    config: &WraplintConfig,
    registry: &KnownApiRegistry,
) -> Result<FileReport, WraplintError> {
    let content = std::fs::read_to_string(path).map_err(|source| WraplintError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let variant = detect_variant(path);
    let module = parse_source(&content, path, variant).map_err(|_| WraplintError::Parse {
        path: path.to_path_buf(),
    })?;

    if parser::has_parse_errors(&module.tree) {
        log::warn!(
            "{} has syntax errors, results may be incomplete",
            path.display()
        );
    }

    let violations = crate::rules::analyze_module(&module, config, registry);
    Ok(FileReport {
        path: path.to_path_buf(),
        violations,
    })
}
