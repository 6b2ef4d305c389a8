//! Typed errors for the host-facing analysis pipeline.
//!
//! The engine itself never errors mid-pass; these cover the boundary work
//! around it, reading files and producing a usable tree. Callers that do
//! not care about the category can bubble them through `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WraplintError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse { path: PathBuf },

    #[error("failed to write fixes to {path}: {source}")]
    FixWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
