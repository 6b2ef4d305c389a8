// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod fixes;
pub mod io;
pub mod patterns;
pub mod registry;
pub mod rules;
pub mod suppression;

// Re-export commonly used types
pub use crate::analyzers::{analyze_file, detect_variant, parse_source};
pub use crate::config::{RuleSettings, WraplintConfig};
pub use crate::core::{
    AnalysisReport, FileReport, Fix, JsLanguageVariant, ParsedModule, SourceLocation, Violation,
    ViolationKind,
};
pub use crate::errors::WraplintError;
pub use crate::io::{apply_fixes, create_writer, discover_files, OutputFormat, OutputWriter};
pub use crate::patterns::WildcardMatcher;
pub use crate::registry::{CallFamily, KnownApiRegistry};
pub use crate::rules::analyze_module;
