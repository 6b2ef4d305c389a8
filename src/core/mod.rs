pub mod ast;
pub mod types;

pub use ast::{JsLanguageVariant, ParsedModule};
pub use types::{AnalysisReport, FileReport, Fix, SourceLocation, Violation, ViolationKind};
