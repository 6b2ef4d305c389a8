use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The kinds of violation the engine reports. The set is closed: every
/// detector produces exactly one of these, and the writers key off them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    NoNullableReturn,
    NoNullableUnion,
    NoThrowStatement,
    NoTryCatchBlock,
    UseWrapSync,
    UseWrapAsync,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoNullableReturn => "no-nullable-return",
            Self::NoNullableUnion => "no-nullable-union",
            Self::NoThrowStatement => "no-throw-statement",
            Self::NoTryCatchBlock => "no-try-catch-block",
            Self::UseWrapSync => "use-wrap-sync",
            Self::UseWrapAsync => "use-wrap-async",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a node in its source file, 1-indexed lines and columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl SourceLocation {
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();

        SourceLocation {
            // tree-sitter rows are 0-based
            line: start.row + 1,
            column: start.column + 1,
            end_line: end.row + 1,
            end_column: end.column + 1,
        }
    }
}

/// A pure text edit. The engine only produces these; applying them to the
/// underlying file is the caller's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub start_byte: usize,
    pub end_byte: usize,
    pub replacement: String,
}

impl Fix {
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
        }
    }

    pub fn overlaps(&self, other: &Fix) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }
}

/// A single finding: what was violated, where, and an optional rewrite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub rule: String,
    pub location: SourceLocation,
    pub start_byte: usize,
    pub end_byte: usize,
    pub message: String,
    pub fix: Option<Fix>,
}

/// Violations for one analyzed file, in source order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
}

/// Aggregated result of one run over many files.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub files_analyzed: usize,
    pub files: Vec<FileReport>,
}

impl AnalysisReport {
    pub fn total_violations(&self) -> usize {
        self.files.iter().map(|f| f.violations.len()).sum()
    }

    pub fn fixable_violations(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| f.violations.iter())
            .filter(|v| v.fix.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ViolationKind::NoNullableReturn.to_string(), "no-nullable-return");
        assert_eq!(ViolationKind::UseWrapAsync.to_string(), "use-wrap-async");
    }

    #[test]
    fn test_fix_overlap() {
        let a = Fix::new(10, 20, "x");
        let b = Fix::new(15, 25, "y");
        let c = Fix::new(20, 30, "z");

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_report_counts() {
        let violation = Violation {
            kind: ViolationKind::NoThrowStatement,
            rule: "no-exceptions".to_string(),
            location: SourceLocation {
                line: 1,
                column: 1,
                end_line: 1,
                end_column: 10,
            },
            start_byte: 0,
            end_byte: 9,
            message: "throw".to_string(),
            fix: Some(Fix::new(0, 9, "return captureError(e);")),
        };
        let report = AnalysisReport {
            files_analyzed: 1,
            files: vec![FileReport {
                path: PathBuf::from("a.ts"),
                violations: vec![violation],
            }],
        };

        assert_eq!(report.total_violations(), 1);
        assert_eq!(report.fixable_violations(), 1);
    }
}
