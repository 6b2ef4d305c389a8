//! Fix application
//!
//! The engine only returns edits; applying them to the underlying file
//! happens here, on the host side. Edits are applied back-to-front so
//! earlier ranges stay valid, and overlapping edits are dropped rather
//! than composed.

use crate::core::{Fix, Violation};
use crate::errors::WraplintError;
use std::cmp::Reverse;
use std::path::Path;

/// Apply fixes to source text. Returns the rewritten text and the number
/// of fixes applied; overlapping or out-of-range fixes are skipped.
pub fn apply_fixes(source: &str, fixes: &[Fix]) -> (String, usize) {
    let mut ordered: Vec<&Fix> = fixes.iter().collect();
    ordered.sort_by_key(|f| Reverse((f.start_byte, f.end_byte)));

    let mut result = source.to_string();
    let mut applied: Vec<&Fix> = Vec::new();

    for fix in ordered {
        if fix.end_byte > source.len() || fix.start_byte > fix.end_byte {
            log::warn!(
                "skipping fix with out-of-range span {}..{}",
                fix.start_byte,
                fix.end_byte
            );
            continue;
        }
        if applied.iter().any(|a| a.overlaps(fix)) {
            log::debug!(
                "skipping overlapping fix at {}..{}",
                fix.start_byte,
                fix.end_byte
            );
            continue;
        }
        result.replace_range(fix.start_byte..fix.end_byte, &fix.replacement);
        applied.push(fix);
    }

    (result, applied.len())
}

/// Rewrite one file with every available fix from its violations.
pub fn apply_to_file(path: &Path, violations: &[Violation]) -> Result<usize, WraplintError> {
    let fixes: Vec<Fix> = violations.iter().filter_map(|v| v.fix.clone()).collect();
    if fixes.is_empty() {
        return Ok(0);
    }

    let source = std::fs::read_to_string(path).map_err(|source| WraplintError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (rewritten, applied) = apply_fixes(&source, &fixes);
    if applied > 0 {
        std::fs::write(path, rewritten).map_err(|source| WraplintError::FixWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_single_fix() {
        let source = "const x = items.find(f);";
        let fix = Fix::new(10, 23, "wrap(() => items.find(f))");
        let (result, applied) = apply_fixes(source, &[fix]);

        assert_eq!(applied, 1);
        assert_eq!(result, "const x = wrap(() => items.find(f));");
    }

    #[test]
    fn test_apply_multiple_fixes_back_to_front() {
        let source = "aa bb cc";
        let fixes = vec![Fix::new(0, 2, "xx"), Fix::new(6, 8, "yy")];
        let (result, applied) = apply_fixes(source, &fixes);

        assert_eq!(applied, 2);
        assert_eq!(result, "xx bb yy");
    }

    #[test]
    fn test_overlapping_fix_dropped() {
        let source = "abcdef";
        let fixes = vec![Fix::new(0, 4, "X"), Fix::new(2, 6, "Y")];
        let (result, applied) = apply_fixes(source, &fixes);

        assert_eq!(applied, 1);
        // the later-starting fix wins the back-to-front scan
        assert_eq!(result, "abY");
    }

    #[test]
    fn test_out_of_range_fix_skipped() {
        let source = "short";
        let fixes = vec![Fix::new(0, 99, "X")];
        let (result, applied) = apply_fixes(source, &fixes);

        assert_eq!(applied, 0);
        assert_eq!(result, "short");
    }
}
