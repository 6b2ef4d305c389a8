//! Inline suppression comments and test-file detection
//!
//! `// wraplint:ignore` silences violations on its own line;
//! `// wraplint:ignore-next-line` silences the line below. The index is
//! built from raw source text before the engine pass, so suppression works
//! even on lines the grammar fails to parse cleanly.

use std::collections::HashSet;
use std::path::Path;

const IGNORE_MARKER: &str = "wraplint:ignore";
const IGNORE_NEXT_LINE_MARKER: &str = "wraplint:ignore-next-line";

#[derive(Debug, Default)]
pub struct SuppressionIndex {
    lines: HashSet<usize>,
}

impl SuppressionIndex {
    pub fn from_source(source: &str) -> Self {
        let mut lines = HashSet::new();

        for (i, line) in source.lines().enumerate() {
            let line_number = i + 1;
            if line.contains(IGNORE_NEXT_LINE_MARKER) {
                lines.insert(line_number + 1);
            } else if line.contains(IGNORE_MARKER) {
                lines.insert(line_number);
            }
        }

        Self { lines }
    }

    pub fn is_suppressed(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Whether a path follows common test-file conventions. Used by the
/// exceptions family, which tolerates throw/try in tests when configured.
pub fn is_test_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if name.contains(".test.") || name.contains(".spec.") || name.contains("_test.") {
        return true;
    }

    path.components()
        .any(|c| c.as_os_str() == "__tests__" || c.as_os_str() == "__mocks__")
}
