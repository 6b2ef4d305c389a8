//! Wildcard matching for exception lists
//!
//! Configuration lists names to exempt either exactly (`debugDump`) or with
//! `*` wildcards (`debug*`, `legacy*Helper*`). Patterns compile to anchored
//! regexes; a pattern that fails to compile matches nothing, per the
//! engine's never-crash contract.

use regex::Regex;

#[derive(Debug, Default)]
pub struct WildcardMatcher {
    compiled: Vec<Regex>,
}

impl WildcardMatcher {
    pub fn new(patterns: &[String]) -> Self {
        let compiled = patterns
            .iter()
            .filter_map(|p| compile_pattern(p))
            .collect();
        Self { compiled }
    }

    /// Disjunction over the pattern list: any match suffices.
    pub fn matches(&self, name: &str) -> bool {
        self.compiled.iter().any(|re| re.is_match(name))
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

fn compile_pattern(pattern: &str) -> Option<Regex> {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');
    for (i, part) in pattern.split('*').enumerate() {
        if i > 0 {
            regex.push_str(".*");
        }
        regex.push_str(&regex::escape(part));
    }
    regex.push('$');
    Regex::new(&regex).ok()
}
