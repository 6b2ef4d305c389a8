//! Known-API registry
//!
//! A fixed table of external operations known to throw or to return an
//! absence marker, plus the naming heuristic that picks the asynchronous
//! rewrite template. The table is built once at startup and injected into
//! the engine, so a deployment can extend or swap it without touching the
//! detectors.
//!
//! Both halves are deliberately incomplete: an operation missing from the
//! table is simply not detected, and an asynchronous operation whose name
//! does not match the heuristic gets the synchronous template. Under-report
//! is the accepted failure mode.

use std::collections::HashSet;

/// Which half of the table a call matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallFamily {
    /// Operations that can throw at the call site.
    Throwing,
    /// Operations that signal "not found" with null/undefined.
    Absence,
}

#[derive(Debug, Clone)]
pub struct KnownApiRegistry {
    /// `(owner, member)` pairs; an empty owner means a bare call.
    throwing: HashSet<(String, String)>,
    /// Bare member/function names for lookup-style operations.
    absence: HashSet<String>,
    /// Lowercased substrings that mark an operation as asynchronous.
    async_markers: Vec<String>,
}

impl KnownApiRegistry {
    /// The built-in table: platform operations every TS/JS codebase hits.
    pub fn builtin() -> Self {
        let throwing = [
            ("JSON", "parse"),
            ("JSON", "stringify"),
            ("localStorage", "setItem"),
            ("sessionStorage", "setItem"),
            ("", "decodeURIComponent"),
            ("", "decodeURI"),
            ("", "encodeURIComponent"),
            ("", "encodeURI"),
            ("", "structuredClone"),
            ("", "atob"),
            ("", "btoa"),
            ("", "fetch"),
        ]
        .into_iter()
        .map(|(owner, member)| (owner.to_string(), member.to_string()))
        .collect();

        let absence = [
            "find",
            "findLast",
            "pop",
            "shift",
            "getItem",
            "querySelector",
            "getElementById",
            "getAttribute",
            "match",
            "exec",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let async_markers = vec!["fetch".to_string(), "async".to_string()];

        Self {
            throwing,
            absence,
            async_markers,
        }
    }

    /// An empty registry, for deployments that supply their own table.
    pub fn empty() -> Self {
        Self {
            throwing: HashSet::new(),
            absence: HashSet::new(),
            async_markers: Vec::new(),
        }
    }

    pub fn add_throwing(&mut self, owner: &str, member: &str) -> &mut Self {
        self.throwing
            .insert((owner.to_string(), member.to_string()));
        self
    }

    pub fn add_absence(&mut self, member: &str) -> &mut Self {
        self.absence.insert(member.to_string());
        self
    }

    pub fn add_async_marker(&mut self, marker: &str) -> &mut Self {
        self.async_markers.push(marker.to_lowercase());
        self
    }

    /// Classify a resolved call against the table.
    pub fn classify_call(&self, owner: Option<&str>, member: &str) -> Option<CallFamily> {
        let owner_key = owner.unwrap_or_default();
        if self
            .throwing
            .contains(&(owner_key.to_string(), member.to_string()))
        {
            return Some(CallFamily::Throwing);
        }
        if self.absence.contains(member) {
            return Some(CallFamily::Absence);
        }
        None
    }

    /// Naming heuristic for the async rewrite template. Documented source
    /// of false negatives: operations not matching any marker get the
    /// synchronous template.
    pub fn is_likely_async(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.async_markers.iter().any(|m| lowered.contains(m))
    }
}

impl Default for KnownApiRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
