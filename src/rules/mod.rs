//! Rule engine
//!
//! Orchestrates one analysis pass over a parsed module: each enabled rule
//! family runs its detectors, suppression comments are applied, and the
//! result is an ordered list of violations. The engine never mutates the
//! tree and never errors mid-pass; anything it cannot classify is simply
//! not reported.

pub mod exception_flow;
pub mod nullable_return;

use crate::analyzers::parser::{is_function_like, node_text};
use crate::config::WraplintConfig;
use crate::core::{Fix, ParsedModule, SourceLocation, Violation, ViolationKind};
use crate::registry::KnownApiRegistry;
use crate::suppression::SuppressionIndex;
use tree_sitter::Node;

pub const NULLABLE_RULE: &str = "no-nullable-return";
pub const EXCEPTIONS_RULE: &str = "no-exceptions";

/// Run every enabled rule over one module. Violations come back in source
/// order; each node is visited once per detection family and never
/// revisited.
pub fn analyze_module(
    module: &ParsedModule,
    config: &WraplintConfig,
    registry: &KnownApiRegistry,
) -> Vec<Violation> {
    let suppressions = SuppressionIndex::from_source(&module.source);
    let mut violations = Vec::new();

    if config.rules.no_nullable_return.enabled {
        nullable_return::check(
            module,
            &config.rules.no_nullable_return,
            registry,
            &mut violations,
        );
    }
    if config.rules.no_exceptions.enabled {
        exception_flow::check(
            module,
            &config.rules.no_exceptions,
            registry,
            &mut violations,
        );
    }

    violations.retain(|v| {
        let suppressed = suppressions.is_suppressed(v.location.line);
        if suppressed {
            log::debug!(
                "{}:{} {} suppressed by ignore comment",
                module.path.display(),
                v.location.line,
                v.kind
            );
        }
        !suppressed
    });

    violations.sort_by_key(|v| (v.start_byte, v.kind));
    violations
}

pub(crate) fn make_violation(
    kind: ViolationKind,
    rule: &'static str,
    node: &Node,
    message: String,
    fix: Option<Fix>,
) -> Violation {
    Violation {
        kind,
        rule: rule.to_string(),
        location: SourceLocation::from_node(*node),
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
        message,
        fix,
    }
}

/// The name a function goes by: its declared name, or the variable or
/// property it is assigned to. Anonymous functions have none.
pub(crate) fn function_name(function: &Node, source: &str) -> Option<String> {
    if let Some(name) = function.child_by_field_name("name") {
        return Some(node_text(&name, source).to_string());
    }

    let parent = function.parent()?;
    match parent.kind() {
        "variable_declarator" | "pair" | "public_field_definition" => parent
            .child_by_field_name("name")
            .or_else(|| parent.child_by_field_name("key"))
            .map(|n| node_text(&n, source).to_string()),
        "assignment_expression" => parent
            .child_by_field_name("left")
            .map(|n| node_text(&n, source).to_string()),
        _ => None,
    }
}

/// Name of the nearest enclosing function, used to apply `allow_exceptions`
/// to statements inside exempted functions.
pub(crate) fn enclosing_function_name(node: &Node, source: &str) -> Option<String> {
    let mut current = *node;
    while let Some(parent) = current.parent() {
        if is_function_like(parent.kind()) {
            if let Some(name) = function_name(&parent, source) {
                return Some(name);
            }
        }
        current = parent;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::parser::parse_source;
    use crate::core::JsLanguageVariant;
    use std::path::Path;

    fn analyze(source: &str) -> Vec<Violation> {
        let module =
            parse_source(source, Path::new("test.ts"), JsLanguageVariant::TypeScript).unwrap();
        analyze_module(
            &module,
            &WraplintConfig::default(),
            &KnownApiRegistry::builtin(),
        )
    }

    #[test]
    fn test_violations_are_source_ordered() {
        let source = "throw \"late\";\nconst x = items.find(f);\nthrow \"later\";\n";
        let module =
            parse_source(source, Path::new("test.ts"), JsLanguageVariant::TypeScript).unwrap();
        let violations = analyze_module(
            &module,
            &WraplintConfig::default(),
            &KnownApiRegistry::builtin(),
        );

        let starts: Vec<usize> = violations.iter().map(|v| v.start_byte).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
        assert!(violations.len() >= 3);
    }

    #[test]
    fn test_disabled_rule_reports_nothing() {
        let mut config = WraplintConfig::default();
        config.rules.no_exceptions.enabled = false;

        let module = parse_source(
            "throw \"oops\";",
            Path::new("test.ts"),
            JsLanguageVariant::TypeScript,
        )
        .unwrap();
        let violations = analyze_module(&module, &config, &KnownApiRegistry::builtin());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_ignore_comment_suppresses_line() {
        let violations =
            analyze("const x = items.find(f); // wraplint:ignore\nconst y = items.find(g);\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 2);
    }
}
