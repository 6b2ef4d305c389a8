//! Expression-level absence analysis
//!
//! Decides whether evaluating an expression can produce `null` or
//! `undefined`. The analysis is compositional over conditionals and
//! short-circuit operators and deliberately conservative everywhere else:
//! call results, member reads, and anything dynamic count as not-absent, so
//! the only positives are ones visible in the expression text itself.

use crate::analyzers::parser::node_text;
use crate::analyzers::type_classifier::GENERIC_LABEL;
use tree_sitter::Node;

const SHORT_CIRCUIT_OPERATORS: &[&str] = &["&&", "||", "??"];

/// Whether evaluating the expression can yield an absent value.
pub fn may_be_absent(expr: &Node, source: &str) -> bool {
    match expr.kind() {
        "null" | "undefined" => true,
        // `undefined` is an identifier binding in some grammar versions
        "identifier" => node_text(expr, source) == "undefined",
        "parenthesized_expression" => expr
            .named_child(0)
            .is_some_and(|inner| may_be_absent(&inner, source)),
        "ternary_expression" => branch_may_be_absent(expr, "consequence", source)
            || branch_may_be_absent(expr, "alternative", source),
        "binary_expression" if is_short_circuit(expr, source) => {
            branch_may_be_absent(expr, "left", source)
                || branch_may_be_absent(expr, "right", source)
        }
        _ => false,
    }
}

/// Shape label of the first non-absence literal reachable through
/// conditional and short-circuit branches, depth-first left-to-right.
/// Falls back to `"T"` when no literal is found.
pub fn infer_label(expr: &Node, source: &str) -> String {
    literal_label(expr, source).unwrap_or_else(|| GENERIC_LABEL.to_string())
}

fn literal_label(expr: &Node, source: &str) -> Option<String> {
    match expr.kind() {
        "string" | "template_string" => Some("string".to_string()),
        "number" => Some("number".to_string()),
        "true" | "false" => Some("boolean".to_string()),
        "parenthesized_expression" => expr
            .named_child(0)
            .and_then(|inner| literal_label(&inner, source)),
        "ternary_expression" => branch_label(expr, "consequence", source)
            .or_else(|| branch_label(expr, "alternative", source)),
        "binary_expression" if is_short_circuit(expr, source) => {
            branch_label(expr, "left", source).or_else(|| branch_label(expr, "right", source))
        }
        _ => None,
    }
}

fn branch_may_be_absent(expr: &Node, field: &str, source: &str) -> bool {
    expr.child_by_field_name(field)
        .is_some_and(|branch| may_be_absent(&branch, source))
}

fn branch_label(expr: &Node, field: &str, source: &str) -> Option<String> {
    expr.child_by_field_name(field)
        .and_then(|branch| literal_label(&branch, source))
}

fn is_short_circuit(expr: &Node, source: &str) -> bool {
    expr.child_by_field_name("operator")
        .is_some_and(|op| SHORT_CIRCUIT_OPERATORS.contains(&node_text(&op, source)))
}
