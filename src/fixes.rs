//! Fix emission
//!
//! Builds the pure text edits attached to violations. Every emitter either
//! returns a rewrite that preserves behavior or declines with `None`;
//! declining still reports the violation, it just requires a manual edit.
//! The nullable-annotation kinds never get a fix here at all: changing a
//! type annotation without rewriting every return would change semantics.

use crate::analyzers::parser::{is_function_like, node_text};
use crate::core::Fix;
use tree_sitter::Node;

/// Rewrite a call to a known throwing/absence-producing operation into a
/// captured thunk: `wrap(() => e)` or `wrapAsync(() => e)`.
pub fn fix_for_call(call: &Node, source: &str, asynchronous: bool) -> Fix {
    let call_text = node_text(call, source);
    let template = if asynchronous { "wrapAsync" } else { "wrap" };
    Fix::new(
        call.start_byte(),
        call.end_byte(),
        format!("{template}(() => {call_text})"),
    )
}

/// Rewrite a throw statement into a returned error value. A constructed
/// error or a bare identifier is passed through; any other thrown value is
/// wrapped in an error constructor first, since the error slot's contract
/// requires an error-shaped value.
pub fn fix_for_throw(statement: &Node, source: &str) -> Option<Fix> {
    let thrown = statement.named_child(0)?;
    let thrown_text = node_text(&thrown, source);

    let already_error = matches!(thrown.kind(), "new_expression" | "identifier");
    let replacement = if already_error {
        format!("return captureError({thrown_text});")
    } else {
        format!("return captureError(makeError({thrown_text}));")
    };

    Some(Fix::new(
        statement.start_byte(),
        statement.end_byte(),
        replacement,
    ))
}

/// Rewrite a try/catch into a single wrapped-block call. Declines when the
/// statement nests with another try in either direction: overlapping text
/// edits cannot be composed safely.
pub fn fix_for_try(statement: &Node, source: &str) -> Option<Fix> {
    if has_try_ancestor(statement) || has_try_descendant(statement) {
        return None;
    }

    let body = statement.child_by_field_name("body")?;
    let body_text = node_text(&body, source);

    let replacement = if block_contains_await(&body) {
        format!("await wrapAsync(async () => {body_text});")
    } else {
        format!("wrap(() => {body_text});")
    };

    Some(Fix::new(
        statement.start_byte(),
        statement.end_byte(),
        replacement,
    ))
}

fn has_try_ancestor(node: &Node) -> bool {
    let mut current = *node;
    while let Some(parent) = current.parent() {
        if parent.kind() == "try_statement" {
            return true;
        }
        current = parent;
    }
    false
}

fn has_try_descendant(node: &Node) -> bool {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .iter()
        .any(|child| child.kind() == "try_statement" || has_try_descendant(child))
}

/// Suspension-point scan for the template choice. Stops at nested function
/// boundaries: an await inside a callback does not make the block itself
/// asynchronous.
fn block_contains_await(node: &Node) -> bool {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.iter().any(|child| {
        if is_function_like(child.kind()) {
            return false;
        }
        child.kind() == "await_expression" || block_contains_await(child)
    })
}
