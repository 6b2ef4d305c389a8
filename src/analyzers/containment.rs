//! Ancestor-walk guards against duplicate or incorrect flags
//!
//! A candidate violation site is left alone when it already sits inside a
//! recognized wrapping context: the function-valued argument of a
//! `wrap`/`wrapAsync` call, or the protected block of a `try` construct
//! that will itself be flagged. Walks follow `Node::parent`, which is a
//! handle into the tree's node arena, so traversal cost is bounded by tree
//! depth.

use crate::analyzers::parser::{is_function_like, node_text};
use tree_sitter::Node;

/// Callees whose argument thunks already capture absence and failure.
pub const CAPTURE_CALLEES: &[&str] = &["wrap", "wrapAsync"];

/// True iff `node` sits inside a function-valued argument of a call to one
/// of `callees`. A sibling argument of such a call does not count: the
/// thunk must be the argument the node lives in.
pub fn inside_capture_thunk(node: &Node, source: &str, callees: &[&str]) -> bool {
    let mut current = *node;
    while let Some(parent) = current.parent() {
        if is_function_like(current.kind()) && parent.kind() == "arguments" {
            if let Some(call) = parent.parent() {
                if call.kind() == "call_expression" && is_capture_call(&call, source, callees) {
                    return true;
                }
            }
        }
        current = parent;
    }
    false
}

/// True iff `node` sits inside the protected block of a `try` statement.
/// Call-site flags are suppressed there because the block construct is
/// reported separately.
pub fn inside_try_block(node: &Node) -> bool {
    let mut current = *node;
    while let Some(parent) = current.parent() {
        if parent.kind() == "try_statement" {
            if let Some(body) = parent.child_by_field_name("body") {
                if body.id() == current.id() {
                    return true;
                }
            }
        }
        current = parent;
    }
    false
}

fn is_capture_call(call: &Node, source: &str, callees: &[&str]) -> bool {
    let Some(function) = call.child_by_field_name("function") else {
        return false;
    };
    let name = node_text(&function, source);
    callees
        .iter()
        .any(|c| name == *c || name.ends_with(&format!(".{c}")))
}
