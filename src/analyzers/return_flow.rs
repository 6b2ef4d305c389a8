//! Return-flow profiling for a single function
//!
//! Collects the return points that belong to one function, stopping at
//! nested function boundaries, and classifies the function's return shape.
//! The classification drives the nullable-return rule: naked returns alone
//! never flag, but mixing naked and valued returns is always suspect since
//! it usually means "return nothing on the exceptional path".

use crate::analyzers::nullability::{infer_label, may_be_absent};
use crate::analyzers::parser::is_function_like;
use crate::analyzers::type_classifier::GENERIC_LABEL;
use tree_sitter::Node;

/// How a function's collected return points classify.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReturnShape {
    /// No return points, or only naked returns. Never flagged.
    VoidLike,
    /// Both naked and valued returns. Always flagged.
    Mixed { label: String },
    /// Every return carries a value. Flagged iff one may be absent.
    Valued { may_be_absent: bool, label: String },
}

impl ReturnShape {
    pub fn is_flagged(&self) -> bool {
        match self {
            ReturnShape::VoidLike => false,
            ReturnShape::Mixed { .. } => true,
            ReturnShape::Valued { may_be_absent, .. } => *may_be_absent,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ReturnShape::VoidLike => GENERIC_LABEL,
            ReturnShape::Mixed { label } | ReturnShape::Valued { label, .. } => label,
        }
    }
}

/// Profile the return flow of a function node.
///
/// An arrow with an expression body has no return statements; its body is
/// the single value return.
pub fn profile_function(function: &Node, source: &str) -> ReturnShape {
    let Some(body) = function.child_by_field_name("body") else {
        return ReturnShape::VoidLike;
    };

    if body.kind() != "statement_block" {
        return ReturnShape::Valued {
            may_be_absent: may_be_absent(&body, source),
            label: infer_label(&body, source),
        };
    }

    let mut naked = 0usize;
    let mut valued: Vec<Node> = Vec::new();
    collect_returns(&body, &mut naked, &mut valued);

    classify(naked, &valued, source)
}

fn classify(naked: usize, valued: &[Node], source: &str) -> ReturnShape {
    match (naked, valued) {
        (_, []) => ReturnShape::VoidLike,
        (0, [first, ..]) => ReturnShape::Valued {
            may_be_absent: valued.iter().any(|v| may_be_absent(v, source)),
            label: infer_label(first, source),
        },
        (_, [first, ..]) => ReturnShape::Mixed {
            label: infer_label(first, source),
        },
    }
}

fn collect_returns<'t>(node: &Node<'t>, naked: &mut usize, valued: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();

    for child in children {
        if is_function_like(child.kind()) {
            // returns inside a nested function belong to it
            continue;
        }

        if child.kind() == "return_statement" {
            match return_argument(&child) {
                Some(argument) => valued.push(argument),
                None => *naked += 1,
            }
            continue;
        }

        collect_returns(&child, naked, valued);
    }
}

fn return_argument<'t>(statement: &Node<'t>) -> Option<Node<'t>> {
    // `return;` has no named children; `return e;` has the expression
    statement.named_child(0)
}
