//! Classification of TypeScript type annotations
//!
//! Decides whether an annotation admits an absent value (`null` or
//! `undefined`, standalone or as a union member) and picks the label used
//! in violation messages. Anything the classifier does not recognize falls
//! back to [`TypeShape::Other`] rather than failing the pass.

use crate::analyzers::parser::node_text;
use tree_sitter::Node;

/// Label used when no concrete value type can be named.
pub const GENERIC_LABEL: &str = "T";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeShape {
    Null,
    Undefined,
    /// Union members, flattened one level: `a | b | c` yields three members
    /// even though the grammar nests the unions.
    Union(Vec<TypeShape>),
    Named(String),
    Other,
}

impl TypeShape {
    pub fn is_absence_marker(&self) -> bool {
        matches!(self, TypeShape::Null | TypeShape::Undefined)
    }
}

/// Classify a type node. Accepts either the bare type or its enclosing
/// `type_annotation` wrapper.
pub fn classify(node: &Node, source: &str) -> TypeShape {
    let node = peel_annotation(node);

    // null/undefined have shifted between grammar kinds across tree-sitter
    // releases; the text is the stable discriminator.
    match node_text(&node, source).trim() {
        "null" => return TypeShape::Null,
        "undefined" => return TypeShape::Undefined,
        _ => {}
    }

    match node.kind() {
        "union_type" => TypeShape::Union(flatten_union(&node, source)),
        "parenthesized_type" => match first_named_child(&node) {
            Some(inner) => classify(&inner, source),
            None => TypeShape::Other,
        },
        "predefined_type" | "type_identifier" => {
            TypeShape::Named(node_text(&node, source).to_string())
        }
        "generic_type" => classify_generic(&node, source),
        "literal_type" => TypeShape::Other,
        _ => TypeShape::Other,
    }
}

/// True iff the type admits an absent value: standalone null/undefined, or
/// a union with either among its top-level members.
pub fn is_absence_capable(shape: &TypeShape) -> bool {
    match shape {
        TypeShape::Null | TypeShape::Undefined => true,
        TypeShape::Union(members) => members.iter().any(TypeShape::is_absence_marker),
        _ => false,
    }
}

/// The label interpolated into violation messages: for a union with exactly
/// one non-absence named member, that member's name; otherwise `"T"`.
pub fn representative_label(shape: &TypeShape) -> String {
    match shape {
        TypeShape::Union(members) => {
            let value_members: Vec<&TypeShape> = members
                .iter()
                .filter(|m| !m.is_absence_marker())
                .collect();
            match value_members.as_slice() {
                [TypeShape::Named(label)] => label.clone(),
                _ => GENERIC_LABEL.to_string(),
            }
        }
        TypeShape::Named(label) => label.clone(),
        _ => GENERIC_LABEL.to_string(),
    }
}

fn peel_annotation<'t>(node: &Node<'t>) -> Node<'t> {
    if node.kind() == "type_annotation" {
        // the annotation is `: T`; the type is its sole named child
        if let Some(inner) = first_named_child(node) {
            return inner;
        }
    }
    *node
}

fn flatten_union(node: &Node, source: &str) -> Vec<TypeShape> {
    let mut members = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match classify(&child, source) {
            TypeShape::Union(nested) => members.extend(nested),
            shape => members.push(shape),
        }
    }
    members
}

/// `Promise<T>` classifies as its argument so async signatures like
/// `Promise<string | null>` are judged on the resolved value.
fn classify_generic(node: &Node, source: &str) -> TypeShape {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(&n, source).to_string())
        .unwrap_or_default();

    if name == "Promise" {
        if let Some(args) = node.child_by_field_name("type_arguments") {
            let mut cursor = args.walk();
            let type_args: Vec<Node> = args.named_children(&mut cursor).collect();
            if let [only] = type_args.as_slice() {
                return classify(only, source);
            }
        }
    }

    TypeShape::Named(name)
}

fn first_named_child<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    node.named_child(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::parser::parse_source;
    use crate::core::JsLanguageVariant;
    use std::path::Path;

    fn classify_return_type(source: &str) -> TypeShape {
        let module =
            parse_source(source, Path::new("test.ts"), JsLanguageVariant::TypeScript).unwrap();
        let root = module.root();
        let function = root.named_child(0).expect("function fixture");
        let return_type = function
            .child_by_field_name("return_type")
            .expect("return type fixture");
        classify(&return_type, &module.source)
    }

    #[test]
    fn test_standalone_null() {
        let shape = classify_return_type("function f(): null { return null; }");
        assert_eq!(shape, TypeShape::Null);
        assert!(is_absence_capable(&shape));
    }

    #[test]
    fn test_union_with_null() {
        let shape = classify_return_type("function f(): string | null { return null; }");
        assert!(is_absence_capable(&shape));
        assert_eq!(representative_label(&shape), "string");
    }

    #[test]
    fn test_union_with_undefined() {
        let shape = classify_return_type("function f(): number | undefined { return 1; }");
        assert!(is_absence_capable(&shape));
        assert_eq!(representative_label(&shape), "number");
    }

    #[test]
    fn test_three_member_union_flattens() {
        let shape = classify_return_type("function f(): string | number | null { return 1; }");
        match &shape {
            TypeShape::Union(members) => assert_eq!(members.len(), 3),
            other => panic!("expected union, got {other:?}"),
        }
        assert!(is_absence_capable(&shape));
        // two value members, so no single representative
        assert_eq!(representative_label(&shape), "T");
    }

    #[test]
    fn test_plain_type_not_absence_capable() {
        let shape = classify_return_type("function f(): string { return \"x\"; }");
        assert_eq!(shape, TypeShape::Named("string".to_string()));
        assert!(!is_absence_capable(&shape));
    }

    #[test]
    fn test_named_reference_union() {
        let shape = classify_return_type("function f(): User | null { return null; }");
        assert!(is_absence_capable(&shape));
        assert_eq!(representative_label(&shape), "User");
    }

    #[test]
    fn test_promise_peels_to_argument() {
        let shape =
            classify_return_type("async function f(): Promise<string | null> { return null; }");
        assert!(is_absence_capable(&shape));
        assert_eq!(representative_label(&shape), "string");
    }

    #[test]
    fn test_promise_of_plain_type() {
        let shape = classify_return_type("async function f(): Promise<string> { return \"x\"; }");
        assert!(!is_absence_capable(&shape));
    }

    #[test]
    fn test_unrecognized_falls_back_to_other() {
        let shape = classify_return_type("function f(): { a: number } | null { return null; }");
        // object literal member classifies as Other but the union still
        // carries the null marker
        assert!(is_absence_capable(&shape));
        assert_eq!(representative_label(&shape), "T");
    }
}
