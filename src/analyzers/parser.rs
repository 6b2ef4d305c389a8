//! Tree-sitter parser integration for JavaScript/TypeScript
//!
//! Produces the [`ParsedModule`] every detector reads, plus the node/text
//! helpers shared across the analyzers.

use crate::core::{JsLanguageVariant, ParsedModule};
use anyhow::{Context, Result};
use std::path::Path;
use tree_sitter::{Language as TsLanguage, Node, Parser, Tree};

/// Get the tree-sitter language for a JS variant
fn get_language(variant: JsLanguageVariant) -> TsLanguage {
    match variant {
        JsLanguageVariant::JavaScript | JsLanguageVariant::Jsx => {
            tree_sitter_javascript::LANGUAGE.into()
        }
        JsLanguageVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        JsLanguageVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse source text into a [`ParsedModule`]
pub fn parse_source(content: &str, path: &Path, variant: JsLanguageVariant) -> Result<ParsedModule> {
    let mut parser = Parser::new();
    let language = get_language(variant);

    parser
        .set_language(&language)
        .context("Failed to set tree-sitter language")?;

    let tree = parser
        .parse(content, None)
        .context("Failed to parse source code")?;

    Ok(ParsedModule {
        tree,
        source: content.to_string(),
        path: path.to_path_buf(),
        variant,
    })
}

/// Determine language variant from file path
pub fn detect_variant(path: &Path) -> JsLanguageVariant {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(JsLanguageVariant::from_extension)
        .unwrap_or(JsLanguageVariant::JavaScript)
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Node kinds that open a new function scope. Return statements and await
/// expressions inside these belong to the inner function, not the outer one.
pub const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "function",
    "arrow_function",
    "method_definition",
    "generator_function",
    "generator_function_declaration",
];

pub fn is_function_like(kind: &str) -> bool {
    FUNCTION_KINDS.contains(&kind)
}

/// Split a call into `(owner, member)`: `items.find(..)` resolves to
/// `(Some("items"), "find")`, a bare `fetch(..)` to `(None, "fetch")`.
/// Chained owners keep only their trailing segment, so `window.JSON.parse`
/// resolves to `(Some("JSON"), "parse")`.
pub fn resolve_callee(call: &Node, source: &str) -> Option<(Option<String>, String)> {
    let function = call.child_by_field_name("function")?;

    match function.kind() {
        "identifier" => Some((None, node_text(&function, source).to_string())),
        "member_expression" => {
            let property = function.child_by_field_name("property")?;
            let object = function.child_by_field_name("object")?;
            let owner = node_text(&object, source)
                .rsplit('.')
                .next()
                .unwrap_or_default()
                .to_string();
            Some((Some(owner), node_text(&property, source).to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_variant() {
        assert_eq!(
            detect_variant(Path::new("test.js")),
            JsLanguageVariant::JavaScript
        );
        assert_eq!(
            detect_variant(Path::new("test.ts")),
            JsLanguageVariant::TypeScript
        );
        assert_eq!(detect_variant(Path::new("test.tsx")), JsLanguageVariant::Tsx);
        assert_eq!(
            detect_variant(Path::new("test.unknown")),
            JsLanguageVariant::JavaScript
        );
    }

    #[test]
    fn test_parse_typescript() {
        let source = "function hello(name: string): string { return `Hello ${name}`; }";
        let path = PathBuf::from("test.ts");
        let module = parse_source(source, &path, JsLanguageVariant::TypeScript).unwrap();

        assert!(!has_parse_errors(&module.tree));
        assert_eq!(module.variant, JsLanguageVariant::TypeScript);
    }

    #[test]
    fn test_node_text_roundtrip() {
        let source = "const x = 42;";
        let path = PathBuf::from("test.js");
        let module = parse_source(source, &path, JsLanguageVariant::JavaScript).unwrap();

        let root = module.root();
        assert_eq!(node_text(&root, &module.source), source);
        assert_eq!(node_line(&root), 1);
    }

    #[test]
    fn test_resolve_callee_member() {
        let source = "items.find(p => p.id === id);";
        let module = parse_source(
            source,
            Path::new("test.ts"),
            JsLanguageVariant::TypeScript,
        )
        .unwrap();

        let call = find_first_call(module.root());
        let (owner, member) = resolve_callee(&call, &module.source).unwrap();
        assert_eq!(owner.as_deref(), Some("items"));
        assert_eq!(member, "find");
    }

    #[test]
    fn test_resolve_callee_chained_owner() {
        let source = "window.JSON.parse(raw);";
        let module = parse_source(
            source,
            Path::new("test.ts"),
            JsLanguageVariant::TypeScript,
        )
        .unwrap();

        let call = find_first_call(module.root());
        let (owner, member) = resolve_callee(&call, &module.source).unwrap();
        assert_eq!(owner.as_deref(), Some("JSON"));
        assert_eq!(member, "parse");
    }

    fn find_first_call(node: Node) -> Node {
        if node.kind() == "call_expression" {
            return node;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children {
            if let Some(found) = try_find_call(child) {
                return found;
            }
        }
        panic!("no call expression in fixture");
    }

    fn try_find_call(node: Node) -> Option<Node> {
        if node.kind() == "call_expression" {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        children.into_iter().find_map(try_find_call)
    }
}
