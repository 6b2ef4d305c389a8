use std::path::PathBuf;

/// Language variant of a JS-family source file.
///
/// The variant decides which tree-sitter grammar parses the file: TSX/JSX
/// need their own grammars because JSX syntax is not a superset of the
/// plain grammars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsLanguageVariant {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl JsLanguageVariant {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "jsx" => Some(Self::Jsx),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }
}

/// A parsed source file: the tree-sitter tree plus the text it was parsed
/// from. The tree owns all nodes; analysis only ever reads it.
#[derive(Clone, Debug)]
pub struct ParsedModule {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub path: PathBuf,
    pub variant: JsLanguageVariant,
}

impl ParsedModule {
    pub fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }
}
