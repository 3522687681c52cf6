//! TypeScript parsing via tree-sitter
//!
//! Thin adapter around the external tree-sitter parser. A source text is
//! parsed once into a [`ParsedSource`]; translation and lazy block
//! expansion read the resulting tree without ever reparsing.

use serde::{Deserialize, Serialize};
use tree_sitter::{Language, Node as ParseNode, Parser, Tree};

use crate::Result;
use crate::error::MomijiError;

/// Grammar used to parse a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    #[default]
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    pub fn name(self) -> &'static str {
        match self {
            SourceLanguage::TypeScript => "typescript",
            SourceLanguage::Tsx => "tsx",
        }
    }

    fn grammar(self) -> Language {
        match self {
            SourceLanguage::TypeScript => tree_sitter_typescript::language_typescript(),
            SourceLanguage::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }
}

/// A source text together with its parse tree
#[derive(Debug)]
pub struct ParsedSource {
    text: String,
    tree: Tree,
}

impl ParsedSource {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Root parse tree element
    pub fn root(&self) -> ParseNode<'_> {
        self.tree.root_node()
    }

    /// Whether the parse tree contains error or missing elements
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Stateless wrapper constructing a configured tree-sitter parser per call
pub struct SourceParser {
    language: SourceLanguage,
}

impl SourceParser {
    pub fn new(language: SourceLanguage) -> Self {
        Self { language }
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Parse `text` into a tree, keeping the text alongside
    pub fn parse(&self, text: impl Into<String>) -> Result<ParsedSource> {
        let text = text.into();
        let mut parser = Parser::new();
        parser.set_language(&self.language.grammar()).map_err(|e| {
            MomijiError::parse_error(format!(
                "failed to load {} grammar: {e}",
                self.language.name()
            ))
        })?;
        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| MomijiError::parse_error("tree-sitter produced no tree"))?;
        Ok(ParsedSource { text, tree })
    }
}
