//! Block nodes: delimited element sequences with lazy expansion
//!
//! A block owns an ordered list of elements, semantic nodes interleaved
//! with trivia. Blocks start out unexpanded: created with an empty element
//! list and `analyzed == false`, rendering from their cached source slice.
//! A block is only populated by running block analysis on it (see the
//! translate module), after which `analyzed` flips to true and stays true.
//!
//! The expansion contract is `can_analyze() == !analyzed && elements empty`.
//! Analysis on a block that fails `can_analyze` is a no-op, which makes
//! repeated analysis idempotent. [`BlockData::reset`] clears both sides of
//! the contract to force re-expansion, for example after the backing
//! source text was replaced.

use serde::{Deserialize, Serialize};

use crate::ast::node::{Node, NodeData};

/// Element discipline of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockShape {
    /// Elements are statements; each renders followed by its own
    /// statement terminator
    Statements,
    /// Elements are comma separated expressions; separators are owned by
    /// the block, never by the elements
    Expressions,
}

/// Delimiter tokens rendered around a block's elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiters {
    /// No delimiters (file roots)
    None,
    /// `{` ... `}`
    Braces,
    /// `(` ... `)`
    Parens,
    /// `[` ... `]`
    Brackets,
}

impl Delimiters {
    pub fn open(self) -> &'static str {
        match self {
            Delimiters::None => "",
            Delimiters::Braces => "{",
            Delimiters::Parens => "(",
            Delimiters::Brackets => "[",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Delimiters::None => "",
            Delimiters::Braces => "}",
            Delimiters::Parens => ")",
            Delimiters::Brackets => "]",
        }
    }
}

/// Payload of a block node
#[derive(Debug, Clone, PartialEq)]
pub struct BlockData {
    pub(crate) shape: BlockShape,
    pub(crate) delimiters: Delimiters,
    /// Normalize the rendered text to end with exactly one newline
    /// (set on file roots)
    pub(crate) trailing_newline: bool,
    pub(crate) analyzed: bool,
    pub(crate) elements: Vec<Node>,
}

impl BlockData {
    pub fn new(shape: BlockShape, delimiters: Delimiters) -> Self {
        Self {
            shape,
            delimiters,
            trailing_newline: false,
            analyzed: false,
            elements: Vec::new(),
        }
    }

    pub fn shape(&self) -> BlockShape {
        self.shape
    }

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    pub fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Whether block analysis has populated this block
    pub fn is_analyzed(&self) -> bool {
        self.analyzed
    }

    /// Whether block analysis would do anything: true only for a block
    /// that is unexpanded and has no elements
    pub fn can_analyze(&self) -> bool {
        !self.analyzed && self.elements.is_empty()
    }

    /// Elements in order, trivia included
    pub fn elements(&self) -> &[Node] {
        &self.elements
    }

    /// Append an element. Marks the block analyzed: a manually populated
    /// block is its own source of truth and must not be expanded over.
    pub fn push_element(&mut self, element: Node) {
        self.analyzed = true;
        self.elements.push(element);
    }

    /// Insert an element at `index`, shifting later elements.
    ///
    /// Panics if `index > len`, like [`Vec::insert`].
    pub fn insert_element(&mut self, index: usize, element: Node) {
        self.analyzed = true;
        self.elements.insert(index, element);
    }

    /// Remove and return the element at `index`.
    ///
    /// Panics if `index >= len`, like [`Vec::remove`].
    pub fn remove_element(&mut self, index: usize) -> Node {
        self.elements.remove(index)
    }

    /// Clear all elements and the analyzed flag, restoring the pristine
    /// state so the block can be expanded again. Does not touch any
    /// render cache; pair with [`Node::mark_dirty`] when the backing text
    /// changed.
    pub fn reset(&mut self) {
        self.elements.clear();
        self.analyzed = false;
    }

    /// Recompose this block's text from its delimiters and elements
    pub(crate) fn compose(&mut self) -> String {
        let mut out = String::new();
        out.push_str(self.delimiters.open());
        match self.shape {
            BlockShape::Statements => {
                for element in &mut self.elements {
                    out.push_str(element.render());
                    out.push_str(element.statement_terminator());
                }
            }
            BlockShape::Expressions => {
                // a comma follows a semantic element iff another semantic
                // element comes later; trivia renders bare
                let last_semantic = self.elements.iter().rposition(|e| !e.is_trivia());
                let count = self.elements.len();
                for index in 0..count {
                    let semantic_here = !self.elements[index].is_trivia();
                    let followed_by_semantic =
                        index + 1 < count && !self.elements[index + 1].is_trivia();
                    out.push_str(self.elements[index].render());
                    if semantic_here && last_semantic.is_some_and(|last| index < last) {
                        out.push(',');
                        // translated gaps carry the original spacing; only
                        // bare element pairs need one injected
                        if followed_by_semantic {
                            out.push(' ');
                        }
                    }
                }
            }
        }
        out.push_str(self.delimiters.close());
        if self.trailing_newline {
            while out.ends_with('\n') {
                out.pop();
            }
            out.push('\n');
        }
        out
    }
}

impl Node {
    /// Whether this node is a block that analysis would populate.
    /// False for non-block nodes.
    pub fn can_analyze(&self) -> bool {
        self.block_data().is_some_and(BlockData::can_analyze)
    }

    /// Whether this node needs no further expansion. Non-block nodes are
    /// always fully expanded.
    pub fn is_analyzed(&self) -> bool {
        self.block_data().is_none_or(BlockData::is_analyzed)
    }

    /// Restore a block to its pristine unexpanded state. No-op for
    /// non-block nodes.
    pub fn reset(&mut self) {
        if let Some(block) = self.block_data_mut() {
            block.reset();
        }
    }

    /// Block payload, if this node is a block
    pub fn block_data(&self) -> Option<&BlockData> {
        match &self.data {
            NodeData::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Mutable block payload, if this node is a block
    pub fn block_data_mut(&mut self) -> Option<&mut BlockData> {
        match &mut self.data {
            NodeData::Block(block) => Some(block),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_contract() {
        let mut block = BlockData::new(BlockShape::Statements, Delimiters::Braces);
        assert!(block.can_analyze());
        assert!(!block.is_analyzed());

        block.push_element(Node::ident("x"));
        assert!(!block.can_analyze());
        assert!(block.is_analyzed());

        block.reset();
        assert!(block.can_analyze());
        assert!(block.elements().is_empty());
    }

    #[test]
    fn test_remove_element_keeps_analyzed() {
        let mut block = BlockData::new(BlockShape::Statements, Delimiters::Braces);
        block.push_element(Node::ident("x"));
        let removed = block.remove_element(0);
        assert!(!removed.is_trivia());
        // an emptied block must not silently become expandable again
        assert!(block.is_analyzed());
        assert!(!block.can_analyze());
    }

    #[test]
    fn test_statement_block_appends_terminators() {
        let mut node = Node::block(BlockShape::Statements, Delimiters::Braces);
        {
            let block = node.block_data_mut().unwrap();
            block.push_element(Node::trivia(" "));
            block.push_element(Node::expr_stmt(Node::call(
                Node::ident("f"),
                Node::block(BlockShape::Expressions, Delimiters::Parens),
            )));
            block.push_element(Node::trivia(" "));
        }
        assert_eq!(node.render(), "{ f(); }");
    }

    #[test]
    fn test_expression_block_comma_after_element_with_following_element() {
        let mut node = Node::block(BlockShape::Expressions, Delimiters::Brackets);
        {
            let block = node.block_data_mut().unwrap();
            block.push_element(Node::literal("1"));
            block.push_element(Node::trivia(" "));
            block.push_element(Node::literal("2"));
        }
        assert_eq!(node.render(), "[1, 2]");
    }

    #[test]
    fn test_expression_block_injects_space_between_bare_elements() {
        let mut node = Node::block(BlockShape::Expressions, Delimiters::Parens);
        {
            let block = node.block_data_mut().unwrap();
            block.push_element(Node::ident("a"));
            block.push_element(Node::ident("b"));
        }
        assert_eq!(node.render(), "(a, b)");
    }

    #[test]
    fn test_expression_block_no_comma_before_trailing_trivia() {
        let mut node = Node::block(BlockShape::Expressions, Delimiters::Parens);
        {
            let block = node.block_data_mut().unwrap();
            block.push_element(Node::ident("a"));
            block.push_element(Node::trivia(" "));
        }
        assert_eq!(node.render(), "(a )");
    }

    #[test]
    fn test_empty_blocks_render_delimiters_only() {
        let mut braces = Node::block(BlockShape::Statements, Delimiters::Braces);
        assert_eq!(braces.render(), "{}");
        let mut root = Node::source_root();
        assert_eq!(root.render(), "\n");
    }

    #[test]
    fn test_source_root_normalizes_trailing_newlines() {
        let mut root = Node::source_root();
        {
            let block = root.block_data_mut().unwrap();
            block.push_element(Node::expr_stmt(Node::ident("a")));
            block.push_element(Node::trivia("\n\n\n"));
        }
        assert_eq!(root.render(), "a;\n");
    }
}
