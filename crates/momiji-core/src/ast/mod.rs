//! Editable, lossless syntax tree for TypeScript sources
//!
//! This module implements the semantic tree that translation (see
//! [`crate::translate`]) builds out of an external parse tree. The tree
//! preserves all source information including whitespace, comments and
//! separators, enabling:
//! - Byte exact reproduction of unmodified sources
//! - Targeted edits that leave untouched regions untouched
//! - Structural search and introspection without reparsing
//!
//! ## Architecture
//!
//! Nodes own their children directly, so every node has exactly one
//! position in the tree and there are no ids, arenas or parent pointers:
//!
//! - **Payloads** ([`NodeData`]): one variant per semantic construct,
//!   plus [`NodeData::Trivia`] for inert text and [`NodeData::Opaque`]
//!   for frozen fallback text
//! - **Blocks** ([`BlockData`]): delimited element sequences that expand
//!   lazily; an unexpanded block renders from its cached source slice
//! - **Render cache**: each node caches its rendered text; invalidation
//!   is manual via [`Node::mark_dirty`] and deliberately never walks up
//!
//! ## Trivia handling
//!
//! Trivia sits between block elements as ordinary elements, not attached
//! to tokens. Separators are owned by the container: statement blocks
//! append each element's own terminator, expression blocks insert commas
//! between semantic elements. Trivia nodes never carry separators.
//!
//! ## Example
//!
//! ```rust,ignore
//! use momiji_core::SourceRegistry;
//!
//! let mut registry = SourceRegistry::new();
//! registry.set_source_text("demo.ts", "const a = 1;\n")?;
//! registry.analyze("demo.ts", true)?;
//!
//! // Verify lossless property
//! assert_eq!(registry.render("demo.ts")?, "const a = 1;\n");
//! ```

mod block;
mod flatten;
mod node;
mod render;
mod walk;

pub use block::{BlockData, BlockShape, Delimiters};
pub use node::{
    BindingData, DeclData, ExprData, HeritageData, Node, NodeData, Origin, StmtData, TypeData,
    VarKind,
};
