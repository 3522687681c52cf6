//! Core node model for the editable syntax tree
//!
//! Every tree element is a [`Node`]: a small header (origin link, render
//! cache, statement terminator) around a [`NodeData`] payload that carries
//! the variant-specific structure. Child nodes are owned directly by their
//! parent's payload, so a node has exactly one position in the tree.

use serde::{Deserialize, Serialize};
use text_size::{TextRange, TextSize};

use crate::ast::block::{BlockData, BlockShape, Delimiters};

/// Link from a semantic node back to the parse tree element it was built from.
///
/// An origin is plain data (kind id plus byte range), not a handle into the
/// parse tree, so nodes carry no parse tree lifetimes. Lazy expansion uses
/// the origin to find the corresponding parse tree element again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    kind_id: u16,
    range: TextRange,
}

impl Origin {
    /// Create an origin spanning `start..end` bytes
    pub fn from_bytes(kind_id: u16, start: usize, end: usize) -> Self {
        Self {
            kind_id,
            range: TextRange::new(TextSize::new(start as u32), TextSize::new(end as u32)),
        }
    }

    /// Numeric grammar kind of the originating parse tree element
    pub fn kind_id(&self) -> u16 {
        self.kind_id
    }

    /// Byte range of the originating parse tree element
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Byte range as plain `usize` bounds
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        usize::from(self.range.start())..usize::from(self.range.end())
    }
}

/// Variable declaration keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    /// Source keyword for this declaration kind
    pub fn keyword(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }

    /// Parse a declaration keyword
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "var" => Some(VarKind::Var),
            "let" => Some(VarKind::Let),
            "const" => Some(VarKind::Const),
            _ => None,
        }
    }
}

/// Variant payload of a [`Node`]
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Inert source text (whitespace, comments, separators) preserved
    /// between semantic elements
    Trivia(String),
    /// Frozen verbatim text for a construct with no translation rule.
    /// The text lives in the node's render cache and never recomposes.
    Opaque,
    /// Delimited element sequence, possibly not yet expanded
    Block(BlockData),
    /// Declarations (classes, functions, fields, imports, ...)
    Decl(DeclData),
    /// Statements that are not declarations
    Stmt(StmtData),
    /// Expressions
    Expr(ExprData),
    /// Type annotations and type references
    Type(TypeData),
    /// Binding targets and declarator forms
    Binding(BindingData),
    /// A heritage clause such as `extends Base` or `implements A, B`
    Heritage(HeritageData),
}

/// Declaration payloads
#[derive(Debug, Clone, PartialEq)]
pub enum DeclData {
    Class {
        modifiers: Vec<String>,
        name: Box<Node>,
        type_params: Option<String>,
        heritage: Vec<Node>,
        body: Box<Node>,
    },
    Interface {
        modifiers: Vec<String>,
        name: Box<Node>,
        type_params: Option<String>,
        heritage: Vec<Node>,
        body: Box<Node>,
    },
    Function {
        modifiers: Vec<String>,
        name: Box<Node>,
        type_params: Option<String>,
        params: Box<Node>,
        return_type: Option<Box<Node>>,
        body: Option<Box<Node>>,
    },
    Method {
        modifiers: Vec<String>,
        name: Box<Node>,
        type_params: Option<String>,
        params: Box<Node>,
        return_type: Option<Box<Node>>,
        body: Option<Box<Node>>,
    },
    Property {
        modifiers: Vec<String>,
        name: Box<Node>,
        optional: bool,
        type_ann: Option<Box<Node>>,
        value: Option<Box<Node>>,
    },
    Variable {
        kind: VarKind,
        declarators: Vec<Node>,
    },
    Import {
        /// Raw import clause text between the keyword and `from`,
        /// e.g. `{ A, B }` or `* as ns` or `type { C }`
        clause: Option<String>,
        source: Option<Box<Node>>,
    },
    Export {
        default: bool,
        inner: Box<Node>,
    },
}

/// Statement payloads
#[derive(Debug, Clone, PartialEq)]
pub enum StmtData {
    Return { value: Option<Box<Node>> },
    ExprStmt { expr: Box<Node> },
}

/// Expression payloads
#[derive(Debug, Clone, PartialEq)]
pub enum ExprData {
    Ident {
        name: String,
    },
    /// Any literal token, kept as its raw source text (strings keep their
    /// quotes, templates their backticks)
    Literal {
        raw: String,
    },
    Call {
        callee: Box<Node>,
        /// Usually an expression block in parentheses; a tagged template
        /// call carries the template literal here instead
        args: Box<Node>,
    },
    New {
        callee: Box<Node>,
        args: Option<Box<Node>>,
    },
    Member {
        object: Box<Node>,
        /// Raw text between object and property, usually `.` or `?.`
        operator: String,
        property: Box<Node>,
    },
    Pair {
        key: Box<Node>,
        value: Box<Node>,
    },
    Arrow {
        params: Box<Node>,
        return_type: Option<Box<Node>>,
        body: Box<Node>,
    },
    Binary {
        left: Box<Node>,
        operator: String,
        right: Box<Node>,
    },
    Paren {
        inner: Box<Node>,
    },
}

/// Type annotation payloads
#[derive(Debug, Clone, PartialEq)]
pub enum TypeData {
    /// A named type, optionally generic: `Foo`, `Map<K, V>`, `string`
    Ref { name: String, args: Vec<Node> },
    /// A qualification step in a dotted type path: `ns.Inner`
    Qualified { left: Box<Node>, right: Box<Node> },
    Union { members: Vec<Node> },
    Array { elem: Box<Node> },
}

/// Binding payloads
#[derive(Debug, Clone, PartialEq)]
pub enum BindingData {
    /// One `name = value` unit of a variable declaration
    Declarator {
        name: Box<Node>,
        type_ann: Option<Box<Node>>,
        value: Option<Box<Node>>,
    },
    Param {
        pattern: Box<Node>,
        optional: bool,
        type_ann: Option<Box<Node>>,
        default: Option<Box<Node>>,
    },
    /// `{ a, b: c }` destructuring target; elements live in an
    /// expression-shaped block
    ObjectPattern { elements: Box<Node> },
    /// `[a, , b]` destructuring target
    ArrayPattern { elements: Box<Node> },
    Rest { inner: Box<Node> },
}

/// A heritage clause: keyword plus one or more referenced types
#[derive(Debug, Clone, PartialEq)]
pub struct HeritageData {
    pub keyword: String,
    pub types: Vec<Node>,
}

/// A single element of the editable syntax tree.
///
/// Rendering is cached: [`Node::render`](crate::ast::Node::render) returns
/// the cached text when present and recomposes from structure otherwise.
/// Mutating a payload through [`Node::data_mut`] does not invalidate the
/// cache; callers must follow up with [`Node::mark_dirty`] on the mutated
/// node and every affected ancestor, or later renders return stale text.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) data: NodeData,
    pub(crate) origin: Option<Origin>,
    pub(crate) text: Option<String>,
    pub(crate) terminator: &'static str,
}

impl Node {
    fn new(data: NodeData, terminator: &'static str) -> Self {
        Self {
            data,
            origin: None,
            text: None,
            terminator,
        }
    }

    /// Inert source text preserved verbatim
    pub fn trivia(text: impl Into<String>) -> Self {
        Self::new(NodeData::Trivia(text.into()), "")
    }

    /// Frozen verbatim fallback holding `text`
    pub fn opaque(text: impl Into<String>) -> Self {
        let mut node = Self::new(NodeData::Opaque, "");
        node.text = Some(text.into());
        node
    }

    /// Empty, unexpanded block with the given shape and delimiters
    pub fn block(shape: BlockShape, delimiters: Delimiters) -> Self {
        Self::new(NodeData::Block(BlockData::new(shape, delimiters)), "")
    }

    /// Undelimited statement block representing a whole source file.
    /// Its rendered text always ends with exactly one newline.
    pub fn source_root() -> Self {
        let mut data = BlockData::new(BlockShape::Statements, Delimiters::None);
        data.trailing_newline = true;
        Self::new(NodeData::Block(data), "")
    }

    pub fn class_decl(
        modifiers: Vec<String>,
        name: Node,
        type_params: Option<String>,
        heritage: Vec<Node>,
        body: Node,
    ) -> Self {
        Self::new(
            NodeData::Decl(DeclData::Class {
                modifiers,
                name: Box::new(name),
                type_params,
                heritage,
                body: Box::new(body),
            }),
            "",
        )
    }

    pub fn interface_decl(
        modifiers: Vec<String>,
        name: Node,
        type_params: Option<String>,
        heritage: Vec<Node>,
        body: Node,
    ) -> Self {
        Self::new(
            NodeData::Decl(DeclData::Interface {
                modifiers,
                name: Box::new(name),
                type_params,
                heritage,
                body: Box::new(body),
            }),
            "",
        )
    }

    pub fn function_decl(
        modifiers: Vec<String>,
        name: Node,
        type_params: Option<String>,
        params: Node,
        return_type: Option<Node>,
        body: Option<Node>,
    ) -> Self {
        let terminator = if body.is_some() { "" } else { ";" };
        Self::new(
            NodeData::Decl(DeclData::Function {
                modifiers,
                name: Box::new(name),
                type_params,
                params: Box::new(params),
                return_type: return_type.map(Box::new),
                body: body.map(Box::new),
            }),
            terminator,
        )
    }

    pub fn method_decl(
        modifiers: Vec<String>,
        name: Node,
        type_params: Option<String>,
        params: Node,
        return_type: Option<Node>,
        body: Option<Node>,
    ) -> Self {
        let terminator = if body.is_some() { "" } else { ";" };
        Self::new(
            NodeData::Decl(DeclData::Method {
                modifiers,
                name: Box::new(name),
                type_params,
                params: Box::new(params),
                return_type: return_type.map(Box::new),
                body: body.map(Box::new),
            }),
            terminator,
        )
    }

    pub fn property_decl(
        modifiers: Vec<String>,
        name: Node,
        optional: bool,
        type_ann: Option<Node>,
        value: Option<Node>,
    ) -> Self {
        Self::new(
            NodeData::Decl(DeclData::Property {
                modifiers,
                name: Box::new(name),
                optional,
                type_ann: type_ann.map(Box::new),
                value: value.map(Box::new),
            }),
            ";",
        )
    }

    pub fn variable_decl(kind: VarKind, declarators: Vec<Node>) -> Self {
        Self::new(NodeData::Decl(DeclData::Variable { kind, declarators }), ";")
    }

    pub fn import_decl(clause: Option<String>, source: Option<Node>) -> Self {
        Self::new(
            NodeData::Decl(DeclData::Import {
                clause,
                source: source.map(Box::new),
            }),
            ";",
        )
    }

    /// Export wrapper around a declaration or default expression.
    /// Inherits the inner node's statement terminator.
    pub fn export_decl(default: bool, inner: Node) -> Self {
        let terminator = inner.terminator;
        Self::new(
            NodeData::Decl(DeclData::Export {
                default,
                inner: Box::new(inner),
            }),
            terminator,
        )
    }

    pub fn return_stmt(value: Option<Node>) -> Self {
        Self::new(
            NodeData::Stmt(StmtData::Return {
                value: value.map(Box::new),
            }),
            ";",
        )
    }

    pub fn expr_stmt(expr: Node) -> Self {
        Self::new(
            NodeData::Stmt(StmtData::ExprStmt {
                expr: Box::new(expr),
            }),
            ";",
        )
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(NodeData::Expr(ExprData::Ident { name: name.into() }), "")
    }

    pub fn literal(raw: impl Into<String>) -> Self {
        Self::new(NodeData::Expr(ExprData::Literal { raw: raw.into() }), "")
    }

    pub fn call(callee: Node, args: Node) -> Self {
        Self::new(
            NodeData::Expr(ExprData::Call {
                callee: Box::new(callee),
                args: Box::new(args),
            }),
            "",
        )
    }

    pub fn new_expr(callee: Node, args: Option<Node>) -> Self {
        Self::new(
            NodeData::Expr(ExprData::New {
                callee: Box::new(callee),
                args: args.map(Box::new),
            }),
            "",
        )
    }

    pub fn member(object: Node, property: Node) -> Self {
        Self::new(
            NodeData::Expr(ExprData::Member {
                object: Box::new(object),
                operator: ".".to_string(),
                property: Box::new(property),
            }),
            "",
        )
    }

    pub fn pair(key: Node, value: Node) -> Self {
        Self::new(
            NodeData::Expr(ExprData::Pair {
                key: Box::new(key),
                value: Box::new(value),
            }),
            "",
        )
    }

    pub fn arrow(params: Node, return_type: Option<Node>, body: Node) -> Self {
        Self::new(
            NodeData::Expr(ExprData::Arrow {
                params: Box::new(params),
                return_type: return_type.map(Box::new),
                body: Box::new(body),
            }),
            "",
        )
    }

    pub fn binary(left: Node, operator: impl Into<String>, right: Node) -> Self {
        Self::new(
            NodeData::Expr(ExprData::Binary {
                left: Box::new(left),
                operator: operator.into(),
                right: Box::new(right),
            }),
            "",
        )
    }

    pub fn paren(inner: Node) -> Self {
        Self::new(
            NodeData::Expr(ExprData::Paren {
                inner: Box::new(inner),
            }),
            "",
        )
    }

    pub fn type_ref(name: impl Into<String>, args: Vec<Node>) -> Self {
        Self::new(
            NodeData::Type(TypeData::Ref {
                name: name.into(),
                args,
            }),
            "",
        )
    }

    pub fn qualified_type(left: Node, right: Node) -> Self {
        Self::new(
            NodeData::Type(TypeData::Qualified {
                left: Box::new(left),
                right: Box::new(right),
            }),
            "",
        )
    }

    pub fn union_type(members: Vec<Node>) -> Self {
        Self::new(NodeData::Type(TypeData::Union { members }), "")
    }

    pub fn array_type(elem: Node) -> Self {
        Self::new(
            NodeData::Type(TypeData::Array {
                elem: Box::new(elem),
            }),
            "",
        )
    }

    pub fn declarator(name: Node, type_ann: Option<Node>, value: Option<Node>) -> Self {
        Self::new(
            NodeData::Binding(BindingData::Declarator {
                name: Box::new(name),
                type_ann: type_ann.map(Box::new),
                value: value.map(Box::new),
            }),
            "",
        )
    }

    pub fn param(
        pattern: Node,
        optional: bool,
        type_ann: Option<Node>,
        default: Option<Node>,
    ) -> Self {
        Self::new(
            NodeData::Binding(BindingData::Param {
                pattern: Box::new(pattern),
                optional,
                type_ann: type_ann.map(Box::new),
                default: default.map(Box::new),
            }),
            "",
        )
    }

    pub fn object_pattern(elements: Node) -> Self {
        Self::new(
            NodeData::Binding(BindingData::ObjectPattern {
                elements: Box::new(elements),
            }),
            "",
        )
    }

    pub fn array_pattern(elements: Node) -> Self {
        Self::new(
            NodeData::Binding(BindingData::ArrayPattern {
                elements: Box::new(elements),
            }),
            "",
        )
    }

    pub fn rest(inner: Node) -> Self {
        Self::new(
            NodeData::Binding(BindingData::Rest {
                inner: Box::new(inner),
            }),
            "",
        )
    }

    pub fn heritage(keyword: impl Into<String>, types: Vec<Node>) -> Self {
        Self::new(
            NodeData::Heritage(HeritageData {
                keyword: keyword.into(),
                types,
            }),
            "",
        )
    }

    /// Attach an origin link (builder style)
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Seed the render cache with known-exact text (builder style)
    pub fn with_cached_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Variant payload
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Mutable variant payload.
    ///
    /// Mutation does not invalidate render caches. Call
    /// [`Node::mark_dirty`] afterwards on this node and on every ancestor
    /// whose rendering should reflect the change.
    pub fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }

    /// Origin link into the parse tree, if this node was translated
    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    /// Current cache contents, without triggering composition
    pub fn cached_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Text appended after this node when it renders as a statement
    /// block element. Empty for nodes that need no terminator.
    pub fn statement_terminator(&self) -> &'static str {
        self.terminator
    }

    pub fn set_statement_terminator(&mut self, terminator: &'static str) {
        self.terminator = terminator;
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self.data, NodeData::Trivia(_))
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.data, NodeData::Opaque)
    }

    pub fn is_block(&self) -> bool {
        matches!(self.data, NodeData::Block(_))
    }

    /// Move any trailing semicolon out of the cached text into the
    /// statement terminator. Runs on freshly translated statement
    /// elements so that rendering stays byte exact while the terminator
    /// becomes editable on its own.
    pub(crate) fn capture_terminator(&mut self) {
        if self.is_trivia() || self.is_block() {
            return;
        }
        self.terminator = "";
        if let Some(text) = &mut self.text {
            if text.ends_with(';') {
                text.pop();
                self.terminator = ";";
            }
        }
    }

    /// Structural child nodes in declaration order.
    ///
    /// Children are the node-typed parts of the payload. Raw string fields
    /// (modifiers, type parameter text, operators) are not children. Block
    /// children include trivia elements.
    pub fn children(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_children(&mut out);
        out
    }

    /// Mutable view of the structural children, same order as
    /// [`Node::children`]
    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        let mut out = Vec::new();
        self.collect_children_mut(&mut out);
        out
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        match &self.data {
            NodeData::Trivia(_) | NodeData::Opaque => {}
            NodeData::Block(block) => out.extend(block.elements.iter()),
            NodeData::Decl(decl) => match decl {
                DeclData::Class {
                    name,
                    heritage,
                    body,
                    ..
                }
                | DeclData::Interface {
                    name,
                    heritage,
                    body,
                    ..
                } => {
                    out.push(name);
                    out.extend(heritage.iter());
                    out.push(body);
                }
                DeclData::Function {
                    name,
                    params,
                    return_type,
                    body,
                    ..
                }
                | DeclData::Method {
                    name,
                    params,
                    return_type,
                    body,
                    ..
                } => {
                    out.push(name);
                    out.push(params);
                    if let Some(return_type) = return_type {
                        out.push(return_type);
                    }
                    if let Some(body) = body {
                        out.push(body);
                    }
                }
                DeclData::Property {
                    name,
                    type_ann,
                    value,
                    ..
                } => {
                    out.push(name);
                    if let Some(type_ann) = type_ann {
                        out.push(type_ann);
                    }
                    if let Some(value) = value {
                        out.push(value);
                    }
                }
                DeclData::Variable { declarators, .. } => out.extend(declarators.iter()),
                DeclData::Import { source, .. } => {
                    if let Some(source) = source {
                        out.push(source);
                    }
                }
                DeclData::Export { inner, .. } => out.push(inner),
            },
            NodeData::Stmt(stmt) => match stmt {
                StmtData::Return { value } => {
                    if let Some(value) = value {
                        out.push(value);
                    }
                }
                StmtData::ExprStmt { expr } => out.push(expr),
            },
            NodeData::Expr(expr) => match expr {
                ExprData::Ident { .. } | ExprData::Literal { .. } => {}
                ExprData::Call { callee, args } => {
                    out.push(callee);
                    out.push(args);
                }
                ExprData::New { callee, args } => {
                    out.push(callee);
                    if let Some(args) = args {
                        out.push(args);
                    }
                }
                ExprData::Member {
                    object, property, ..
                } => {
                    out.push(object);
                    out.push(property);
                }
                ExprData::Pair { key, value } => {
                    out.push(key);
                    out.push(value);
                }
                ExprData::Arrow {
                    params,
                    return_type,
                    body,
                } => {
                    out.push(params);
                    if let Some(return_type) = return_type {
                        out.push(return_type);
                    }
                    out.push(body);
                }
                ExprData::Binary { left, right, .. } => {
                    out.push(left);
                    out.push(right);
                }
                ExprData::Paren { inner } => out.push(inner),
            },
            NodeData::Type(ty) => match ty {
                TypeData::Ref { args, .. } => out.extend(args.iter()),
                TypeData::Qualified { left, right } => {
                    out.push(left);
                    out.push(right);
                }
                TypeData::Union { members } => out.extend(members.iter()),
                TypeData::Array { elem } => out.push(elem),
            },
            NodeData::Binding(binding) => match binding {
                BindingData::Declarator {
                    name,
                    type_ann,
                    value,
                } => {
                    out.push(name);
                    if let Some(type_ann) = type_ann {
                        out.push(type_ann);
                    }
                    if let Some(value) = value {
                        out.push(value);
                    }
                }
                BindingData::Param {
                    pattern,
                    type_ann,
                    default,
                    ..
                } => {
                    out.push(pattern);
                    if let Some(type_ann) = type_ann {
                        out.push(type_ann);
                    }
                    if let Some(default) = default {
                        out.push(default);
                    }
                }
                BindingData::ObjectPattern { elements }
                | BindingData::ArrayPattern { elements } => out.push(elements),
                BindingData::Rest { inner } => out.push(inner),
            },
            NodeData::Heritage(heritage) => out.extend(heritage.types.iter()),
        }
    }

    fn collect_children_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Node>) {
        match &mut self.data {
            NodeData::Trivia(_) | NodeData::Opaque => {}
            NodeData::Block(block) => out.extend(block.elements.iter_mut()),
            NodeData::Decl(decl) => match decl {
                DeclData::Class {
                    name,
                    heritage,
                    body,
                    ..
                }
                | DeclData::Interface {
                    name,
                    heritage,
                    body,
                    ..
                } => {
                    out.push(name);
                    out.extend(heritage.iter_mut());
                    out.push(body);
                }
                DeclData::Function {
                    name,
                    params,
                    return_type,
                    body,
                    ..
                }
                | DeclData::Method {
                    name,
                    params,
                    return_type,
                    body,
                    ..
                } => {
                    out.push(name);
                    out.push(params);
                    if let Some(return_type) = return_type {
                        out.push(return_type);
                    }
                    if let Some(body) = body {
                        out.push(body);
                    }
                }
                DeclData::Property {
                    name,
                    type_ann,
                    value,
                    ..
                } => {
                    out.push(name);
                    if let Some(type_ann) = type_ann {
                        out.push(type_ann);
                    }
                    if let Some(value) = value {
                        out.push(value);
                    }
                }
                DeclData::Variable { declarators, .. } => out.extend(declarators.iter_mut()),
                DeclData::Import { source, .. } => {
                    if let Some(source) = source {
                        out.push(source);
                    }
                }
                DeclData::Export { inner, .. } => out.push(inner),
            },
            NodeData::Stmt(stmt) => match stmt {
                StmtData::Return { value } => {
                    if let Some(value) = value {
                        out.push(value);
                    }
                }
                StmtData::ExprStmt { expr } => out.push(expr),
            },
            NodeData::Expr(expr) => match expr {
                ExprData::Ident { .. } | ExprData::Literal { .. } => {}
                ExprData::Call { callee, args } => {
                    out.push(callee);
                    out.push(args);
                }
                ExprData::New { callee, args } => {
                    out.push(callee);
                    if let Some(args) = args {
                        out.push(args);
                    }
                }
                ExprData::Member {
                    object, property, ..
                } => {
                    out.push(object);
                    out.push(property);
                }
                ExprData::Pair { key, value } => {
                    out.push(key);
                    out.push(value);
                }
                ExprData::Arrow {
                    params,
                    return_type,
                    body,
                } => {
                    out.push(params);
                    if let Some(return_type) = return_type {
                        out.push(return_type);
                    }
                    out.push(body);
                }
                ExprData::Binary { left, right, .. } => {
                    out.push(left);
                    out.push(right);
                }
                ExprData::Paren { inner } => out.push(inner),
            },
            NodeData::Type(ty) => match ty {
                TypeData::Ref { args, .. } => out.extend(args.iter_mut()),
                TypeData::Qualified { left, right } => {
                    out.push(left);
                    out.push(right);
                }
                TypeData::Union { members } => out.extend(members.iter_mut()),
                TypeData::Array { elem } => out.push(elem),
            },
            NodeData::Binding(binding) => match binding {
                BindingData::Declarator {
                    name,
                    type_ann,
                    value,
                } => {
                    out.push(name);
                    if let Some(type_ann) = type_ann {
                        out.push(type_ann);
                    }
                    if let Some(value) = value {
                        out.push(value);
                    }
                }
                BindingData::Param {
                    pattern,
                    type_ann,
                    default,
                    ..
                } => {
                    out.push(pattern);
                    if let Some(type_ann) = type_ann {
                        out.push(type_ann);
                    }
                    if let Some(default) = default {
                        out.push(default);
                    }
                }
                BindingData::ObjectPattern { elements }
                | BindingData::ArrayPattern { elements } => out.push(elements),
                BindingData::Rest { inner } => out.push(inner),
            },
            NodeData::Heritage(heritage) => out.extend(heritage.types.iter_mut()),
        }
    }
}
