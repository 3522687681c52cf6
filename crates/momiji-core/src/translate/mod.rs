//! Translation from external parse trees to semantic nodes
//!
//! The translator walks a tree-sitter parse tree and produces the
//! editable tree of [`crate::ast`]. Dispatch is by parse tree kind: each
//! supported kind has one construction rule that extracts the relevant
//! parts (fields, children, raw slices), recursively translates sub
//! parts, and emits a node whose render cache is seeded with the exact
//! source slice and whose origin records where it came from.
//!
//! ## Block analysis
//!
//! Container kinds (file roots, class and interface bodies, statement
//! blocks, argument and parameter lists, object and array literals)
//! become block nodes. Their elements materialize only through block
//! analysis, which walks the parse tree element's children and the gaps
//! between them:
//! - gap text becomes trivia elements, preserved verbatim
//! - separator syntax is never stored as element text: a trailing
//!   semicolon moves into the element's statement terminator, a comma in
//!   a gap is dropped, and containers reinsert both when recomposing
//! - non recursive analysis leaves nested blocks unexpanded; they render
//!   from their cached slice and can expand later through their origin
//!
//! Analysis is transactional per block: elements are staged locally and
//! committed only after every element translated, so a failure leaves
//! the block pristine.
//!
//! ## Unsupported constructs
//!
//! Strict mode fails analysis with `UnsupportedConstruct` on the first
//! kind without a rule. Lenient mode logs a warning and freezes the
//! construct's source text in an opaque node that renders verbatim and
//! ignores invalidation.

pub(crate) mod kinds;

mod bindings;
mod expressions;
mod statements;
mod types;

use std::collections::VecDeque;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tree_sitter::{Node as ParseNode, Tree};

use crate::Result;
use crate::ast::{BlockShape, Delimiters, Node, Origin};
use crate::error::MomijiError;
use crate::parser::ParsedSource;

/// How the translator reacts to parse tree kinds without a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMode {
    /// Fail the whole analysis on the first unsupported construct
    Strict,
    /// Keep going, freezing unsupported constructs as opaque nodes
    #[default]
    Lenient,
}

/// Translator behavior switches
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub mode: TranslationMode,
}

impl TranslatorConfig {
    pub fn strict() -> Self {
        Self {
            mode: TranslationMode::Strict,
        }
    }

    pub fn lenient() -> Self {
        Self {
            mode: TranslationMode::Lenient,
        }
    }
}

/// Builds semantic nodes from one parsed source
pub struct Translator<'a> {
    source: &'a str,
    tree: &'a Tree,
    config: TranslatorConfig,
}

/// Byte ranges of a container's own separator tokens, in source order.
///
/// Separators (`;` between statements, `,` between expressions) are
/// anonymous children of the container in the parse tree; elements and
/// comments never hide one, so these ranges say exactly where container
/// syntax sits inside the gaps.
fn separator_spans(parse: ParseNode<'_>, shape: BlockShape) -> Vec<Range<usize>> {
    let token = match shape {
        BlockShape::Statements => ";",
        BlockShape::Expressions => ",",
    };
    let mut cursor = parse.walk();
    parse
        .children(&mut cursor)
        .filter(|child| !child.is_named() && child.kind() == token)
        .map(|child| child.byte_range())
        .collect()
}

/// Trim the trailing newline run to exactly one newline
fn normalize_trailing_newline(source: &str) -> String {
    let mut out = source.trim_end_matches('\n').to_string();
    out.push('\n');
    out
}

/// Truncate text for an error message
fn snippet(text: &str) -> String {
    const LIMIT: usize = 100;
    if text.len() <= LIMIT {
        return text.to_string();
    }
    let cut = (0..=LIMIT)
        .rev()
        .find(|index| text.is_char_boundary(*index))
        .unwrap_or(0);
    format!("{}...", &text[..cut])
}

/// Named children that are semantic elements (extras such as comments
/// stay in the gaps)
fn element_children<'t>(parse: ParseNode<'t>) -> Vec<ParseNode<'t>> {
    let mut cursor = parse.walk();
    parse
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

impl<'a> Translator<'a> {
    pub fn new(source: &'a str, tree: &'a Tree, config: TranslatorConfig) -> Self {
        Self {
            source,
            tree,
            config,
        }
    }

    /// Translator over an owned parse result
    pub fn for_parsed(parsed: &'a ParsedSource, config: TranslatorConfig) -> Self {
        Self::new(parsed.text(), parsed.tree(), config)
    }

    pub fn config(&self) -> TranslatorConfig {
        self.config
    }

    pub(crate) fn node_text(&self, parse: ParseNode<'a>) -> &'a str {
        &self.source[parse.byte_range()]
    }

    pub(crate) fn origin_of(&self, parse: ParseNode<'a>) -> Origin {
        Origin::from_bytes(parse.kind_id(), parse.start_byte(), parse.end_byte())
    }

    /// Seal a freshly built node with its origin and exact source slice
    pub(crate) fn finish(&self, node: Node, parse: ParseNode<'a>) -> Node {
        node.with_origin(self.origin_of(parse))
            .with_cached_text(self.node_text(parse))
    }

    pub(crate) fn require_field(
        &self,
        parse: ParseNode<'a>,
        name: &str,
        context: &str,
    ) -> Result<ParseNode<'a>> {
        parse.child_by_field_name(name).ok_or_else(|| {
            MomijiError::malformed_reference(context, format!("missing `{name}`"))
        })
    }

    /// Apply the unsupported construct policy to `parse`
    pub(crate) fn unsupported(&self, parse: ParseNode<'a>) -> Result<Node> {
        let kind = parse.kind();
        match self.config.mode {
            TranslationMode::Strict => Err(MomijiError::unsupported_construct(
                kind,
                snippet(self.node_text(parse)),
            )),
            TranslationMode::Lenient => {
                tracing::warn!("no translation rule for `{kind}`, freezing source text as opaque");
                Ok(self.finish(Node::opaque(self.node_text(parse)), parse))
            }
        }
    }

    /// Unexpanded block over `parse`, expanded immediately when
    /// `recursive`
    pub(crate) fn lazy_block(
        &self,
        parse: ParseNode<'a>,
        shape: BlockShape,
        delimiters: Delimiters,
        recursive: bool,
    ) -> Result<Node> {
        let mut block = self.finish(Node::block(shape, delimiters), parse);
        if recursive {
            self.analyze_block(&mut block, parse, true)?;
        }
        Ok(block)
    }

    /// Translate one parse tree element into a semantic node.
    ///
    /// `recursive` controls whether nested blocks expand now or stay
    /// lazy. Sub expressions always translate eagerly; only block
    /// containers defer.
    pub fn translate_node(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        match parse.kind() {
            kinds::PROGRAM => {
                self.lazy_block(parse, BlockShape::Statements, Delimiters::None, recursive)
            }
            kinds::STATEMENT_BLOCK | kinds::CLASS_BODY => {
                self.lazy_block(parse, BlockShape::Statements, Delimiters::Braces, recursive)
            }
            kinds::OBJECT => {
                self.lazy_block(parse, BlockShape::Expressions, Delimiters::Braces, recursive)
            }
            kinds::ARRAY => {
                self.lazy_block(parse, BlockShape::Expressions, Delimiters::Brackets, recursive)
            }
            kinds::FORMAL_PARAMETERS | kinds::ARGUMENTS => {
                self.lazy_block(parse, BlockShape::Expressions, Delimiters::Parens, recursive)
            }
            kinds::LEXICAL_DECLARATION | kinds::VARIABLE_DECLARATION => {
                self.variable_declaration(parse, recursive)
            }
            kinds::VARIABLE_DECLARATOR => self.variable_declarator(parse, recursive),
            kinds::EXPRESSION_STATEMENT => self.expression_statement(parse, recursive),
            kinds::RETURN_STATEMENT => self.return_statement(parse, recursive),
            kinds::CLASS_DECLARATION => self.class_declaration(parse, recursive, false),
            kinds::ABSTRACT_CLASS_DECLARATION => self.class_declaration(parse, recursive, true),
            kinds::INTERFACE_DECLARATION => self.interface_declaration(parse, recursive),
            kinds::FUNCTION_DECLARATION | kinds::FUNCTION_SIGNATURE => {
                self.function_declaration(parse, recursive)
            }
            kinds::METHOD_DEFINITION
            | kinds::METHOD_SIGNATURE
            | kinds::ABSTRACT_METHOD_SIGNATURE => self.method_declaration(parse, recursive),
            kinds::PUBLIC_FIELD_DEFINITION | kinds::PROPERTY_SIGNATURE => {
                self.property_declaration(parse, recursive)
            }
            kinds::IMPORT_STATEMENT => self.import_statement(parse, recursive),
            kinds::EXPORT_STATEMENT => self.export_statement(parse, recursive),
            kinds::IDENTIFIER
            | kinds::PROPERTY_IDENTIFIER
            | kinds::TYPE_IDENTIFIER
            | kinds::SHORTHAND_PROPERTY_IDENTIFIER
            | kinds::SHORTHAND_PROPERTY_IDENTIFIER_PATTERN
            | kinds::PRIVATE_PROPERTY_IDENTIFIER
            | kinds::THIS
            | kinds::SUPER => Ok(self.identifier(parse)),
            kinds::STRING
            | kinds::TEMPLATE_STRING
            | kinds::NUMBER
            | kinds::REGEX
            | kinds::TRUE
            | kinds::FALSE
            | kinds::NULL
            | kinds::UNDEFINED => Ok(self.literal(parse)),
            kinds::CALL_EXPRESSION => self.call_expression(parse, recursive),
            kinds::NEW_EXPRESSION => self.new_expression(parse, recursive),
            kinds::MEMBER_EXPRESSION => self.member_expression(parse, recursive),
            kinds::PAIR | kinds::PAIR_PATTERN => self.pair(parse, recursive),
            kinds::ARROW_FUNCTION => self.arrow_function(parse, recursive),
            kinds::BINARY_EXPRESSION
            | kinds::ASSIGNMENT_EXPRESSION
            | kinds::AUGMENTED_ASSIGNMENT_EXPRESSION
            | kinds::OBJECT_ASSIGNMENT_PATTERN => self.binary_expression(parse, recursive),
            kinds::PARENTHESIZED_EXPRESSION => self.parenthesized_expression(parse, recursive),
            kinds::REQUIRED_PARAMETER | kinds::OPTIONAL_PARAMETER => {
                self.parameter(parse, recursive)
            }
            kinds::OBJECT_PATTERN => self.object_pattern(parse, recursive),
            kinds::ARRAY_PATTERN => self.array_pattern(parse, recursive),
            kinds::REST_PATTERN | kinds::SPREAD_ELEMENT => self.rest_element(parse, recursive),
            _ => self.unsupported(parse),
        }
    }

    /// Translate a parse tree element in type position
    pub fn translate_type(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        match parse.kind() {
            kinds::TYPE_IDENTIFIER | kinds::PREDEFINED_TYPE | kinds::LITERAL_TYPE => {
                Ok(self.finish(Node::type_ref(self.node_text(parse), vec![]), parse))
            }
            kinds::TYPE_ANNOTATION => self.annotated_type(parse, recursive),
            kinds::NESTED_TYPE_IDENTIFIER => self.nested_type(parse, recursive),
            kinds::GENERIC_TYPE => self.generic_type(parse, recursive),
            kinds::UNION_TYPE => self.union_type(parse, recursive),
            kinds::ARRAY_TYPE => self.array_type(parse, recursive),
            _ => self.unsupported(parse),
        }
    }

    /// Analyze a whole source file into `root`, a source root block.
    /// No-op when the root is already expanded.
    pub fn analyze_source(&self, root: &mut Node, recursive: bool) -> Result<()> {
        if !root.can_analyze() {
            return Ok(());
        }
        let program = self.tree.root_node();
        self.analyze_block(root, program, recursive)?;
        root.origin = Some(self.origin_of(program));
        root.text = Some(normalize_trailing_newline(self.source));
        Ok(())
    }

    /// Trivia text of a gap between block elements, with the container's
    /// first separator token in the gap excised.
    ///
    /// A `;` moves onto the preceding element as its terminator when that
    /// element can carry one, so removing or reordering the element later
    /// takes its separator along. A `,` is dropped; the expression join
    /// rule reinserts it when recomposing. A separator with no viable
    /// owner stays in the text verbatim.
    fn gap_trivia(
        &self,
        shape: BlockShape,
        range: Range<usize>,
        separators: &[Range<usize>],
        previous: Option<&mut Node>,
    ) -> String {
        let gap = &self.source[range.start..range.end];
        let Some(sep) = separators
            .iter()
            .find(|sep| sep.start >= range.start && sep.end <= range.end)
        else {
            return gap.to_string();
        };
        let excised = format!(
            "{}{}",
            &self.source[range.start..sep.start],
            &self.source[sep.end..range.end]
        );
        match shape {
            BlockShape::Expressions => excised,
            BlockShape::Statements => match previous {
                Some(prev)
                    if !prev.is_trivia()
                        && !prev.is_block()
                        && prev.statement_terminator().is_empty() =>
                {
                    prev.set_statement_terminator(";");
                    excised
                }
                _ => gap.to_string(),
            },
        }
    }

    /// Populate `block`'s elements from the children of `parse` and the
    /// gaps between them. No-op unless the block satisfies its
    /// `can_analyze` contract.
    pub(crate) fn analyze_block(
        &self,
        block: &mut Node,
        parse: ParseNode<'a>,
        recursive: bool,
    ) -> Result<()> {
        let Some(data) = block.block_data_mut() else {
            return Err(MomijiError::malformed_reference(
                "block analysis",
                "target node is not a block",
            ));
        };
        if !data.can_analyze() {
            return Ok(());
        }
        let shape = data.shape();
        let separators = separator_spans(parse, shape);

        // content bounds inside the delimiters; undelimited blocks cover
        // the whole source so leading and trailing trivia survive
        let (start, end) = if data.delimiters() == Delimiters::None {
            (0, self.source.len())
        } else {
            (parse.start_byte() + 1, parse.end_byte().saturating_sub(1))
        };

        let mut elements: Vec<Node> = Vec::new();
        let mut cursor_byte = start;
        for child in element_children(parse) {
            let gap = self.gap_trivia(
                shape,
                cursor_byte..child.start_byte(),
                &separators,
                elements.last_mut(),
            );
            if !gap.is_empty() {
                elements.push(Node::trivia(gap));
            }
            let mut element = self.translate_node(child, recursive)?;
            if shape == BlockShape::Statements {
                element.capture_terminator();
            }
            elements.push(element);
            cursor_byte = child.end_byte();
        }
        let gap = self.gap_trivia(shape, cursor_byte..end, &separators, elements.last_mut());
        if !gap.is_empty() {
            elements.push(Node::trivia(gap));
        }

        data.elements = elements;
        data.analyzed = true;
        Ok(())
    }

    /// Expand one unexpanded block in place by locating its origin in
    /// the parse tree. No-op when the block is already expanded.
    pub fn expand(&self, block: &mut Node, recursive: bool) -> Result<()> {
        if !block.can_analyze() {
            return Ok(());
        }
        let Some(origin) = block.origin() else {
            return Err(MomijiError::malformed_reference(
                "block expansion",
                "block has no origin to expand from",
            ));
        };
        let Some(parse) = self.locate(origin) else {
            return Err(MomijiError::malformed_reference(
                "block expansion",
                format!(
                    "no parse tree element with kind id {} spans bytes {:?}",
                    origin.kind_id(),
                    origin.byte_range()
                ),
            ));
        };
        self.analyze_block(block, parse, recursive)
    }

    /// Expand every unexpanded block in `node`'s subtree
    pub fn expand_all(&self, node: &mut Node) -> Result<()> {
        let mut queue: VecDeque<&mut Node> = VecDeque::new();
        queue.push_back(node);
        while let Some(current) = queue.pop_front() {
            if current.can_analyze() {
                if current.origin().is_some() {
                    self.expand(current, true)?;
                }
                // freshly expanded subtrees are complete, hand built
                // pristine blocks have nothing to expand from
                continue;
            }
            queue.extend(current.children_mut());
        }
        Ok(())
    }

    /// Find the parse tree element an origin refers to: same kind, same
    /// byte range
    fn locate(&self, origin: Origin) -> Option<ParseNode<'a>> {
        let range = origin.byte_range();
        let mut cursor = self
            .tree
            .root_node()
            .descendant_for_byte_range(range.start, range.end)?;
        // several elements can share one range; climb until the kind
        // matches or the range grows past the target
        loop {
            if cursor.byte_range() != range {
                return None;
            }
            if cursor.kind_id() == origin.kind_id() {
                return Some(cursor);
            }
            cursor = cursor.parent()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DeclData, NodeData};
    use crate::parser::{SourceLanguage, SourceParser};

    fn parse_ts(source: &str) -> ParsedSource {
        SourceParser::new(SourceLanguage::TypeScript)
            .parse(source)
            .expect("source parses")
    }

    fn analyze(source: &str, recursive: bool) -> Node {
        let parsed = parse_ts(source);
        let translator = Translator::for_parsed(&parsed, TranslatorConfig::default());
        let mut root = Node::source_root();
        translator
            .analyze_source(&mut root, recursive)
            .expect("analysis succeeds");
        root
    }

    #[test]
    fn test_shallow_analysis_keeps_bodies_unexpanded() {
        let source = "class A {\n  m() { return 1; }\n}\n";
        let mut root = analyze(source, false);
        let body = root
            .find_first(false, |node| node.is_block())
            .expect("class body exists");
        assert!(body.can_analyze());
        assert_eq!(root.render(), source);
    }

    #[test]
    fn test_recursive_analysis_expands_every_block() {
        let source = "class A {\n  m() { return this.x; }\n}\nconst a = [1, 2];\n";
        let mut root = analyze(source, true);
        let mut pending = 0;
        root.walk_all(true, |node| {
            if node.can_analyze() {
                pending += 1;
            }
        });
        assert_eq!(pending, 0);
        assert_eq!(root.render(), source);
    }

    #[test]
    fn test_expand_deepens_a_shallow_tree_in_place() {
        let source = "class A {\n  m() { return 1; }\n}\n";
        let parsed = parse_ts(source);
        let translator = Translator::for_parsed(&parsed, TranslatorConfig::default());
        let mut root = Node::source_root();
        translator.analyze_source(&mut root, false).expect("analyzes");

        let body = root
            .find_first_mut(false, |node| node.can_analyze())
            .expect("class body is pending");
        translator.expand(body, false).expect("expands");
        assert!(body.is_analyzed());
        // the method body one level down is still lazy
        assert!(
            body.find_first(false, |node| node.can_analyze())
                .is_some()
        );
        assert_eq!(root.render(), source);
    }

    #[test]
    fn test_expand_all_completes_a_shallow_tree() {
        let source = "function f(a: number) { return a; }\n";
        let parsed = parse_ts(source);
        let translator = Translator::for_parsed(&parsed, TranslatorConfig::default());
        let mut root = Node::source_root();
        translator.analyze_source(&mut root, false).expect("analyzes");
        translator.expand_all(&mut root).expect("expands all");

        let mut pending = 0;
        root.walk_all(true, |node| {
            if node.can_analyze() {
                pending += 1;
            }
        });
        assert_eq!(pending, 0);
        assert_eq!(root.render(), source);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let source = "const a = 1;\n";
        let parsed = parse_ts(source);
        let translator = Translator::for_parsed(&parsed, TranslatorConfig::default());
        let mut root = Node::source_root();
        translator.analyze_source(&mut root, true).expect("first pass");
        let flat = root.flatten();
        translator.analyze_source(&mut root, true).expect("second pass");
        assert_eq!(root.flatten(), flat);
    }

    #[test]
    fn test_strict_mode_fails_atomically() {
        let source = "enum Color { Red }\nconst a = 1;\n";
        let parsed = parse_ts(source);
        let translator = Translator::for_parsed(&parsed, TranslatorConfig::strict());
        let mut root = Node::source_root();
        let err = translator
            .analyze_source(&mut root, true)
            .expect_err("enums have no rule");
        assert!(matches!(
            err,
            MomijiError::UnsupportedConstruct { ref kind, .. } if kind == "enum_declaration"
        ));
        // nothing was committed
        assert!(root.can_analyze());
        assert!(root.cached_text().is_none());
    }

    #[test]
    fn test_lenient_mode_freezes_unsupported_constructs() {
        let source = "enum Color { Red }\nconst a = 1;\n";
        let mut root = analyze(source, true);
        assert_eq!(root.render(), source);

        let opaque = root
            .find_first_mut(false, Node::is_opaque)
            .expect("enum froze as opaque");
        assert_eq!(opaque.cached_text(), Some("enum Color { Red }"));
        opaque.mark_dirty(true);
        assert_eq!(opaque.render(), "enum Color { Red }");
    }

    #[test]
    fn test_trailing_newline_is_normalized() {
        let root = analyze("const a = 1;\n\n\n", true);
        assert_eq!(root.cached_text(), Some("const a = 1;\n"));

        let mut no_newline = analyze("const a = 1;", true);
        assert_eq!(no_newline.render(), "const a = 1;\n");
    }

    #[test]
    fn test_semicolon_moves_to_terminator_not_trivia() {
        let mut root = analyze("let x = 1;\nlet y = 2\n", true);
        let block = root.block_data_mut().expect("root is a block");
        let semantic: Vec<_> = block
            .elements()
            .iter()
            .filter(|e| !e.is_trivia())
            .collect();
        assert_eq!(semantic.len(), 2);
        assert_eq!(semantic[0].statement_terminator(), ";");
        // automatic semicolon insertion: no terminator in, none out
        assert_eq!(semantic[1].statement_terminator(), "");
        for element in block.elements() {
            if let NodeData::Trivia(text) = element.data() {
                assert!(!text.contains(';'));
            }
        }
    }

    #[test]
    fn test_comma_separator_after_whitespace_stays_out_of_trivia() {
        let source = "f(a , b);\n";
        let mut root = analyze(source, true);
        assert_eq!(root.render(), source);
        // the comma belongs to the join rule; recomposition must not
        // find a second one in the gap text
        root.mark_dirty(true);
        assert_eq!(root.render(), "f(a,  b);\n");
    }

    #[test]
    fn test_comma_separator_after_comment_stays_out_of_trivia() {
        let source = "f(a /* first */, b);\n";
        let mut root = analyze(source, true);
        assert_eq!(root.render(), source);
        root.mark_dirty(true);
        assert_eq!(root.render(), "f(a, /* first */ b);\n");
    }

    #[test]
    fn test_class_member_semicolon_spaced_from_member() {
        let source = "class A {\n  x = 1 ;\n}\n";
        let mut root = analyze(source, true);
        assert_eq!(root.render(), source);

        let field = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Decl(DeclData::Property { .. }))
            })
            .expect("field is in the tree");
        assert_eq!(field.statement_terminator(), ";");

        root.mark_dirty(true);
        assert_eq!(root.render(), "class A {\n  x = 1; \n}\n");
    }

    #[test]
    fn test_expand_locates_blocks_by_origin() {
        let source = "f(1, 2)\n";
        let parsed = parse_ts(source);
        let translator = Translator::for_parsed(&parsed, TranslatorConfig::default());
        let mut root = Node::source_root();
        translator.analyze_source(&mut root, false).expect("analyzes");

        let args = root
            .find_first_mut(false, |node| node.can_analyze())
            .expect("argument list is pending");
        translator.expand(args, true).expect("locates and expands");
        let arg_count = args
            .block_data()
            .map(|data| data.elements().iter().filter(|e| !e.is_trivia()).count())
            .unwrap_or_default();
        assert_eq!(arg_count, 2);
        assert_eq!(root.render(), source);
    }
}
