//! Construction rules for expressions

use tree_sitter::Node as ParseNode;

use crate::Result;
use crate::ast::{BlockShape, Delimiters, ExprData, Node, NodeData};
use crate::error::MomijiError;

use super::{Translator, element_children, kinds};

impl<'a> Translator<'a> {
    pub(crate) fn identifier(&self, parse: ParseNode<'a>) -> Node {
        self.finish(Node::ident(self.node_text(parse)), parse)
    }

    pub(crate) fn literal(&self, parse: ParseNode<'a>) -> Node {
        self.finish(Node::literal(self.node_text(parse)), parse)
    }

    pub(crate) fn call_expression(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let callee_node = self.require_field(parse, "function", "call expression")?;
        let callee = self.translate_node(callee_node, recursive)?;
        let args_node = self.require_field(parse, "arguments", "call expression")?;
        // tagged templates carry a template literal where the argument
        // list would be
        let args = if args_node.kind() == kinds::ARGUMENTS {
            self.lazy_block(args_node, BlockShape::Expressions, Delimiters::Parens, recursive)?
        } else {
            self.translate_node(args_node, recursive)?
        };
        Ok(self.finish(Node::call(callee, args), parse))
    }

    pub(crate) fn new_expression(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let callee_node = self.require_field(parse, "constructor", "new expression")?;
        let callee = self.translate_node(callee_node, recursive)?;
        let args = parse
            .child_by_field_name("arguments")
            .map(|args| {
                self.lazy_block(args, BlockShape::Expressions, Delimiters::Parens, recursive)
            })
            .transpose()?;
        Ok(self.finish(Node::new_expr(callee, args), parse))
    }

    pub(crate) fn member_expression(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let object_node = self.require_field(parse, "object", "member expression")?;
        let property_node = self.require_field(parse, "property", "member expression")?;
        let object = self.translate_node(object_node, recursive)?;
        let property = self.translate_node(property_node, recursive)?;
        let mut node = Node::member(object, property);
        // `.` or `?.`, whatever sits between the two sides
        let accessor = self.source[object_node.end_byte()..property_node.start_byte()].trim();
        if accessor != "." {
            if let NodeData::Expr(ExprData::Member { operator, .. }) = node.data_mut() {
                *operator = accessor.to_string();
            }
        }
        Ok(self.finish(node, parse))
    }

    pub(crate) fn pair(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let key_node = self.require_field(parse, "key", "object pair")?;
        let value_node = self.require_field(parse, "value", "object pair")?;
        let key = self.translate_node(key_node, recursive)?;
        let value = self.translate_node(value_node, recursive)?;
        Ok(self.finish(Node::pair(key, value), parse))
    }

    pub(crate) fn arrow_function(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        // `(a, b) => ...` carries a parameter list, `x => ...` one bare
        // identifier
        let params = if let Some(list) = parse.child_by_field_name("parameters") {
            self.lazy_block(list, BlockShape::Expressions, Delimiters::Parens, recursive)?
        } else {
            let single = self.require_field(parse, "parameter", "arrow function")?;
            self.identifier(single)
        };
        let return_type = parse
            .child_by_field_name("return_type")
            .map(|rt| self.annotated_type(rt, recursive))
            .transpose()?;
        let body_node = self.require_field(parse, "body", "arrow function")?;
        let body = if body_node.kind() == kinds::STATEMENT_BLOCK {
            self.lazy_block(body_node, BlockShape::Statements, Delimiters::Braces, recursive)?
        } else {
            self.translate_node(body_node, recursive)?
        };
        Ok(self.finish(Node::arrow(params, return_type, body), parse))
    }

    pub(crate) fn binary_expression(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let left_node = self.require_field(parse, "left", "binary expression")?;
        let right_node = self.require_field(parse, "right", "binary expression")?;
        let left = self.translate_node(left_node, recursive)?;
        let right = self.translate_node(right_node, recursive)?;
        let operator = match parse.child_by_field_name("operator") {
            Some(op) => self.node_text(op).to_string(),
            // plain assignment has no operator field
            None => self.source[left_node.end_byte()..right_node.start_byte()]
                .trim()
                .to_string(),
        };
        Ok(self.finish(Node::binary(left, operator, right), parse))
    }

    pub(crate) fn parenthesized_expression(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
    ) -> Result<Node> {
        let inner = element_children(parse).into_iter().next().ok_or_else(|| {
            MomijiError::malformed_reference("parenthesized expression", "missing inner expression")
        })?;
        let inner = self.translate_node(inner, recursive)?;
        Ok(self.finish(Node::paren(inner), parse))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{ExprData, Node, NodeData};
    use crate::parser::{SourceLanguage, SourceParser};
    use crate::translate::{Translator, TranslatorConfig};

    fn analyze(source: &str) -> Node {
        let parsed = SourceParser::new(SourceLanguage::TypeScript)
            .parse(source)
            .expect("source parses");
        let translator = Translator::for_parsed(&parsed, TranslatorConfig::default());
        let mut root = Node::source_root();
        translator
            .analyze_source(&mut root, true)
            .expect("analysis succeeds");
        root
    }

    fn round_trip(source: &str) {
        let mut root = analyze(source);
        assert_eq!(root.render(), source, "render must reproduce the input");
    }

    #[test]
    fn test_call_and_member_round_trip() {
        round_trip("console.log(\"ready\", items.length);\nconst m = new Map();\nm.set(\"a\", 1);\n");
    }

    #[test]
    fn test_optional_chain_survives_recomposition() {
        let source = "user?.profile?.name;\n";
        let mut root = analyze(source);
        assert_eq!(root.render(), source);
        root.mark_dirty(true);
        assert_eq!(root.render(), source);
    }

    #[test]
    fn test_arrow_forms_round_trip() {
        round_trip("const f = (a, b) => a + b;\nconst g = x => x * 2;\nconst h = () => {\n  return 1;\n};\n");

        let root = analyze("const g = x => x * 2;\n");
        let arrow = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Expr(ExprData::Arrow { .. }))
            })
            .expect("arrow is in the tree");
        // the single bare parameter is an identifier, not a block
        assert_eq!(arrow.flatten()["params"]["type"], "Ident");
    }

    #[test]
    fn test_assignment_operators_come_from_source() {
        let root = analyze("x = 1;\nx += 2;\n");
        let mut operators = Vec::new();
        root.walk_all(false, |node| {
            if let NodeData::Expr(ExprData::Binary { operator, .. }) = node.data() {
                operators.push(operator.clone());
            }
        });
        assert_eq!(operators, vec!["=".to_string(), "+=".to_string()]);
    }

    #[test]
    fn test_object_literal_round_trip() {
        round_trip("const opts = {retries: 3, verbose, onDone: () => done()};\n");
    }

    #[test]
    fn test_parenthesized_expression_round_trip() {
        let source = "const area = (width + height) * 2;\n";
        let mut root = analyze(source);
        assert_eq!(root.render(), source);
        root.mark_dirty(true);
        assert_eq!(root.render(), source);
    }

    #[test]
    fn test_tagged_template_keeps_literal_arguments() {
        let source = "const text = greet`hello ${name}`;\n";
        round_trip(source);

        let root = analyze(source);
        let call = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Expr(ExprData::Call { .. }))
            })
            .expect("tagged template is a call");
        assert_eq!(call.flatten()["args"]["type"], "Literal");
    }
}
