//! Construction rules for type positions

use tree_sitter::Node as ParseNode;

use crate::Result;
use crate::ast::Node;
use crate::error::MomijiError;

use super::{Translator, element_children, kinds};

impl<'a> Translator<'a> {
    /// Unwrap a `: T` annotation to the type it carries. Elements that
    /// are already in type position pass through.
    pub(crate) fn annotated_type(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        if parse.kind() != kinds::TYPE_ANNOTATION {
            return self.translate_type(parse, recursive);
        }
        let inner = element_children(parse).into_iter().next().ok_or_else(|| {
            MomijiError::malformed_reference("type annotation", "missing annotated type")
        })?;
        self.translate_type(inner, recursive)
    }

    pub(crate) fn nested_type(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let left_node = parse
            .child_by_field_name("module")
            .or_else(|| parse.named_child(0))
            .ok_or_else(|| {
                MomijiError::malformed_reference("qualified type", "missing qualifier")
            })?;
        let right_node = parse
            .child_by_field_name("name")
            .or_else(|| parse.named_child(1))
            .ok_or_else(|| {
                MomijiError::malformed_reference("qualified type", "missing member name")
            })?;
        // the qualifier is a plain identifier or a deeper qualified name
        let left = if left_node.kind() == kinds::NESTED_TYPE_IDENTIFIER {
            self.nested_type(left_node, recursive)?
        } else {
            self.finish(Node::type_ref(self.node_text(left_node), vec![]), left_node)
        };
        let right = self.finish(
            Node::type_ref(self.node_text(right_node), vec![]),
            right_node,
        );
        Ok(self.finish(Node::qualified_type(left, right), parse))
    }

    pub(crate) fn generic_type(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let name_node = self.require_field(parse, "name", "generic type")?;
        let args_node = self.require_field(parse, "type_arguments", "generic type")?;
        let args = self.type_argument_list(args_node, recursive)?;
        Ok(self.finish(Node::type_ref(self.node_text(name_node), args), parse))
    }

    /// Translated children of a `type_arguments` element
    pub(crate) fn type_argument_list(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
    ) -> Result<Vec<Node>> {
        let mut args = Vec::new();
        for child in element_children(parse) {
            args.push(self.translate_type(child, recursive)?);
        }
        Ok(args)
    }

    pub(crate) fn union_type(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let mut members = Vec::new();
        self.union_members(parse, recursive, &mut members)?;
        Ok(self.finish(Node::union_type(members), parse))
    }

    /// `A | B | C` parses as a left leaning chain but is one member list
    fn union_members(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
        members: &mut Vec<Node>,
    ) -> Result<()> {
        for child in element_children(parse) {
            if child.kind() == kinds::UNION_TYPE {
                self.union_members(child, recursive, members)?;
            } else {
                members.push(self.translate_type(child, recursive)?);
            }
        }
        Ok(())
    }

    pub(crate) fn array_type(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let elem = element_children(parse)
            .into_iter()
            .next()
            .ok_or_else(|| MomijiError::malformed_reference("array type", "missing element type"))?;
        let elem = self.translate_type(elem, recursive)?;
        Ok(self.finish(Node::array_type(elem), parse))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Node, NodeData, TypeData};
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

    fn first_type(root: &Node) -> &Node {
        root.find_first(false, |node| matches!(node.data(), NodeData::Type(_)))
            .expect("a type is in the tree")
    }

    #[test]
    fn test_type_annotations_round_trip() {
        let source = "let a: Map<string, number>;\nlet b: ns.Inner;\nlet c: string | null;\nlet d: number[];\n";
        let mut root = analyze(source);
        assert_eq!(root.render(), source);
        root.mark_dirty(true);
        assert_eq!(root.render(), source);
    }

    #[test]
    fn test_generic_type_shape() {
        let root = analyze("let cache: Map<string, User[]>;\n");
        let flat = first_type(&root).flatten();
        assert_eq!(flat["type"], "TypeRef");
        assert_eq!(flat["name"], "Map");
        assert_eq!(flat["args"][0]["name"], "string");
        assert_eq!(flat["args"][1]["type"], "ArrayType");
        assert_eq!(flat["args"][1]["elem"]["name"], "User");
    }

    #[test]
    fn test_union_chain_is_one_member_list() {
        let root = analyze("let status: Ready | Busy | null;\n");
        let union = first_type(&root);
        match union.data() {
            NodeData::Type(TypeData::Union { members }) => assert_eq!(members.len(), 3),
            other => panic!("expected a union, got {other:?}"),
        }
    }

    #[test]
    fn test_qualified_type_shape() {
        let root = analyze("let widget: ui.widgets.Button;\n");
        let flat = first_type(&root).flatten();
        assert_eq!(flat["type"], "QualifiedType");
        assert_eq!(flat["left"]["type"], "QualifiedType");
        assert_eq!(flat["left"]["left"]["name"], "ui");
        assert_eq!(flat["left"]["right"]["name"], "widgets");
        assert_eq!(flat["right"]["name"], "Button");
    }

    #[test]
    fn test_arrow_return_type_round_trip() {
        let mut root = analyze("const noop = (): void => undefined;\n");
        assert_eq!(root.render(), "const noop = (): void => undefined;\n");
    }
}
