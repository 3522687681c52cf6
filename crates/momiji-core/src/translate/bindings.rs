//! Construction rules for parameters and binding patterns

use tree_sitter::Node as ParseNode;

use crate::Result;
use crate::ast::{BlockShape, Delimiters, Node};
use crate::error::MomijiError;

use super::{Translator, element_children, kinds};

impl<'a> Translator<'a> {
    pub(crate) fn parameter(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let pattern_node = self.require_field(parse, "pattern", "parameter")?;
        let pattern = self.translate_node(pattern_node, recursive)?;
        let optional = parse.kind() == kinds::OPTIONAL_PARAMETER;
        let type_ann = parse
            .child_by_field_name("type")
            .map(|annotation| self.annotated_type(annotation, recursive))
            .transpose()?;
        let default = parse
            .child_by_field_name("value")
            .map(|value| self.translate_node(value, recursive))
            .transpose()?;
        Ok(self.finish(Node::param(pattern, optional, type_ann, default), parse))
    }

    pub(crate) fn object_pattern(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let elements =
            self.lazy_block(parse, BlockShape::Expressions, Delimiters::Braces, recursive)?;
        Ok(self.finish(Node::object_pattern(elements), parse))
    }

    pub(crate) fn array_pattern(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let elements =
            self.lazy_block(parse, BlockShape::Expressions, Delimiters::Brackets, recursive)?;
        Ok(self.finish(Node::array_pattern(elements), parse))
    }

    pub(crate) fn rest_element(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let inner = element_children(parse).into_iter().next().ok_or_else(|| {
            MomijiError::malformed_reference("rest element", "missing bound pattern")
        })?;
        let inner = self.translate_node(inner, recursive)?;
        Ok(self.finish(Node::rest(inner), parse))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BindingData, Node, NodeData};
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
    fn test_destructured_parameter_round_trip() {
        let source = "function setup({ retries, verbose }: Options, ...plugins: Plugin[]) {\n  return retries;\n}\n";
        round_trip(source);

        let root = analyze(source);
        let object = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Binding(BindingData::ObjectPattern { .. }))
            })
            .expect("object pattern is in the tree");
        assert_eq!(object.flatten()["elements"]["type"], "Block");

        let rest = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Binding(BindingData::Rest { .. }))
            })
            .expect("rest parameter is in the tree");
        assert_eq!(rest.flatten()["inner"]["name"], "plugins");
    }

    #[test]
    fn test_optional_and_default_parameters() {
        let source = "function g(tag?: string, depth = 2) {}\n";
        round_trip(source);

        let root = analyze(source);
        let mut params = Vec::new();
        root.walk_all(false, |node| {
            if let NodeData::Binding(BindingData::Param { optional, default, .. }) = node.data() {
                params.push((*optional, default.is_some()));
            }
        });
        assert_eq!(params, vec![(true, false), (false, true)]);
    }

    #[test]
    fn test_array_pattern_binding_round_trip() {
        let source = "const [first, ...rest] = items;\n";
        round_trip(source);

        let root = analyze(source);
        let declarator = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Binding(BindingData::Declarator { .. }))
            })
            .expect("declarator is in the tree");
        assert_eq!(declarator.flatten()["name"]["type"], "ArrayPattern");
    }
}
