//! Construction rules for declarations and statements

use tree_sitter::Node as ParseNode;

use crate::Result;
use crate::ast::{BlockShape, Delimiters, Node, VarKind};
use crate::error::MomijiError;

use super::{Translator, element_children, kinds};

impl<'a> Translator<'a> {
    pub(crate) fn variable_declaration(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
    ) -> Result<Node> {
        let keyword = self
            .node_text(parse)
            .split_whitespace()
            .next()
            .and_then(VarKind::from_keyword)
            .ok_or_else(|| {
                MomijiError::malformed_reference(
                    "variable declaration",
                    "missing `var`, `let` or `const` keyword",
                )
            })?;
        let mut declarators = Vec::new();
        for child in element_children(parse) {
            if child.kind() == kinds::VARIABLE_DECLARATOR {
                declarators.push(self.translate_node(child, recursive)?);
            }
        }
        if declarators.is_empty() {
            return Err(MomijiError::malformed_reference(
                "variable declaration",
                "no declarators",
            ));
        }
        Ok(self.finish(Node::variable_decl(keyword, declarators), parse))
    }

    pub(crate) fn variable_declarator(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
    ) -> Result<Node> {
        let name_node = self.require_field(parse, "name", "variable declarator")?;
        let name = self.translate_node(name_node, recursive)?;
        let type_ann = parse
            .child_by_field_name("type")
            .map(|annotation| self.annotated_type(annotation, recursive))
            .transpose()?;
        let value = parse
            .child_by_field_name("value")
            .map(|value| self.translate_node(value, recursive))
            .transpose()?;
        Ok(self.finish(Node::declarator(name, type_ann, value), parse))
    }

    pub(crate) fn expression_statement(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
    ) -> Result<Node> {
        let inner = element_children(parse).into_iter().next().ok_or_else(|| {
            MomijiError::malformed_reference("expression statement", "missing expression")
        })?;
        let expr = self.translate_node(inner, recursive)?;
        Ok(self.finish(Node::expr_stmt(expr), parse))
    }

    pub(crate) fn return_statement(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let value = element_children(parse)
            .into_iter()
            .next()
            .map(|value| self.translate_node(value, recursive))
            .transpose()?;
        Ok(self.finish(Node::return_stmt(value), parse))
    }

    pub(crate) fn class_declaration(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
        is_abstract: bool,
    ) -> Result<Node> {
        let name_node = self.require_field(parse, "name", "class declaration")?;
        let name = self.identifier(name_node);
        let type_params = parse
            .child_by_field_name("type_parameters")
            .map(|tp| self.node_text(tp).to_string());

        let mut modifiers: Vec<String> = Vec::new();
        let mut heritage = Vec::new();
        for child in element_children(parse) {
            match child.kind() {
                kinds::DECORATOR => modifiers.push(self.node_text(child).to_string()),
                kinds::CLASS_HERITAGE => {
                    for clause in element_children(child) {
                        heritage.push(self.heritage_clause(clause, recursive)?);
                    }
                }
                kinds::EXTENDS_CLAUSE | kinds::IMPLEMENTS_CLAUSE | kinds::EXTENDS_TYPE_CLAUSE => {
                    heritage.push(self.heritage_clause(child, recursive)?);
                }
                _ => {}
            }
        }
        if is_abstract {
            modifiers.push("abstract".to_string());
        }

        let body_node = self.require_field(parse, "body", "class declaration")?;
        let body = self.lazy_block(body_node, BlockShape::Statements, Delimiters::Braces, recursive)?;
        Ok(self.finish(
            Node::class_decl(modifiers, name, type_params, heritage, body),
            parse,
        ))
    }

    pub(crate) fn interface_declaration(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
    ) -> Result<Node> {
        let name_node = self.require_field(parse, "name", "interface declaration")?;
        let name = self.identifier(name_node);
        let type_params = parse
            .child_by_field_name("type_parameters")
            .map(|tp| self.node_text(tp).to_string());

        let mut heritage = Vec::new();
        for child in element_children(parse) {
            if matches!(
                child.kind(),
                kinds::EXTENDS_CLAUSE | kinds::EXTENDS_TYPE_CLAUSE
            ) {
                heritage.push(self.heritage_clause(child, recursive)?);
            }
        }

        let body_node = self.require_field(parse, "body", "interface declaration")?;
        let body = self.lazy_block(body_node, BlockShape::Statements, Delimiters::Braces, recursive)?;
        Ok(self.finish(
            Node::interface_decl(Vec::new(), name, type_params, heritage, body),
            parse,
        ))
    }

    /// One heritage clause. `extends` on a class references expressions,
    /// everything else references types; a referenced-type list must not
    /// be empty.
    fn heritage_clause(&self, clause: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let keyword = self
            .node_text(clause)
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        if keyword.is_empty() {
            return Err(MomijiError::malformed_reference(
                "heritage clause",
                "missing clause keyword",
            ));
        }

        let mut types = Vec::new();
        if let Some(value) = clause.child_by_field_name("value") {
            // class `extends`: an expression, possibly with type arguments
            let base = match clause.child_by_field_name("type_arguments") {
                Some(args_node) => {
                    let args = self.type_argument_list(args_node, recursive)?;
                    let text = &self.source[value.start_byte()..args_node.end_byte()];
                    Node::type_ref(self.node_text(value), args).with_cached_text(text)
                }
                None => self.translate_node(value, recursive)?,
            };
            types.push(base);
        } else {
            for child in element_children(clause) {
                types.push(self.translate_type(child, recursive)?);
            }
        }
        if types.is_empty() {
            return Err(MomijiError::malformed_reference(
                "heritage clause",
                format!("`{keyword}` clause references no types"),
            ));
        }
        Ok(self.finish(Node::heritage(keyword, types), clause))
    }

    pub(crate) fn function_declaration(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
    ) -> Result<Node> {
        let name_node = self.require_field(parse, "name", "function declaration")?;
        let name = self.identifier(name_node);
        // the keyword itself is rendered by composition, everything else
        // in front of the name (`async`, `export` never reaches here) is
        // a modifier
        let modifiers = self
            .leading_modifiers(parse, name_node.start_byte())
            .into_iter()
            .filter(|word| word != "function")
            .collect();
        let type_params = parse
            .child_by_field_name("type_parameters")
            .map(|tp| self.node_text(tp).to_string());
        let params_node = self.require_field(parse, "parameters", "function declaration")?;
        let params =
            self.lazy_block(params_node, BlockShape::Expressions, Delimiters::Parens, recursive)?;
        let return_type = parse
            .child_by_field_name("return_type")
            .map(|rt| self.annotated_type(rt, recursive))
            .transpose()?;
        let body = parse
            .child_by_field_name("body")
            .map(|body| self.lazy_block(body, BlockShape::Statements, Delimiters::Braces, recursive))
            .transpose()?;
        Ok(self.finish(
            Node::function_decl(modifiers, name, type_params, params, return_type, body),
            parse,
        ))
    }

    pub(crate) fn method_declaration(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let name_node = self.require_field(parse, "name", "method definition")?;
        let name = self.identifier(name_node);
        let modifiers = self.leading_modifiers(parse, name_node.start_byte());
        let type_params = parse
            .child_by_field_name("type_parameters")
            .map(|tp| self.node_text(tp).to_string());
        let params_node = self.require_field(parse, "parameters", "method definition")?;
        let params =
            self.lazy_block(params_node, BlockShape::Expressions, Delimiters::Parens, recursive)?;
        let return_type = parse
            .child_by_field_name("return_type")
            .map(|rt| self.annotated_type(rt, recursive))
            .transpose()?;
        let body = parse
            .child_by_field_name("body")
            .map(|body| self.lazy_block(body, BlockShape::Statements, Delimiters::Braces, recursive))
            .transpose()?;
        Ok(self.finish(
            Node::method_decl(modifiers, name, type_params, params, return_type, body),
            parse,
        ))
    }

    pub(crate) fn property_declaration(
        &self,
        parse: ParseNode<'a>,
        recursive: bool,
    ) -> Result<Node> {
        let name_node = self.require_field(parse, "name", "property declaration")?;
        let name = self.identifier(name_node);
        let modifiers = self.leading_modifiers(parse, name_node.start_byte());

        let type_node = parse.child_by_field_name("type");
        let value_node = parse.child_by_field_name("value");
        let optional = {
            let limit = type_node
                .map(|t| t.start_byte())
                .or_else(|| value_node.map(|v| v.start_byte()))
                .unwrap_or_else(|| parse.end_byte());
            self.source[name_node.end_byte()..limit].contains('?')
        };
        let type_ann = type_node
            .map(|annotation| self.annotated_type(annotation, recursive))
            .transpose()?;
        let value = value_node
            .map(|value| self.translate_node(value, recursive))
            .transpose()?;
        Ok(self.finish(
            Node::property_decl(modifiers, name, optional, type_ann, value),
            parse,
        ))
    }

    pub(crate) fn import_statement(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let source_node = parse.child_by_field_name("source");
        let source_expr = source_node
            .map(|source| self.translate_node(source, recursive))
            .transpose()?;

        // raw clause text between the keyword and the module specifier
        let clause_start = parse.start_byte() + "import".len();
        let clause_end = source_node.map_or_else(|| parse.end_byte(), |s| s.start_byte());
        let mut clause_text = self
            .source
            .get(clause_start..clause_end)
            .unwrap_or_default()
            .trim();
        clause_text = clause_text.trim_end_matches(';').trim_end();
        if let Some(stripped) = clause_text.strip_suffix("from") {
            clause_text = stripped.trim_end();
        }
        let clause = if clause_text.is_empty() {
            None
        } else {
            Some(clause_text.to_string())
        };
        Ok(self.finish(Node::import_decl(clause, source_expr), parse))
    }

    pub(crate) fn export_statement(&self, parse: ParseNode<'a>, recursive: bool) -> Result<Node> {
        let inner_node = parse
            .child_by_field_name("declaration")
            .or_else(|| parse.child_by_field_name("value"));
        let Some(inner_node) = inner_node else {
            // clause forms (`export { A }`, `export * from "m"`) wrap no
            // single declaration and have no rule of their own
            return self.unsupported(parse);
        };
        let mut inner = self.translate_node(inner_node, recursive)?;
        // a wrapped declaration may carry its own trailing `;`; move it
        // into the terminator so recomposition emits exactly one
        inner.capture_terminator();
        let default = self.source[parse.start_byte()..inner_node.start_byte()].contains("default");
        Ok(self.finish(Node::export_decl(default, inner), parse))
    }

    /// Whitespace separated words between a declaration's start and
    /// `until` (the name position): accessibility keywords, `static`,
    /// `async`, accessor kind, decorators
    fn leading_modifiers(&self, parse: ParseNode<'a>, until: usize) -> Vec<String> {
        let start = parse.start_byte();
        if until <= start {
            return Vec::new();
        }
        self.source[start..until]
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{DeclData, Node, NodeData};
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
    fn test_class_round_trip_and_shape() {
        let source = "\
class Point extends Base implements Printable {
  private x: number = 0;

  constructor(x: number) {
    this.x = x;
  }
}
";
        round_trip(source);

        let root = analyze(source);
        let class = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Decl(DeclData::Class { .. }))
            })
            .expect("class is in the tree");
        let flat = class.flatten();
        assert_eq!(flat["name"]["name"], "Point");
        assert_eq!(flat["heritage"][0]["keyword"], "extends");
        assert_eq!(flat["heritage"][1]["keyword"], "implements");
        assert_eq!(flat["heritage"][1]["types"][0]["name"], "Printable");
    }

    #[test]
    fn test_abstract_class_modifier() {
        let root = analyze("abstract class Shape {}\n");
        let class = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Decl(DeclData::Class { .. }))
            })
            .expect("class is in the tree");
        assert_eq!(class.flatten()["modifiers"], serde_json::json!(["abstract"]));
    }

    #[test]
    fn test_interface_members_round_trip() {
        round_trip(
            "interface Shape {\n  area(): number;\n  label?: string;\n  readonly id: number;\n}\n",
        );
    }

    #[test]
    fn test_method_and_property_modifiers() {
        let source = "\
class Service {
  private static instance: Service;
  static async create(): Promise<Service> {
    return new Service();
  }
}
";
        round_trip(source);

        let root = analyze(source);
        let method = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Decl(DeclData::Method { .. }))
            })
            .expect("method is in the tree");
        assert_eq!(
            method.flatten()["modifiers"],
            serde_json::json!(["static", "async"])
        );

        let property = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Decl(DeclData::Property { .. }))
            })
            .expect("property is in the tree");
        assert_eq!(
            property.flatten()["modifiers"],
            serde_json::json!(["private", "static"])
        );
    }

    #[test]
    fn test_variable_declarations_round_trip() {
        round_trip("const a = 1, b = 2;\nlet c: string;\nvar legacy = true\n");
    }

    #[test]
    fn test_function_overload_signature_has_no_body() {
        let source = "function pick(value: string): string;\nfunction pick(value: string) {\n  return value;\n}\n";
        round_trip(source);

        let root = analyze(source);
        let signature = root
            .find_first(false, |node| {
                matches!(
                    node.data(),
                    NodeData::Decl(DeclData::Function { body: None, .. })
                )
            })
            .expect("overload signature is in the tree");
        assert_eq!(signature.statement_terminator(), ";");
    }

    #[test]
    fn test_import_forms() {
        round_trip("import { A, B } from \"./mod\";\nimport Default from \"./other\";\nimport * as ns from \"./ns\";\nimport \"./effects\";\n");

        let root = analyze("import type { Config } from \"./config\";\n");
        let import = root
            .find_first(false, |node| {
                matches!(node.data(), NodeData::Decl(DeclData::Import { .. }))
            })
            .expect("import is in the tree");
        assert_eq!(import.flatten()["clause"], "type { Config }");
    }

    #[test]
    fn test_export_forms() {
        round_trip("export class Widget {}\nexport const size = 4;\nexport default size\n");

        let root = analyze("export default new Map();\n");
        let export = root
            .find_first(false, |node| {
                matches!(
                    node.data(),
                    NodeData::Decl(DeclData::Export { default: true, .. })
                )
            })
            .expect("default export is in the tree");
        assert_eq!(export.statement_terminator(), ";");
    }

    #[test]
    fn test_export_recomposes_with_one_terminator() {
        let mut root = analyze("export const size = 4;\n");
        let export = root
            .find_first_mut(false, |node| {
                matches!(node.data(), NodeData::Decl(DeclData::Export { .. }))
            })
            .expect("export is in the tree");
        // the wrapper's cache goes stale, the inner declaration keeps its
        // own cache; the terminator must come from the join exactly once
        export.mark_dirty(false);
        root.mark_dirty(false);
        assert_eq!(root.render(), "export const size = 4;\n");

        root.mark_dirty(true);
        assert_eq!(root.render(), "export const size = 4;\n");
    }

    #[test]
    fn test_export_clause_form_freezes_opaque() {
        let source = "const a = 1;\nexport { a };\n";
        round_trip(source);
        let root = analyze(source);
        let opaque = root
            .find_first(false, Node::is_opaque)
            .expect("clause export froze as opaque");
        assert_eq!(opaque.cached_text(), Some("export { a }"));
    }
}
