//! Render caching and recomposition
//!
//! Every node carries an optional cached rendering. Translation seeds the
//! cache with the exact source slice, so an untouched tree reproduces its
//! input byte for byte without ever recomposing. [`Node::render`] returns
//! the cache when present and otherwise composes the text from structure,
//! caching the result.
//!
//! Invalidation is explicit and local. [`Node::mark_dirty`] clears this
//! node's cache (and the whole subtree's when `recursive`), nothing else:
//! no parent invalidation and no automatic invalidation on payload edits.
//! A caller that edits a child and then renders an ancestor whose cache
//! was never cleared gets the ancestor's stale text. That asymmetry is
//! deliberate, callers know which ancestors they care about and pay only
//! for those.
//!
//! Opaque fallback nodes are frozen: their cache is their content, so
//! `mark_dirty` skips them and they never recompose.

use crate::ast::node::{
    BindingData, DeclData, ExprData, HeritageData, Node, NodeData, StmtData, TypeData,
};

impl Node {
    /// Rendered text of this node. Returns the cached rendering when one
    /// is present, otherwise recomposes from structure and caches.
    pub fn render(&mut self) -> &str {
        if self.text.is_none() {
            let composed = self.compose();
            self.text = Some(composed);
        }
        self.text.as_deref().unwrap_or_default()
    }

    /// Drop this node's cached rendering so the next [`Node::render`]
    /// recomposes. With `recursive`, also drops every descendant's cache.
    /// Opaque fallback nodes keep their cache: their text is frozen.
    pub fn mark_dirty(&mut self, recursive: bool) {
        if self.is_opaque() {
            return;
        }
        self.text = None;
        if recursive {
            for child in self.children_mut() {
                child.mark_dirty(true);
            }
        }
    }

    fn compose(&mut self) -> String {
        match &mut self.data {
            NodeData::Trivia(text) => text.clone(),
            // unreachable through render: an opaque cache is never cleared
            NodeData::Opaque => String::new(),
            NodeData::Block(block) => block.compose(),
            NodeData::Decl(decl) => decl.compose(),
            NodeData::Stmt(stmt) => stmt.compose(),
            NodeData::Expr(expr) => expr.compose(),
            NodeData::Type(ty) => ty.compose(),
            NodeData::Binding(binding) => binding.compose(),
            NodeData::Heritage(heritage) => heritage.compose(),
        }
    }
}

fn push_modifiers(out: &mut String, modifiers: &[String]) {
    for modifier in modifiers {
        out.push_str(modifier);
        out.push(' ');
    }
}

fn push_joined(out: &mut String, nodes: &mut [Node], separator: &str) {
    for (index, node) in nodes.iter_mut().enumerate() {
        if index > 0 {
            out.push_str(separator);
        }
        out.push_str(node.render());
    }
}

impl DeclData {
    pub(crate) fn compose(&mut self) -> String {
        let mut out = String::new();
        match self {
            DeclData::Class {
                modifiers,
                name,
                type_params,
                heritage,
                body,
            } => {
                push_modifiers(&mut out, modifiers);
                out.push_str("class ");
                out.push_str(name.render());
                if let Some(type_params) = type_params {
                    out.push_str(type_params);
                }
                for clause in heritage.iter_mut() {
                    out.push(' ');
                    out.push_str(clause.render());
                }
                out.push(' ');
                out.push_str(body.render());
            }
            DeclData::Interface {
                modifiers,
                name,
                type_params,
                heritage,
                body,
            } => {
                push_modifiers(&mut out, modifiers);
                out.push_str("interface ");
                out.push_str(name.render());
                if let Some(type_params) = type_params {
                    out.push_str(type_params);
                }
                for clause in heritage.iter_mut() {
                    out.push(' ');
                    out.push_str(clause.render());
                }
                out.push(' ');
                out.push_str(body.render());
            }
            DeclData::Function {
                modifiers,
                name,
                type_params,
                params,
                return_type,
                body,
            } => {
                push_modifiers(&mut out, modifiers);
                out.push_str("function ");
                out.push_str(name.render());
                if let Some(type_params) = type_params {
                    out.push_str(type_params);
                }
                out.push_str(params.render());
                if let Some(return_type) = return_type {
                    out.push_str(": ");
                    out.push_str(return_type.render());
                }
                if let Some(body) = body {
                    out.push(' ');
                    out.push_str(body.render());
                }
            }
            DeclData::Method {
                modifiers,
                name,
                type_params,
                params,
                return_type,
                body,
            } => {
                push_modifiers(&mut out, modifiers);
                out.push_str(name.render());
                if let Some(type_params) = type_params {
                    out.push_str(type_params);
                }
                out.push_str(params.render());
                if let Some(return_type) = return_type {
                    out.push_str(": ");
                    out.push_str(return_type.render());
                }
                if let Some(body) = body {
                    out.push(' ');
                    out.push_str(body.render());
                }
            }
            DeclData::Property {
                modifiers,
                name,
                optional,
                type_ann,
                value,
            } => {
                push_modifiers(&mut out, modifiers);
                out.push_str(name.render());
                if *optional {
                    out.push('?');
                }
                if let Some(type_ann) = type_ann {
                    out.push_str(": ");
                    out.push_str(type_ann.render());
                }
                if let Some(value) = value {
                    out.push_str(" = ");
                    out.push_str(value.render());
                }
            }
            DeclData::Variable { kind, declarators } => {
                out.push_str(kind.keyword());
                out.push(' ');
                push_joined(&mut out, declarators, ", ");
            }
            DeclData::Import { clause, source } => {
                out.push_str("import");
                if let Some(clause) = clause {
                    out.push(' ');
                    out.push_str(clause);
                }
                if let Some(source) = source {
                    if clause.is_some() {
                        out.push_str(" from ");
                    } else {
                        out.push(' ');
                    }
                    out.push_str(source.render());
                }
            }
            DeclData::Export { default, inner } => {
                out.push_str("export ");
                if *default {
                    out.push_str("default ");
                }
                out.push_str(inner.render());
            }
        }
        out
    }
}

impl StmtData {
    pub(crate) fn compose(&mut self) -> String {
        match self {
            StmtData::Return { value } => match value {
                Some(value) => format!("return {}", value.render()),
                None => "return".to_string(),
            },
            StmtData::ExprStmt { expr } => expr.render().to_string(),
        }
    }
}

impl ExprData {
    pub(crate) fn compose(&mut self) -> String {
        match self {
            ExprData::Ident { name } => name.clone(),
            ExprData::Literal { raw } => raw.clone(),
            ExprData::Call { callee, args } => {
                format!("{}{}", callee.render(), args.render())
            }
            ExprData::New { callee, args } => {
                let mut out = String::from("new ");
                out.push_str(callee.render());
                if let Some(args) = args {
                    out.push_str(args.render());
                }
                out
            }
            ExprData::Member {
                object,
                operator,
                property,
            } => {
                let mut out = String::new();
                out.push_str(object.render());
                out.push_str(operator);
                out.push_str(property.render());
                out
            }
            ExprData::Pair { key, value } => {
                format!("{}: {}", key.render(), value.render())
            }
            ExprData::Arrow {
                params,
                return_type,
                body,
            } => {
                let mut out = String::new();
                out.push_str(params.render());
                if let Some(return_type) = return_type {
                    out.push_str(": ");
                    out.push_str(return_type.render());
                }
                out.push_str(" => ");
                out.push_str(body.render());
                out
            }
            ExprData::Binary {
                left,
                operator,
                right,
            } => {
                let mut out = String::new();
                out.push_str(left.render());
                out.push(' ');
                out.push_str(operator);
                out.push(' ');
                out.push_str(right.render());
                out
            }
            ExprData::Paren { inner } => format!("({})", inner.render()),
        }
    }
}

impl TypeData {
    pub(crate) fn compose(&mut self) -> String {
        match self {
            TypeData::Ref { name, args } => {
                let mut out = name.clone();
                if !args.is_empty() {
                    out.push('<');
                    push_joined(&mut out, args, ", ");
                    out.push('>');
                }
                out
            }
            TypeData::Qualified { left, right } => {
                format!("{}.{}", left.render(), right.render())
            }
            TypeData::Union { members } => {
                let mut out = String::new();
                push_joined(&mut out, members, " | ");
                out
            }
            TypeData::Array { elem } => format!("{}[]", elem.render()),
        }
    }
}

impl BindingData {
    pub(crate) fn compose(&mut self) -> String {
        match self {
            BindingData::Declarator {
                name,
                type_ann,
                value,
            } => {
                let mut out = String::new();
                out.push_str(name.render());
                if let Some(type_ann) = type_ann {
                    out.push_str(": ");
                    out.push_str(type_ann.render());
                }
                if let Some(value) = value {
                    out.push_str(" = ");
                    out.push_str(value.render());
                }
                out
            }
            BindingData::Param {
                pattern,
                optional,
                type_ann,
                default,
            } => {
                let mut out = String::new();
                out.push_str(pattern.render());
                if *optional {
                    out.push('?');
                }
                if let Some(type_ann) = type_ann {
                    out.push_str(": ");
                    out.push_str(type_ann.render());
                }
                if let Some(default) = default {
                    out.push_str(" = ");
                    out.push_str(default.render());
                }
                out
            }
            BindingData::ObjectPattern { elements } | BindingData::ArrayPattern { elements } => {
                elements.render().to_string()
            }
            BindingData::Rest { inner } => format!("...{}", inner.render()),
        }
    }
}

impl HeritageData {
    pub(crate) fn compose(&mut self) -> String {
        let mut out = self.keyword.clone();
        out.push(' ');
        push_joined(&mut out, &mut self.types, ", ");
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BlockShape, Delimiters, ExprData, Node, NodeData, VarKind};

    fn empty_body() -> Node {
        Node::block(BlockShape::Statements, Delimiters::Braces)
    }

    fn params(nodes: Vec<Node>) -> Node {
        let mut block = Node::block(BlockShape::Expressions, Delimiters::Parens);
        if let Some(data) = block.block_data_mut() {
            for node in nodes {
                data.push_element(node);
            }
        }
        block
    }

    #[test]
    fn test_render_prefers_cached_text() {
        let mut node = Node::ident("fresh").with_cached_text("stale");
        assert_eq!(node.render(), "stale");
        node.mark_dirty(false);
        assert_eq!(node.render(), "fresh");
    }

    #[test]
    fn test_render_caches_composed_text() {
        let mut node = Node::ident("x");
        assert!(node.cached_text().is_none());
        assert_eq!(node.render(), "x");
        assert_eq!(node.cached_text(), Some("x"));
    }

    #[test]
    fn test_mark_dirty_is_local_by_default() {
        let object = Node::ident("a").with_cached_text("a");
        let property = Node::ident("b").with_cached_text("b");
        let mut member = Node::member(object, property).with_cached_text("a.b");

        // edit the property without invalidating anything
        if let NodeData::Expr(ExprData::Member { property, .. }) = member.data_mut() {
            if let NodeData::Expr(ExprData::Ident { name }) = property.data_mut() {
                *name = "c".to_string();
            }
        }
        assert_eq!(member.render(), "a.b");

        // clearing only the parent still reads the stale child cache
        member.mark_dirty(false);
        assert_eq!(member.render(), "a.b");

        // recursive invalidation reaches the edited child
        member.mark_dirty(true);
        assert_eq!(member.render(), "a.c");
    }

    #[test]
    fn test_opaque_never_recomposes() {
        let mut node = Node::opaque("enum Color { Red }");
        node.mark_dirty(true);
        assert_eq!(node.render(), "enum Color { Red }");
    }

    #[test]
    fn test_compose_class_declaration() {
        let mut class = Node::class_decl(
            vec!["abstract".into()],
            Node::ident("Shape"),
            Some("<T>".into()),
            vec![Node::heritage("implements", vec![
                Node::type_ref("Drawable", vec![]),
                Node::type_ref("Serializable", vec![]),
            ])],
            empty_body(),
        );
        assert_eq!(
            class.render(),
            "abstract class Shape<T> implements Drawable, Serializable {}"
        );
    }

    #[test]
    fn test_compose_function_and_method() {
        let mut func = Node::function_decl(
            vec!["async".into()],
            Node::ident("run"),
            None,
            params(vec![Node::param(
                Node::ident("input"),
                false,
                Some(Node::type_ref("string", vec![])),
                None,
            )]),
            Some(Node::type_ref("Promise", vec![Node::type_ref(
                "void",
                vec![],
            )])),
            Some(empty_body()),
        );
        assert_eq!(
            func.render(),
            "async function run(input: string): Promise<void> {}"
        );

        let mut method = Node::method_decl(
            vec!["private".into(), "static".into()],
            Node::ident("create"),
            None,
            params(vec![]),
            None,
            Some(empty_body()),
        );
        assert_eq!(method.render(), "private static create() {}");
    }

    #[test]
    fn test_compose_property_and_variable() {
        let mut property = Node::property_decl(
            vec!["readonly".into()],
            Node::ident("tag"),
            true,
            Some(Node::type_ref("string", vec![])),
            None,
        );
        assert_eq!(property.render(), "readonly tag?: string");

        let mut variable = Node::variable_decl(VarKind::Const, vec![
            Node::declarator(Node::ident("a"), None, Some(Node::literal("1"))),
            Node::declarator(Node::ident("b"), None, Some(Node::literal("2"))),
        ]);
        assert_eq!(variable.render(), "const a = 1, b = 2");
    }

    #[test]
    fn test_compose_import_and_export() {
        let mut named = Node::import_decl(
            Some("{ Widget }".into()),
            Some(Node::literal("\"./widget\"")),
        );
        assert_eq!(named.render(), "import { Widget } from \"./widget\"");

        let mut bare = Node::import_decl(None, Some(Node::literal("\"./effects\"")));
        assert_eq!(bare.render(), "import \"./effects\"");

        let mut export = Node::export_decl(true, Node::ident("handler"));
        assert_eq!(export.render(), "export default handler");
    }

    #[test]
    fn test_compose_expressions() {
        let mut call = Node::call(
            Node::member(Node::ident("console"), Node::ident("log")),
            params(vec![Node::literal("\"hi\"")]),
        );
        assert_eq!(call.render(), "console.log(\"hi\")");

        let mut arrow = Node::arrow(
            params(vec![Node::param(Node::ident("x"), false, None, None)]),
            None,
            Node::binary(Node::ident("x"), "*", Node::literal("2")),
        );
        assert_eq!(arrow.render(), "(x) => x * 2");

        let mut ctor = Node::new_expr(Node::ident("Map"), Some(params(vec![])));
        assert_eq!(ctor.render(), "new Map()");
    }

    #[test]
    fn test_compose_types() {
        let mut qualified = Node::qualified_type(
            Node::type_ref("ns", vec![]),
            Node::type_ref("Inner", vec![]),
        );
        assert_eq!(qualified.render(), "ns.Inner");

        let mut union = Node::union_type(vec![
            Node::type_ref("string", vec![]),
            Node::type_ref("null", vec![]),
        ]);
        assert_eq!(union.render(), "string | null");

        let mut array = Node::array_type(Node::type_ref("number", vec![]));
        assert_eq!(array.render(), "number[]");
    }

    #[test]
    fn test_compose_bindings() {
        let mut rest = Node::rest(Node::ident("args"));
        assert_eq!(rest.render(), "...args");

        let mut pattern_elements = Node::block(BlockShape::Expressions, Delimiters::Braces);
        if let Some(data) = pattern_elements.block_data_mut() {
            data.push_element(Node::ident("a"));
            data.push_element(Node::ident("b"));
        }
        let mut pattern = Node::object_pattern(pattern_elements);
        assert_eq!(pattern.render(), "{a, b}");
    }
}
