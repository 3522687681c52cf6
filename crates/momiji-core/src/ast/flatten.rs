//! Structural introspection as JSON records
//!
//! [`Node::flatten`] produces a plain `serde_json::Value` describing a
//! node and, recursively, its children. The record reflects structure
//! only: render caches and origins stay out, with the one exception of
//! opaque nodes whose cached text is their entire content. Useful for
//! debugging, goldens and diffing trees without walking them by hand.

use serde_json::{Value, json};

use crate::ast::node::{
    BindingData, DeclData, ExprData, Node, NodeData, StmtData, TypeData,
};

fn flatten_opt(node: &Option<Box<Node>>) -> Value {
    match node {
        Some(node) => node.flatten(),
        None => Value::Null,
    }
}

fn flatten_all(nodes: &[Node]) -> Value {
    Value::Array(nodes.iter().map(Node::flatten).collect())
}

impl Node {
    /// Structural record of this node and its children
    pub fn flatten(&self) -> Value {
        match &self.data {
            NodeData::Trivia(text) => json!({
                "type": "Trivia",
                "text": text,
            }),
            NodeData::Opaque => json!({
                "type": "Opaque",
                "text": self.cached_text().unwrap_or_default(),
            }),
            NodeData::Block(block) => json!({
                "type": "Block",
                "shape": block.shape(),
                "delimiters": block.delimiters(),
                "analyzed": block.is_analyzed(),
                "elements": flatten_all(block.elements()),
            }),
            NodeData::Decl(decl) => match decl {
                DeclData::Class {
                    modifiers,
                    name,
                    type_params,
                    heritage,
                    body,
                } => json!({
                    "type": "Class",
                    "modifiers": modifiers,
                    "name": name.flatten(),
                    "type_params": type_params,
                    "heritage": flatten_all(heritage),
                    "body": body.flatten(),
                }),
                DeclData::Interface {
                    modifiers,
                    name,
                    type_params,
                    heritage,
                    body,
                } => json!({
                    "type": "Interface",
                    "modifiers": modifiers,
                    "name": name.flatten(),
                    "type_params": type_params,
                    "heritage": flatten_all(heritage),
                    "body": body.flatten(),
                }),
                DeclData::Function {
                    modifiers,
                    name,
                    type_params,
                    params,
                    return_type,
                    body,
                } => json!({
                    "type": "Function",
                    "modifiers": modifiers,
                    "name": name.flatten(),
                    "type_params": type_params,
                    "params": params.flatten(),
                    "return_type": flatten_opt(return_type),
                    "body": flatten_opt(body),
                }),
                DeclData::Method {
                    modifiers,
                    name,
                    type_params,
                    params,
                    return_type,
                    body,
                } => json!({
                    "type": "Method",
                    "modifiers": modifiers,
                    "name": name.flatten(),
                    "type_params": type_params,
                    "params": params.flatten(),
                    "return_type": flatten_opt(return_type),
                    "body": flatten_opt(body),
                }),
                DeclData::Property {
                    modifiers,
                    name,
                    optional,
                    type_ann,
                    value,
                } => json!({
                    "type": "Property",
                    "modifiers": modifiers,
                    "name": name.flatten(),
                    "optional": optional,
                    "type_ann": flatten_opt(type_ann),
                    "value": flatten_opt(value),
                }),
                DeclData::Variable { kind, declarators } => json!({
                    "type": "Variable",
                    "kind": kind,
                    "declarators": flatten_all(declarators),
                }),
                DeclData::Import { clause, source } => json!({
                    "type": "Import",
                    "clause": clause,
                    "source": flatten_opt(source),
                }),
                DeclData::Export { default, inner } => json!({
                    "type": "Export",
                    "default": default,
                    "inner": inner.flatten(),
                }),
            },
            NodeData::Stmt(stmt) => match stmt {
                StmtData::Return { value } => json!({
                    "type": "Return",
                    "value": flatten_opt(value),
                }),
                StmtData::ExprStmt { expr } => json!({
                    "type": "ExprStmt",
                    "expr": expr.flatten(),
                }),
            },
            NodeData::Expr(expr) => match expr {
                ExprData::Ident { name } => json!({
                    "type": "Ident",
                    "name": name,
                }),
                ExprData::Literal { raw } => json!({
                    "type": "Literal",
                    "raw": raw,
                }),
                ExprData::Call { callee, args } => json!({
                    "type": "Call",
                    "callee": callee.flatten(),
                    "args": args.flatten(),
                }),
                ExprData::New { callee, args } => json!({
                    "type": "New",
                    "callee": callee.flatten(),
                    "args": flatten_opt(args),
                }),
                ExprData::Member {
                    object,
                    operator,
                    property,
                } => json!({
                    "type": "Member",
                    "object": object.flatten(),
                    "operator": operator,
                    "property": property.flatten(),
                }),
                ExprData::Pair { key, value } => json!({
                    "type": "Pair",
                    "key": key.flatten(),
                    "value": value.flatten(),
                }),
                ExprData::Arrow {
                    params,
                    return_type,
                    body,
                } => json!({
                    "type": "Arrow",
                    "params": params.flatten(),
                    "return_type": flatten_opt(return_type),
                    "body": body.flatten(),
                }),
                ExprData::Binary {
                    left,
                    operator,
                    right,
                } => json!({
                    "type": "Binary",
                    "left": left.flatten(),
                    "operator": operator,
                    "right": right.flatten(),
                }),
                ExprData::Paren { inner } => json!({
                    "type": "Paren",
                    "inner": inner.flatten(),
                }),
            },
            NodeData::Type(ty) => match ty {
                TypeData::Ref { name, args } => json!({
                    "type": "TypeRef",
                    "name": name,
                    "args": flatten_all(args),
                }),
                TypeData::Qualified { left, right } => json!({
                    "type": "QualifiedType",
                    "left": left.flatten(),
                    "right": right.flatten(),
                }),
                TypeData::Union { members } => json!({
                    "type": "UnionType",
                    "members": flatten_all(members),
                }),
                TypeData::Array { elem } => json!({
                    "type": "ArrayType",
                    "elem": elem.flatten(),
                }),
            },
            NodeData::Binding(binding) => match binding {
                BindingData::Declarator {
                    name,
                    type_ann,
                    value,
                } => json!({
                    "type": "Declarator",
                    "name": name.flatten(),
                    "type_ann": flatten_opt(type_ann),
                    "value": flatten_opt(value),
                }),
                BindingData::Param {
                    pattern,
                    optional,
                    type_ann,
                    default,
                } => json!({
                    "type": "Param",
                    "pattern": pattern.flatten(),
                    "optional": optional,
                    "type_ann": flatten_opt(type_ann),
                    "default": flatten_opt(default),
                }),
                BindingData::ObjectPattern { elements } => json!({
                    "type": "ObjectPattern",
                    "elements": elements.flatten(),
                }),
                BindingData::ArrayPattern { elements } => json!({
                    "type": "ArrayPattern",
                    "elements": elements.flatten(),
                }),
                BindingData::Rest { inner } => json!({
                    "type": "Rest",
                    "inner": inner.flatten(),
                }),
            },
            NodeData::Heritage(heritage) => json!({
                "type": "Heritage",
                "keyword": heritage.keyword,
                "types": flatten_all(&heritage.types),
            }),
        }
    }
}
