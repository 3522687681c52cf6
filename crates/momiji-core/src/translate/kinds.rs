//! Parse tree kind names the translator dispatches on.
//!
//! Names match the tree-sitter TypeScript grammar. Kinds absent from this
//! list fall to the unsupported construct policy.

// containers
pub(crate) const PROGRAM: &str = "program";
pub(crate) const STATEMENT_BLOCK: &str = "statement_block";
pub(crate) const CLASS_BODY: &str = "class_body";
pub(crate) const OBJECT: &str = "object";
pub(crate) const ARRAY: &str = "array";
pub(crate) const FORMAL_PARAMETERS: &str = "formal_parameters";
pub(crate) const ARGUMENTS: &str = "arguments";

// declarations
pub(crate) const LEXICAL_DECLARATION: &str = "lexical_declaration";
pub(crate) const VARIABLE_DECLARATION: &str = "variable_declaration";
pub(crate) const VARIABLE_DECLARATOR: &str = "variable_declarator";
pub(crate) const CLASS_DECLARATION: &str = "class_declaration";
pub(crate) const ABSTRACT_CLASS_DECLARATION: &str = "abstract_class_declaration";
pub(crate) const INTERFACE_DECLARATION: &str = "interface_declaration";
pub(crate) const FUNCTION_DECLARATION: &str = "function_declaration";
pub(crate) const FUNCTION_SIGNATURE: &str = "function_signature";
pub(crate) const METHOD_DEFINITION: &str = "method_definition";
pub(crate) const METHOD_SIGNATURE: &str = "method_signature";
pub(crate) const ABSTRACT_METHOD_SIGNATURE: &str = "abstract_method_signature";
pub(crate) const PUBLIC_FIELD_DEFINITION: &str = "public_field_definition";
pub(crate) const PROPERTY_SIGNATURE: &str = "property_signature";
pub(crate) const IMPORT_STATEMENT: &str = "import_statement";
pub(crate) const EXPORT_STATEMENT: &str = "export_statement";

// heritage
pub(crate) const CLASS_HERITAGE: &str = "class_heritage";
pub(crate) const EXTENDS_CLAUSE: &str = "extends_clause";
pub(crate) const IMPLEMENTS_CLAUSE: &str = "implements_clause";
pub(crate) const EXTENDS_TYPE_CLAUSE: &str = "extends_type_clause";
pub(crate) const DECORATOR: &str = "decorator";

// statements
pub(crate) const EXPRESSION_STATEMENT: &str = "expression_statement";
pub(crate) const RETURN_STATEMENT: &str = "return_statement";

// identifiers
pub(crate) const IDENTIFIER: &str = "identifier";
pub(crate) const PROPERTY_IDENTIFIER: &str = "property_identifier";
pub(crate) const TYPE_IDENTIFIER: &str = "type_identifier";
pub(crate) const SHORTHAND_PROPERTY_IDENTIFIER: &str = "shorthand_property_identifier";
pub(crate) const SHORTHAND_PROPERTY_IDENTIFIER_PATTERN: &str =
    "shorthand_property_identifier_pattern";
pub(crate) const PRIVATE_PROPERTY_IDENTIFIER: &str = "private_property_identifier";
pub(crate) const THIS: &str = "this";
pub(crate) const SUPER: &str = "super";

// literals
pub(crate) const STRING: &str = "string";
pub(crate) const TEMPLATE_STRING: &str = "template_string";
pub(crate) const NUMBER: &str = "number";
pub(crate) const REGEX: &str = "regex";
pub(crate) const TRUE: &str = "true";
pub(crate) const FALSE: &str = "false";
pub(crate) const NULL: &str = "null";
pub(crate) const UNDEFINED: &str = "undefined";

// expressions
pub(crate) const CALL_EXPRESSION: &str = "call_expression";
pub(crate) const NEW_EXPRESSION: &str = "new_expression";
pub(crate) const MEMBER_EXPRESSION: &str = "member_expression";
pub(crate) const PAIR: &str = "pair";
pub(crate) const ARROW_FUNCTION: &str = "arrow_function";
pub(crate) const BINARY_EXPRESSION: &str = "binary_expression";
pub(crate) const ASSIGNMENT_EXPRESSION: &str = "assignment_expression";
pub(crate) const AUGMENTED_ASSIGNMENT_EXPRESSION: &str = "augmented_assignment_expression";
pub(crate) const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";
pub(crate) const SPREAD_ELEMENT: &str = "spread_element";

// bindings
pub(crate) const REQUIRED_PARAMETER: &str = "required_parameter";
pub(crate) const OPTIONAL_PARAMETER: &str = "optional_parameter";
pub(crate) const OBJECT_PATTERN: &str = "object_pattern";
pub(crate) const ARRAY_PATTERN: &str = "array_pattern";
pub(crate) const REST_PATTERN: &str = "rest_pattern";
pub(crate) const PAIR_PATTERN: &str = "pair_pattern";
pub(crate) const OBJECT_ASSIGNMENT_PATTERN: &str = "object_assignment_pattern";

// types
pub(crate) const TYPE_ANNOTATION: &str = "type_annotation";
pub(crate) const PREDEFINED_TYPE: &str = "predefined_type";
pub(crate) const LITERAL_TYPE: &str = "literal_type";
pub(crate) const NESTED_TYPE_IDENTIFIER: &str = "nested_type_identifier";
pub(crate) const GENERIC_TYPE: &str = "generic_type";
pub(crate) const UNION_TYPE: &str = "union_type";
pub(crate) const ARRAY_TYPE: &str = "array_type";
