//! Closed classification of the tree-sitter-python node kinds we consume.

use tree_sitter::Node;

/// Node kinds the Python walk distinguishes. Every other grammar kind maps to
/// [`NodeKind::Unsupported`], so each `match` over this enum names its
/// fallthrough explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    // Statements
    ImportStatement,
    ImportFromStatement,
    ExpressionStatement,
    Assignment,
    FunctionDefinition,
    ClassDefinition,
    DecoratedDefinition,
    Block,
    Comment,

    // Import pieces
    DottedName,
    AliasedImport,

    // Expressions and type syntax
    Identifier,
    Attribute,
    Subscript,
    Type,
    GenericType,
    MemberType,
    String,
    ConcatenatedString,

    // Parameters
    TypedParameter,
    DefaultParameter,
    TypedDefaultParameter,
    ListSplatPattern,
    DictionarySplatPattern,

    Unsupported,
}

impl NodeKind {
    pub(crate) fn from_kind(kind: &str) -> Self {
        match kind {
            "import_statement" => NodeKind::ImportStatement,
            "import_from_statement" => NodeKind::ImportFromStatement,
            "expression_statement" => NodeKind::ExpressionStatement,
            "assignment" => NodeKind::Assignment,
            "function_definition" => NodeKind::FunctionDefinition,
            "class_definition" => NodeKind::ClassDefinition,
            "decorated_definition" => NodeKind::DecoratedDefinition,
            "block" => NodeKind::Block,
            "comment" => NodeKind::Comment,
            "dotted_name" => NodeKind::DottedName,
            "aliased_import" => NodeKind::AliasedImport,
            "identifier" => NodeKind::Identifier,
            "attribute" => NodeKind::Attribute,
            "subscript" => NodeKind::Subscript,
            "type" => NodeKind::Type,
            "generic_type" => NodeKind::GenericType,
            "member_type" => NodeKind::MemberType,
            "string" => NodeKind::String,
            "concatenated_string" => NodeKind::ConcatenatedString,
            "typed_parameter" => NodeKind::TypedParameter,
            "default_parameter" => NodeKind::DefaultParameter,
            "typed_default_parameter" => NodeKind::TypedDefaultParameter,
            "list_splat_pattern" => NodeKind::ListSplatPattern,
            "dictionary_splat_pattern" => NodeKind::DictionarySplatPattern,
            _ => NodeKind::Unsupported,
        }
    }

    pub(crate) fn of(node: Node) -> Self {
        Self::from_kind(node.kind())
    }
}
