//! Normalization of Python type annotations to strings.
//!
//! Supported shapes:
//! - bare names: `int` -> `"int"`
//! - qualified names: `np.ndarray` -> `"np.ndarray"`
//! - single-parameter generics: `typing.Mapping[Value]` -> `"typing.Mapping[Value]"`,
//!   with the parameter normalized recursively
//!
//! Anything else (unions, literals, string forward references, `None`,
//! multi-parameter generics such as `Dict[str, int]`) has no normalized form
//! and resolves to `None`.

use tree_sitter::Node;

use super::kinds::NodeKind;
use crate::analysis::ParsedFile;

/// Resolve an annotation node (or the `type` wrapper around one).
pub(crate) fn resolve(parsed: &ParsedFile, node: Node) -> Option<String> {
    match NodeKind::of(node) {
        NodeKind::Type => {
            let inner = single_named_child(node)?;
            resolve(parsed, inner)
        }
        NodeKind::Identifier => Some(parsed.node_text(node).to_string()),
        NodeKind::Attribute => {
            let object = node.child_by_field_name("object")?;
            let attribute = node.child_by_field_name("attribute")?;
            let base = resolve(parsed, object)?;
            Some(format!("{}.{}", base, parsed.node_text(attribute)))
        }
        NodeKind::MemberType => {
            let mut cursor = node.walk();
            let parts: Vec<Node> = node.named_children(&mut cursor).collect();
            let (first, last) = (parts.first()?, parts.last()?);
            if parts.len() != 2 || NodeKind::of(*last) != NodeKind::Identifier {
                return None;
            }
            let base = resolve(parsed, *first)?;
            Some(format!("{}.{}", base, parsed.node_text(*last)))
        }
        NodeKind::Subscript => {
            let value = node.child_by_field_name("value")?;
            let mut cursor = node.walk();
            let params: Vec<Node> = node
                .children_by_field_name("subscript", &mut cursor)
                .collect();
            let [param] = params.as_slice() else {
                return None;
            };
            generic(parsed, value, *param)
        }
        NodeKind::GenericType => {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            let [base, params] = children.as_slice() else {
                return None;
            };
            let param = single_named_child(*params)?;
            generic(parsed, *base, param)
        }
        NodeKind::ImportStatement
        | NodeKind::ImportFromStatement
        | NodeKind::ExpressionStatement
        | NodeKind::Assignment
        | NodeKind::FunctionDefinition
        | NodeKind::ClassDefinition
        | NodeKind::DecoratedDefinition
        | NodeKind::Block
        | NodeKind::Comment
        | NodeKind::DottedName
        | NodeKind::AliasedImport
        | NodeKind::String
        | NodeKind::ConcatenatedString
        | NodeKind::TypedParameter
        | NodeKind::DefaultParameter
        | NodeKind::TypedDefaultParameter
        | NodeKind::ListSplatPattern
        | NodeKind::DictionarySplatPattern
        | NodeKind::Unsupported => None,
    }
}

fn generic(parsed: &ParsedFile, base: Node, param: Node) -> Option<String> {
    let base = resolve(parsed, base)?;
    let param = resolve(parsed, param)?;
    Some(format!("{}[{}]", base, param))
}

fn single_named_child(node: Node) -> Option<Node> {
    if node.named_child_count() == 1 {
        node.named_child(0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    /// Resolve the annotation of `x` in `def f(x: <annotation>): pass`.
    fn resolve_param(annotation: &str) -> Option<String> {
        let source = format!("def f(x: {}):\n    pass\n", annotation);
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(&source, None).unwrap();
        assert!(!tree.root_node().has_error(), "fixture should parse: {}", source);

        let parsed = ParsedFile {
            tree,
            source: source.as_bytes(),
        };
        let root = parsed.tree.root_node();
        let func = root.named_child(0).unwrap();
        let params = func.child_by_field_name("parameters").unwrap();
        let typed = params.named_child(0).unwrap();
        let ty = typed.child_by_field_name("type").unwrap();
        resolve(&parsed, ty)
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(resolve_param("int"), Some("int".to_string()));
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(resolve_param("np.ndarray"), Some("np.ndarray".to_string()));
        assert_eq!(resolve_param("a.b.C"), Some("a.b.C".to_string()));
    }

    #[test]
    fn test_single_parameter_generic() {
        assert_eq!(resolve_param("List[int]"), Some("List[int]".to_string()));
        assert_eq!(
            resolve_param("module.Mapping[ValueType]"),
            Some("module.Mapping[ValueType]".to_string())
        );
        assert_eq!(
            resolve_param("Optional[List[str]]"),
            Some("Optional[List[str]]".to_string())
        );
    }

    #[test]
    fn test_unsupported_shapes() {
        assert_eq!(resolve_param("Dict[str, int]"), None);
        assert_eq!(resolve_param("int | None"), None);
        assert_eq!(resolve_param("'Forward'"), None);
        assert_eq!(resolve_param("None"), None);
        assert_eq!(resolve_param("Literal[1]"), None);
        assert_eq!(resolve_param("List[Dict[str, int]]"), None);
    }
}
