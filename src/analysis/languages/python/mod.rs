//! Python analyzer backed by the tree-sitter grammar.
//!
//! Walks the immediate children of the module node, classifying imports,
//! simple assignments, function definitions and class definitions. Class
//! bodies are walked recursively so nested classes appear among their
//! parent's members.

mod annotation;
mod kinds;

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use tree_sitter::{Language, Node, Parser};

use self::kinds::NodeKind;
use crate::analysis::{
    AnalyzeError, ClassInfo, ClassMember, FunctionInfo, Imports, Parameter, ParsedFile,
    SourceAnalyzer, StructuralSummary,
};
use crate::config::ImportPolicy;

/// Conventional name of the instance parameter dropped from method signatures.
const SELF_PARAMETER: &str = "self";

pub struct PythonAnalyzer {
    language: Language,
    policy: ImportPolicy,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self::with_policy(ImportPolicy::default())
    }

    /// Create an analyzer with a custom import narrowing policy.
    pub fn with_policy(policy: ImportPolicy) -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
            policy,
        }
    }

    fn create_parser(&self) -> Result<Parser, AnalyzeError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Parse `source`, rejecting trees that contain syntax errors.
    fn parse<'s>(&self, source: &'s str) -> Result<ParsedFile<'s>, AnalyzeError> {
        let mut parser = self.create_parser()?;
        let tree = parser.parse(source, None).ok_or(AnalyzeError::NoTree)?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(AnalyzeError::Syntax {
                line: first_error_line(root),
            });
        }

        Ok(ParsedFile {
            tree,
            source: source.as_bytes(),
        })
    }

    /// Analyze `source`, surfacing the failure instead of swallowing it.
    pub fn try_analyze(&self, source: &str) -> Result<StructuralSummary, AnalyzeError> {
        let parsed = self.parse(source)?;
        Ok(self.extract_summary(&parsed))
    }

    fn extract_summary(&self, parsed: &ParsedFile) -> StructuralSummary {
        let root = parsed.tree.root_node();
        let mut imports = BTreeSet::new();
        let mut summary = StructuralSummary::default();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            self.visit_top_level(parsed, child, &mut summary, &mut imports);
        }

        summary.imports = Imports::Qualified(imports);
        summary
    }

    fn visit_top_level(
        &self,
        parsed: &ParsedFile,
        node: Node,
        summary: &mut StructuralSummary,
        imports: &mut BTreeSet<String>,
    ) {
        match NodeKind::of(node) {
            NodeKind::ImportStatement => {
                let mut cursor = node.walk();
                for name in node.children_by_field_name("name", &mut cursor) {
                    if let Some(name) = imported_name(parsed, name) {
                        imports.insert(name.to_string());
                    }
                }
            }
            NodeKind::ImportFromStatement => {
                let Some(module) = node.child_by_field_name("module_name") else {
                    return;
                };
                let module = parsed.node_text(module);
                let mut cursor = node.walk();
                let symbols: Vec<&str> = node
                    .children_by_field_name("name", &mut cursor)
                    .filter_map(|n| imported_name(parsed, n))
                    .collect();
                imports.extend(self.policy.qualify(module, &symbols));
            }
            NodeKind::ExpressionStatement => {
                let mut cursor = node.walk();
                for expr in node.named_children(&mut cursor) {
                    if NodeKind::of(expr) == NodeKind::Assignment {
                        collect_assignment_targets(parsed, expr, &mut summary.variables);
                    }
                }
            }
            NodeKind::FunctionDefinition => {
                summary.functions.push(self.extract_function(parsed, node, false));
            }
            NodeKind::ClassDefinition => {
                summary.classes.push(self.extract_class(parsed, node));
            }
            NodeKind::DecoratedDefinition => {
                if let Some(definition) = node.child_by_field_name("definition") {
                    self.visit_top_level(parsed, definition, summary, imports);
                }
            }
            NodeKind::Assignment
            | NodeKind::Block
            | NodeKind::Comment
            | NodeKind::DottedName
            | NodeKind::AliasedImport
            | NodeKind::Identifier
            | NodeKind::Attribute
            | NodeKind::Subscript
            | NodeKind::Type
            | NodeKind::GenericType
            | NodeKind::MemberType
            | NodeKind::String
            | NodeKind::ConcatenatedString
            | NodeKind::TypedParameter
            | NodeKind::DefaultParameter
            | NodeKind::TypedDefaultParameter
            | NodeKind::ListSplatPattern
            | NodeKind::DictionarySplatPattern
            | NodeKind::Unsupported => {}
        }
    }

    fn extract_class(&self, parsed: &ParsedFile, node: Node) -> ClassInfo {
        let name = node
            .child_by_field_name("name")
            .map(|n| parsed.node_text(n).to_string())
            .unwrap_or_default();
        let body = node.child_by_field_name("body");

        let bases = match node.child_by_field_name("superclasses") {
            Some(args) => {
                let mut cursor = args.walk();
                args.named_children(&mut cursor)
                    .filter_map(|arg| annotation::resolve(parsed, arg))
                    .collect()
            }
            None => Vec::new(),
        };

        let mut members = Vec::new();
        if let Some(body) = body {
            let mut cursor = body.walk();
            for stmt in body.named_children(&mut cursor) {
                if let Some(member) = self.extract_member(parsed, stmt) {
                    members.push(member);
                }
            }
        }

        ClassInfo {
            name,
            line: node.start_position().row + 1,
            docstring: docstring(parsed, body),
            bases,
            members,
        }
    }

    fn extract_member(&self, parsed: &ParsedFile, node: Node) -> Option<ClassMember> {
        match NodeKind::of(node) {
            NodeKind::FunctionDefinition => {
                Some(ClassMember::Method(self.extract_function(parsed, node, true)))
            }
            NodeKind::ClassDefinition => {
                Some(ClassMember::NestedClass(self.extract_class(parsed, node)))
            }
            NodeKind::DecoratedDefinition => {
                let definition = node.child_by_field_name("definition")?;
                self.extract_member(parsed, definition)
            }
            NodeKind::ImportStatement
            | NodeKind::ImportFromStatement
            | NodeKind::ExpressionStatement
            | NodeKind::Assignment
            | NodeKind::Block
            | NodeKind::Comment
            | NodeKind::DottedName
            | NodeKind::AliasedImport
            | NodeKind::Identifier
            | NodeKind::Attribute
            | NodeKind::Subscript
            | NodeKind::Type
            | NodeKind::GenericType
            | NodeKind::MemberType
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

    fn extract_function(&self, parsed: &ParsedFile, node: Node, is_method: bool) -> FunctionInfo {
        let name = node
            .child_by_field_name("name")
            .map(|n| parsed.node_text(n).to_string())
            .unwrap_or_default();

        let mut args = node
            .child_by_field_name("parameters")
            .map(|params| extract_parameters(parsed, params))
            .unwrap_or_default();
        if is_method && args.first().is_some_and(|p| p.name == SELF_PARAMETER) {
            args.remove(0);
        }

        let returns = node
            .child_by_field_name("return_type")
            .and_then(|ty| annotation::resolve(parsed, ty));

        FunctionInfo {
            name,
            line: node.start_position().row + 1,
            docstring: docstring(parsed, node.child_by_field_name("body")),
            args,
            returns,
            is_async: None,
        }
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAnalyzer for PythonAnalyzer {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["py", "pyi"]
    }

    fn analyze(&self, source: &str, file: &str) -> StructuralSummary {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_analyze(source))) {
            Ok(Ok(summary)) => {
                tracing::debug!(file, %summary, "extracted python structure");
                summary
            }
            Ok(Err(e)) => {
                tracing::warn!(file, error = %e, "python analysis failed, returning empty summary");
                StructuralSummary::default()
            }
            Err(_) => {
                tracing::warn!(file, "python analysis panicked, returning empty summary");
                StructuralSummary::default()
            }
        }
    }
}

/// Line of the first ERROR or MISSING node under `node`.
fn first_error_line(node: Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_position().row + 1;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_line(child);
        }
    }
    node.start_position().row + 1
}

/// The module path bound by one `import` clause entry (`a.b`, `a.b as c`).
fn imported_name<'s>(parsed: &ParsedFile<'s>, node: Node) -> Option<&'s str> {
    match NodeKind::of(node) {
        NodeKind::DottedName => Some(parsed.node_text(node)),
        NodeKind::AliasedImport => node
            .child_by_field_name("name")
            .map(|name| parsed.node_text(name)),
        _ => None,
    }
}

/// Push bare-name targets of `a = b = value`. Annotated assignments are not
/// simple assignments and contribute nothing.
fn collect_assignment_targets(parsed: &ParsedFile, node: Node, out: &mut Vec<String>) {
    if node.child_by_field_name("type").is_some() {
        return;
    }
    if let Some(left) = node.child_by_field_name("left") {
        if NodeKind::of(left) == NodeKind::Identifier {
            out.push(parsed.node_text(left).to_string());
        }
    }
    if let Some(right) = node.child_by_field_name("right") {
        if NodeKind::of(right) == NodeKind::Assignment {
            collect_assignment_targets(parsed, right, out);
        }
    }
}

fn extract_parameters(parsed: &ParsedFile, params: Node) -> Vec<Parameter> {
    let mut cursor = params.walk();
    params
        .named_children(&mut cursor)
        .filter_map(|param| match NodeKind::of(param) {
            NodeKind::Identifier | NodeKind::ListSplatPattern | NodeKind::DictionarySplatPattern => {
                Some(Parameter::new(parsed.node_text(param), None))
            }
            NodeKind::TypedParameter => {
                let name = param.named_child(0)?;
                let annotation = param
                    .child_by_field_name("type")
                    .and_then(|ty| annotation::resolve(parsed, ty));
                Some(Parameter::new(parsed.node_text(name), annotation))
            }
            NodeKind::DefaultParameter | NodeKind::TypedDefaultParameter => {
                let name = param.child_by_field_name("name")?;
                let annotation = param
                    .child_by_field_name("type")
                    .and_then(|ty| annotation::resolve(parsed, ty));
                Some(Parameter::new(parsed.node_text(name), annotation))
            }
            // `/` and `*` separators, comments
            _ => None,
        })
        .collect()
}

/// Docstring of a function or class body, cleaned of quotes and indentation.
fn docstring(parsed: &ParsedFile, body: Option<Node>) -> String {
    let Some(body) = body else {
        return String::new();
    };
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|n| NodeKind::of(*n) != NodeKind::Comment);

    let literal = first
        .filter(|stmt| {
            NodeKind::of(*stmt) == NodeKind::ExpressionStatement && stmt.named_child_count() == 1
        })
        .and_then(|stmt| stmt.named_child(0));

    literal
        .and_then(|expr| docstring_value(parsed, expr))
        .map(|raw| clean_doc(&raw))
        .unwrap_or_default()
}

/// Value of a string or implicitly concatenated string expression.
fn docstring_value(parsed: &ParsedFile, expr: Node) -> Option<String> {
    match NodeKind::of(expr) {
        NodeKind::String => string_literal_value(parsed.node_text(expr)),
        NodeKind::ConcatenatedString => {
            let mut cursor = expr.walk();
            let parts: Option<Vec<String>> = expr
                .named_children(&mut cursor)
                .map(|part| match NodeKind::of(part) {
                    NodeKind::String => string_literal_value(parsed.node_text(part)),
                    _ => None,
                })
                .collect();
            parts.map(|parts| parts.concat())
        }
        _ => None,
    }
}

/// Value of a plain string literal. Byte strings and f-strings are not
/// docstrings and yield `None`.
fn string_literal_value(literal: &str) -> Option<String> {
    let quote_at = literal.find(['"', '\''])?;
    let prefix = literal[..quote_at].to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') {
        return None;
    }
    let raw = prefix.contains('r');

    let body = &literal[quote_at..];
    let delimiter = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|d| body.starts_with(d))?;
    let inner = body
        .strip_prefix(delimiter)?
        .strip_suffix(delimiter)
        .unwrap_or_else(|| &body[delimiter.len()..]);

    Some(if raw { inner.to_string() } else { unescape(inner) })
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Strip the common indentation of all lines after the first, trim the
/// first line, and drop leading and trailing blank lines.
fn clean_doc(doc: &str) -> String {
    let expanded = doc.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();
    let Some((first, rest)) = lines.split_first() else {
        return String::new();
    };

    let margin = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    cleaned.push(first.trim());
    for line in rest {
        let dedented = line.get(margin..).unwrap_or_else(|| line.trim_start());
        cleaned.push(dedented.trim_end());
    }

    while cleaned.first().is_some_and(|l| l.is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|l| l.is_empty()) {
        cleaned.pop();
    }
    cleaned.join("\n")
}
