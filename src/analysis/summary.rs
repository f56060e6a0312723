//! Structural summary types produced by the analyzers.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A declared parameter of a function or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name as written (`*args`/`**kwargs` keep their stars).
    pub name: String,
    /// Normalized annotation, or the analyzer's inferred type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, annotation: Option<String>) -> Self {
        Self {
            name: name.into(),
            annotation,
        }
    }
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Line of the declaration keyword (1-indexed).
    pub line: usize,
    /// Empty when the declaration is undocumented.
    #[serde(default)]
    pub docstring: String,
    #[serde(default)]
    pub args: Vec<Parameter>,
    /// Return type. The grammar analyzer leaves this `None` when there is no
    /// annotation; the heuristic analyzer reports `"void"` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    /// Only populated by the heuristic analyzer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_async: Option<bool>,
}

/// Methods share the function shape.
pub type MethodInfo = FunctionInfo;

/// An entry in a class body: either a method or a nested class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassMember {
    Method(MethodInfo),
    NestedClass(ClassInfo),
}

impl ClassMember {
    pub fn name(&self) -> &str {
        match self {
            ClassMember::Method(m) => &m.name,
            ClassMember::NestedClass(c) => &c.name,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ClassMember::Method(m) => m.line,
            ClassMember::NestedClass(c) => c.line,
        }
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    /// Line of the `class` keyword (1-indexed).
    pub line: usize,
    #[serde(default)]
    pub docstring: String,
    /// Base classes, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<String>,
    /// Methods and nested classes in source order.
    #[serde(default)]
    pub members: Vec<ClassMember>,
}

impl ClassInfo {
    /// Iterate over the methods declared directly in this class.
    pub fn methods(&self) -> impl Iterator<Item = &MethodInfo> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Method(method) => Some(method),
            ClassMember::NestedClass(_) => None,
        })
    }

    /// Iterate over the classes nested directly in this class.
    pub fn nested_classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::NestedClass(class) => Some(class),
            ClassMember::Method(_) => None,
        })
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods().find(|m| m.name == name)
    }
}

/// One import statement recovered by the heuristic analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportInfo {
    /// The module specifier (`"react"`, `"./util"`).
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_import: Option<String>,
    /// `* as ns` binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_import: Option<String>,
    /// Trimmed entries of the `{ ... }` clause, in source order.
    #[serde(default)]
    pub named_imports: Vec<String>,
    pub line: usize,
}

/// Imports in the shape each analyzer produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Imports {
    /// De-duplicated qualified names (`"typing.Dict"`, `"os"`).
    Qualified(BTreeSet<String>),
    /// One record per import statement, in source order.
    Statements(Vec<ImportInfo>),
}

impl Imports {
    pub fn len(&self) -> usize {
        match self {
            Imports::Qualified(set) => set.len(),
            Imports::Statements(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn qualified(&self) -> Option<&BTreeSet<String>> {
        match self {
            Imports::Qualified(set) => Some(set),
            Imports::Statements(_) => None,
        }
    }

    pub fn statements(&self) -> Option<&[ImportInfo]> {
        match self {
            Imports::Statements(list) => Some(list),
            Imports::Qualified(_) => None,
        }
    }

    /// Module names referenced, in a stable order.
    pub fn modules(&self) -> Vec<&str> {
        match self {
            Imports::Qualified(set) => set.iter().map(String::as_str).collect(),
            Imports::Statements(list) => list.iter().map(|i| i.module.as_str()).collect(),
        }
    }
}

impl Default for Imports {
    fn default() -> Self {
        Imports::Qualified(BTreeSet::new())
    }
}

/// The per-file result of an analysis call.
///
/// Every field is always present; a failed analysis yields the empty summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralSummary {
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    /// Module-scope functions only.
    #[serde(default)]
    pub functions: Vec<FunctionInfo>,
    #[serde(default)]
    pub imports: Imports,
    #[serde(default)]
    pub variables: Vec<String>,
}

impl StructuralSummary {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.functions.is_empty()
            && self.imports.is_empty()
            && self.variables.is_empty()
    }

    pub fn find_class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Count of methods across all classes, nested classes included.
    pub fn method_count(&self) -> usize {
        fn count(class: &ClassInfo) -> usize {
            class
                .members
                .iter()
                .map(|m| match m {
                    ClassMember::Method(_) => 1,
                    ClassMember::NestedClass(inner) => count(inner),
                })
                .sum()
        }
        self.classes.iter().map(count).sum()
    }
}

impl fmt::Display for StructuralSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} classes, {} functions, {} imports, {} variables",
            self.classes.len(),
            self.functions.len(),
            self.imports.len(),
            self.variables.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, line: usize) -> ClassMember {
        ClassMember::Method(FunctionInfo {
            name: name.to_string(),
            line,
            docstring: String::new(),
            args: Vec::new(),
            returns: None,
            is_async: None,
        })
    }

    #[test]
    fn test_default_summary_is_empty() {
        let summary = StructuralSummary::default();
        assert!(summary.is_empty());
        assert!(summary.imports.qualified().is_some());
        assert_eq!(summary.to_string(), "0 classes, 0 functions, 0 imports, 0 variables");
    }

    #[test]
    fn test_member_accessors() {
        let inner = ClassInfo {
            name: "Inner".to_string(),
            line: 4,
            docstring: String::new(),
            bases: Vec::new(),
            members: vec![method("n", 5)],
        };
        let outer = ClassInfo {
            name: "Outer".to_string(),
            line: 1,
            docstring: String::new(),
            bases: Vec::new(),
            members: vec![method("m", 2), ClassMember::NestedClass(inner)],
        };

        assert_eq!(outer.methods().count(), 1);
        assert_eq!(outer.nested_classes().count(), 1);
        assert_eq!(outer.members[1].name(), "Inner");
        assert_eq!(outer.members[1].line(), 4);
        assert!(outer.find_method("m").is_some());
        assert!(outer.find_method("n").is_none());

        let summary = StructuralSummary {
            classes: vec![outer],
            ..Default::default()
        };
        assert_eq!(summary.method_count(), 2);
    }

    #[test]
    fn test_class_member_serializes_with_kind_tag() {
        let json = serde_json::to_value(method("run", 3)).unwrap();
        assert_eq!(json["kind"], "method");
        assert_eq!(json["name"], "run");
        // Absent optional fields are omitted rather than null.
        assert!(json.get("returns").is_none());
        assert!(json.get("is_async").is_none());
    }

    #[test]
    fn test_imports_serialize_by_shape() {
        let mut set = BTreeSet::new();
        set.insert("os".to_string());
        let json = serde_json::to_value(Imports::Qualified(set)).unwrap();
        assert_eq!(json, serde_json::json!(["os"]));

        let statements = Imports::Statements(vec![ImportInfo {
            module: "react".to_string(),
            default_import: Some("React".to_string()),
            namespace_import: None,
            named_imports: vec!["useState".to_string()],
            line: 1,
        }]);
        let json = serde_json::to_value(&statements).unwrap();
        assert_eq!(json[0]["module"], "react");
        assert_eq!(statements.modules(), vec!["react"]);
    }
}
