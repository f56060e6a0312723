//! structscan - static source-structure extraction.
//!
//! structscan reads a source file and produces a normalized structural
//! summary: classes (with methods and nested classes), module-level
//! functions, imports and top-level variables, together with parameters,
//! return types and docstrings.
//!
//! # Architecture
//!
//! - `analysis`: the analyzers, their shared data model and the registry
//! - `config`: YAML configuration (import narrowing, doc comment adjacency)
//! - `report`: Output formatting (text, JSON)
//! - `cli`: the `structscan` command line
//!
//! # Adding a New Language
//!
//! Implement `SourceAnalyzer` in `src/analysis/languages/` and register it in
//! `Registry::new`.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod report;

#[cfg(feature = "tree-sitter")]
pub use analysis::PythonAnalyzer;
pub use analysis::{
    get_analyzer, ClassInfo, ClassMember, FunctionInfo, ImportInfo, Imports, MethodInfo,
    Parameter, Registry, SourceAnalyzer, StructuralSummary, TypeScriptAnalyzer,
};
pub use config::Config;
