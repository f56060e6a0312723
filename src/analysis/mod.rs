//! Source structure extraction.
//!
//! Two analyzers implement one contract, source text in and
//! [`StructuralSummary`] out:
//!
//! - [`PythonAnalyzer`]: walks a tree-sitter parse tree. Classes are walked
//!   recursively so nested classes sit among their parent's members, and
//!   annotations are normalized to strings.
//! - [`TypeScriptAnalyzer`]: regex passes over raw text for languages without
//!   an in-process grammar.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌───────────────────┐
//! │ Source text     │────▶│ Registry         │────▶│ SourceAnalyzer    │
//! └─────────────────┘     │ (by extension)   │     │ (Python, TS/JS)   │
//!                         └──────────────────┘     └───────────────────┘
//!                                                           │
//!                                                           ▼
//!                                                  ┌───────────────────┐
//!                                                  │ StructuralSummary │
//!                                                  │ (classes, funcs,  │
//!                                                  │  imports, vars)   │
//!                                                  └───────────────────┘
//! ```
//!
//! Analyzers keep no state between calls; one instance can serve many
//! threads at once.

mod languages;
mod summary;
mod traits;

pub use languages::braces;
#[cfg(feature = "tree-sitter")]
pub use languages::PythonAnalyzer;
pub use languages::{
    get_analyzer, Registry, TypeScriptAnalyzer, DEFAULT_PARAM_TYPE, IMPLICIT_RETURN_TYPE,
};
pub use summary::{
    ClassInfo, ClassMember, FunctionInfo, ImportInfo, Imports, MethodInfo, Parameter,
    StructuralSummary,
};
#[cfg(feature = "tree-sitter")]
pub use traits::ParsedFile;
pub use traits::{AnalyzeError, SourceAnalyzer};
