//! Core traits for source analysis.

use thiserror::Error;

use super::StructuralSummary;

/// Failures inside an analyzer.
///
/// These never reach callers of [`SourceAnalyzer::analyze`]; they are logged
/// and replaced by an empty summary at the analyzer boundary.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("syntax error near line {line}")]
    Syntax { line: usize },
    #[error("parser produced no tree")]
    NoTree,
    #[cfg(feature = "tree-sitter")]
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

/// Holds a parsed tree-sitter tree and the source it was built from.
#[cfg(feature = "tree-sitter")]
pub struct ParsedFile<'s> {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source (kept for node text extraction).
    pub source: &'s [u8],
}

#[cfg(feature = "tree-sitter")]
impl<'s> ParsedFile<'s> {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }
}

/// Language-specific analyzer.
///
/// Implementations are pure functions of their input: no state carries over
/// between calls, so one instance may be shared across threads.
pub trait SourceAnalyzer: Send + Sync {
    /// Returns the language identifier (e.g., "python", "typescript").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyzer handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Extract the structural summary of one source file.
    ///
    /// `file` is used only to attribute log messages. This never fails: input
    /// that cannot be analyzed yields an empty summary.
    fn analyze(&self, source: &str, file: &str) -> StructuralSummary;

    /// Check if this analyzer handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
