//! Language-specific analyzer implementations and their registry.

pub mod braces;
#[cfg(feature = "tree-sitter")]
mod python;
mod typescript;

#[cfg(feature = "tree-sitter")]
pub use python::PythonAnalyzer;
pub use typescript::{TypeScriptAnalyzer, DEFAULT_PARAM_TYPE, IMPLICIT_RETURN_TYPE};

use std::path::Path;

use once_cell::sync::Lazy;

use super::{SourceAnalyzer, StructuralSummary};
use crate::config::Config;

/// Registry built from the default configuration.
static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(Registry::default);

/// Maps file extensions to analyzers.
pub struct Registry {
    analyzers: Vec<Box<dyn SourceAnalyzer>>,
}

impl Registry {
    /// Build a registry whose analyzers follow `config`.
    pub fn new(config: &Config) -> Self {
        let mut analyzers: Vec<Box<dyn SourceAnalyzer>> = Vec::new();
        #[cfg(feature = "tree-sitter")]
        analyzers.push(Box::new(PythonAnalyzer::with_policy(
            config.imports.clone(),
        )));
        analyzers.push(Box::new(TypeScriptAnalyzer::with_config(&config.heuristic)));
        Self { analyzers }
    }

    /// Get an analyzer for the given file extension (without dot).
    pub fn for_extension(&self, ext: &str) -> Option<&dyn SourceAnalyzer> {
        let ext = ext.to_ascii_lowercase();
        self.analyzers
            .iter()
            .find(|a| a.handles_extension(&ext))
            .map(|a| a.as_ref())
    }

    /// Get an analyzer for a path, by its extension.
    pub fn for_path(&self, path: &Path) -> Option<&dyn SourceAnalyzer> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        self.for_extension(ext)
    }

    /// Analyze `source` with the analyzer registered for `path`.
    ///
    /// Returns the language id alongside the summary, or `None` when no
    /// analyzer handles the path.
    pub fn analyze(&self, path: &Path, source: &str) -> Option<(&'static str, StructuralSummary)> {
        let analyzer = self.for_path(path)?;
        let file = path.to_string_lossy();
        Some((analyzer.language_id(), analyzer.analyze(source, &file)))
    }

    pub fn analyzers(&self) -> impl Iterator<Item = &dyn SourceAnalyzer> {
        self.analyzers.iter().map(|a| a.as_ref())
    }

    /// All registered file extensions.
    pub fn extensions(&self) -> Vec<&'static str> {
        self.analyzers
            .iter()
            .flat_map(|a| a.file_extensions().iter().copied())
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Get a default-configured analyzer for the given file extension.
pub fn get_analyzer(ext: &str) -> Option<&'static dyn SourceAnalyzer> {
    DEFAULT_REGISTRY.for_extension(ext)
}
