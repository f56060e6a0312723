//! Configuration for structscan.
//!
//! Configuration is read from YAML and controls the parts of extraction that
//! are policy rather than grammar: which imported symbols are worth recording,
//! and how far a doc comment may sit from the declaration it documents.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["structscan.yaml", ".structscan.yaml"];

/// The template written by `structscan init`.
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/default.yaml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub imports: ImportPolicy,
    #[serde(default)]
    pub heuristic: HeuristicConfig,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text.
    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let mut config: Config = serde_yaml::from_str(content)?;
        for rule in &mut config.imports.rules {
            rule.module = rule.module.trim().to_string();
        }
        Ok(config)
    }

    /// Find a config file in `dir`, if any.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

/// Which symbols of a `from module import ...` statement to record.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SymbolFilter {
    /// Record every imported symbol.
    #[default]
    All,
    /// Record only the listed symbols.
    Only(Vec<String>),
    /// Record every symbol except the listed ones.
    Except(Vec<String>),
}

impl SymbolFilter {
    pub fn keeps(&self, symbol: &str) -> bool {
        match self {
            SymbolFilter::All => true,
            SymbolFilter::Only(names) => names.iter().any(|n| n == symbol),
            SymbolFilter::Except(names) => !names.iter().any(|n| n == symbol),
        }
    }
}

/// A module whose imports are recorded per symbol.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NarrowingRule {
    pub module: String,
    /// Written as `all`, `{ only: [...] }` or `{ except: [...] }`.
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub keep: SymbolFilter,
}

/// Narrowing policy for `from module import names` statements.
///
/// A module with a rule is recorded as `module.symbol` for each kept symbol.
/// Any other module is recorded once, by module name.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ImportPolicy {
    #[serde(default)]
    pub rules: Vec<NarrowingRule>,
}

impl Default for ImportPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                NarrowingRule {
                    module: "typing".to_string(),
                    keep: SymbolFilter::Only(vec!["Dict".to_string(), "List".to_string()]),
                },
                NarrowingRule {
                    module: "collections".to_string(),
                    keep: SymbolFilter::All,
                },
            ],
        }
    }
}

impl ImportPolicy {
    /// A policy with no rules: every module is recorded by name only.
    pub fn module_names_only() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule_for(&self, module: &str) -> Option<&NarrowingRule> {
        self.rules.iter().find(|r| r.module == module)
    }

    /// Names to record for `from module import symbols`.
    pub fn qualify(&self, module: &str, symbols: &[&str]) -> Vec<String> {
        match self.rule_for(module) {
            Some(rule) => symbols
                .iter()
                .filter(|s| rule.keep.keeps(s))
                .map(|s| format!("{}.{}", module, s))
                .collect(),
            None => vec![module.to_string()],
        }
    }
}

/// Settings for the pattern-based analyzer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HeuristicConfig {
    /// Maximum blank lines between a block comment and the declaration it
    /// documents.
    #[serde(default = "default_max_doc_gap_lines")]
    pub max_doc_gap_lines: usize,
}

fn default_max_doc_gap_lines() -> usize {
    1
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            max_doc_gap_lines: default_max_doc_gap_lines(),
        }
    }
}

/// Validate a config.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for rule in &config.imports.rules {
        let module = rule.module.trim();
        if module.is_empty() {
            return Err(ConfigError::Invalid(
                "import rule has an empty module name".to_string(),
            ));
        }
        if module != rule.module {
            return Err(ConfigError::Invalid(format!(
                "import rule module {:?} has surrounding whitespace",
                rule.module
            )));
        }
        if !seen.insert(module) {
            return Err(ConfigError::Invalid(format!(
                "duplicate import rule for module {:?}",
                module
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_policy_narrows_typing() {
        let policy = ImportPolicy::default();
        assert_eq!(
            policy.qualify("typing", &["Dict", "List", "Any"]),
            vec!["typing.Dict", "typing.List"]
        );
        assert_eq!(
            policy.qualify("collections", &["OrderedDict"]),
            vec!["collections.OrderedDict"]
        );
        assert_eq!(policy.qualify("os.path", &["join", "exists"]), vec!["os.path"]);
    }

    #[test]
    fn test_except_filter() {
        let filter = SymbolFilter::Except(vec!["Any".to_string()]);
        assert!(filter.keeps("Dict"));
        assert!(!filter.keeps("Any"));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
version: "1"
imports:
  rules:
    - module: typing
      keep:
        except: [Any]
    - module: dataclasses
heuristic:
  max_doc_gap_lines: 0
"#;
        let config = Config::parse_str(yaml).unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.imports.rules.len(), 2);
        assert_eq!(
            config.imports.rules[0].keep,
            SymbolFilter::Except(vec!["Any".to_string()])
        );
        assert_eq!(config.imports.rules[1].keep, SymbolFilter::All);
        assert_eq!(config.heuristic.max_doc_gap_lines, 0);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_parse_only_filter() {
        let yaml = "imports:\n  rules:\n    - module: typing\n      keep: { only: [Dict] }\n";
        let config = Config::parse_str(yaml).unwrap();
        assert_eq!(
            config.imports.rules[0].keep,
            SymbolFilter::Only(vec!["Dict".to_string()])
        );
        assert_eq!(
            config.imports.qualify("typing", &["Dict", "List"]),
            vec!["typing.Dict"]
        );
    }

    #[test]
    fn test_filter_serializes_back_to_same_form() {
        let config = Config::parse_str(DEFAULT_TEMPLATE).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("only:"));
        assert_eq!(Config::parse_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_module_names_are_trimmed() {
        let yaml = "imports:\n  rules:\n    - module: \" typing \"\n      keep: { only: [List] }\n";
        let config = Config::parse_str(yaml).unwrap();
        assert!(validate(&config).is_ok());
        assert_eq!(config.imports.rules[0].module, "typing");
        assert_eq!(
            config.imports.qualify("typing", &["List", "Any"]),
            vec!["typing.List"]
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::parse_str("version: \"1\"\n").unwrap();
        assert_eq!(config.imports, ImportPolicy::default());
        assert_eq!(config.heuristic.max_doc_gap_lines, 1);

        assert_eq!(Config::parse_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_default_template_matches_defaults() {
        let config = Config::parse_str(DEFAULT_TEMPLATE).unwrap();
        assert_eq!(config.imports, ImportPolicy::default());
        assert_eq!(config.heuristic, HeuristicConfig::default());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut config = Config::default();
        config.imports.rules.push(NarrowingRule {
            module: "typing".to_string(),
            keep: SymbolFilter::All,
        });
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        config.imports.rules = vec![NarrowingRule {
            module: "  ".to_string(),
            keep: SymbolFilter::All,
        }];
        assert!(validate(&config).is_err());

        config.imports.rules = vec![NarrowingRule {
            module: " typing".to_string(),
            keep: SymbolFilter::All,
        }];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_discover_and_parse_file() {
        let temp = TempDir::new().unwrap();
        assert!(Config::discover(temp.path()).is_none());

        let path = temp.path().join(".structscan.yaml");
        fs::write(&path, "heuristic:\n  max_doc_gap_lines: 3\n").unwrap();

        let found = Config::discover(temp.path()).unwrap();
        assert_eq!(found, path);
        let config = Config::parse_file(&found).unwrap();
        assert_eq!(config.heuristic.max_doc_gap_lines, 3);
    }

    #[test]
    fn test_parse_file_missing() {
        let err = Config::parse_file("/nonexistent/structscan.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
