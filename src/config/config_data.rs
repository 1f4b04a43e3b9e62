//! Configuration data structures.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Main configuration structure for Omni.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root directory scanned for documents.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Root directory for emitted files.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Extensions of documents picked up by directory processing.
    #[serde(default = "default_file_types")]
    pub file_types: Vec<String>,

    /// Named plugins registered after the built-ins, in order.
    #[serde(default = "default_plugins")]
    pub plugins: Vec<String>,

    /// Directive aliases, `alias = "canonical"`.
    #[serde(default)]
    pub aliases: IndexMap<String, String>,

    /// Watch configuration.
    #[serde(default)]
    pub watch: WatchConfig,

    /// Log exports instead of writing them.
    #[serde(skip)]
    pub dry_run: bool,
}

fn default_input() -> PathBuf {
    PathBuf::from("./")
}

fn default_output() -> PathBuf {
    PathBuf::from("./dist")
}

fn default_file_types() -> Vec<String> {
    ["md", "omni", "odd", "od"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_plugins() -> Vec<String> {
    vec!["interpolate-javascript".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            file_types: default_file_types(),
            plugins: default_plugins(),
            aliases: IndexMap::new(),
            watch: WatchConfig::default(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchors relative `input` and `output` paths at `base_dir`.
    #[must_use]
    pub fn resolve_paths(mut self, base_dir: &Path) -> Self {
        if self.input.is_relative() {
            self.input = base_dir.join(&self.input);
        }
        if self.output.is_relative() {
            self.output = base_dir.join(&self.output);
        }
        self
    }

    /// Returns true if `ext` is one of the configured document extensions.
    pub fn is_document_type(&self, ext: &str) -> bool {
        self.file_types.iter().any(|t| t == ext)
    }
}

/// Watch mode configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,

    /// Glob patterns, relative to `input`, that never trigger a rebuild.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_debounce() -> u64 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
            exclude: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input, PathBuf::from("./"));
        assert_eq!(config.output, PathBuf::from("./dist"));
        assert_eq!(config.file_types, vec!["md", "omni", "odd", "od"]);
        assert_eq!(config.plugins, vec!["interpolate-javascript"]);
        assert_eq!(config.watch.debounce_ms, 100);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("output = \"build\"\n[watch]\nexclude = [\"drafts/**\"]\n").unwrap();
        assert_eq!(config.output, PathBuf::from("build"));
        assert_eq!(config.input, PathBuf::from("./"));
        assert_eq!(config.watch.debounce_ms, 100);
        assert_eq!(config.watch.exclude, vec!["drafts/**"]);
    }

    #[test]
    fn test_resolve_paths() {
        let config = Config {
            output: PathBuf::from("/abs/out"),
            ..Config::default()
        }
        .resolve_paths(Path::new("/project"));

        assert_eq!(config.input, PathBuf::from("/project/./"));
        assert_eq!(config.output, PathBuf::from("/abs/out"));
    }

    #[test]
    fn test_is_document_type() {
        let config = Config::default();
        assert!(config.is_document_type("omni"));
        assert!(!config.is_document_type("js"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut config = Config::default();
        config.aliases.insert("exp".to_string(), "export".to_string());

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
