//! Configuration loading.

mod config_data;

use std::fs;
use std::path::{Path, PathBuf};

pub use config_data::{Config, WatchConfig};

use crate::errors::Result;

/// Standard configuration file names to search for.
const CONFIG_FILES: &[&str] = &["omni.toml", ".omni.toml"];

/// Finds the configuration file in the given directory or its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Reads configuration from a TOML file.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Reads configuration, searching from the given directory.
///
/// If no config file is found, returns the default configuration.
pub fn read_config(start_dir: &Path) -> Result<Config> {
    match find_config_file(start_dir) {
        Some(path) => {
            tracing::debug!("Using configuration {}", path.display());
            read_config_file(&path)
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OmniError;
    use tempfile::tempdir;

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("omni.toml");
        fs::write(&config_path, "output = \"out\"").unwrap();

        assert_eq!(find_config_file(dir.path()).unwrap(), config_path);
    }

    #[test]
    fn test_find_hidden_config_in_parent() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".omni.toml");
        fs::write(&config_path, "").unwrap();

        let subdir = dir.path().join("docs/chapter");
        fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_config_file(&subdir).unwrap(), config_path);
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("omni.toml");
        fs::write(
            &config_path,
            r#"
input = "docs"
file_types = ["md"]
plugins = []

[aliases]
exp = "export"
"#,
        )
        .unwrap();

        let config = read_config_file(&config_path).unwrap();
        assert_eq!(config.input, PathBuf::from("docs"));
        assert_eq!(config.file_types, vec!["md"]);
        assert!(config.plugins.is_empty());
        assert_eq!(config.aliases.get("exp").map(String::as_str), Some("export"));
    }

    #[test]
    fn test_read_config_invalid() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("omni.toml");
        fs::write(&config_path, "file_types = 3").unwrap();

        let err = read_config_file(&config_path).unwrap_err();
        assert!(matches!(err, OmniError::TomlParse(_)));
    }

    #[test]
    fn test_read_config_default() {
        let dir = tempdir().unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }
}
