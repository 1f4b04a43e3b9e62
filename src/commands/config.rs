//! Config command implementation.

use crate::config::Config;
use crate::errors::{OmniError, Result};

/// Renders the effective configuration as TOML.
pub fn render_config(config: &Config) -> Result<String> {
    toml::to_string_pretty(config)
        .map_err(|e| OmniError::Other(format!("Failed to serialize config: {}", e)))
}

/// Executes the config command -- prints the effective resolved configuration.
pub fn config(config: &Config) -> Result<()> {
    print!("{}", render_config(config)?);
    Ok(())
}
