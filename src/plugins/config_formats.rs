//! Resolves TOML and YAML config blocks.

use serde_json::Value;

use crate::bus::{Event, EventBus, Outcome};
use crate::errors::{OmniError, Result};
use crate::model::Block;

use super::Plugin;

/// Answers `parseConfig` for `toml`, `yaml` and `yml` blocks with the parsed
/// object, which the orchestrator then stores back as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigFormats;

impl ConfigFormats {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ConfigFormats {
    fn name(&self) -> &str {
        "config-formats"
    }

    fn register(&self, bus: &mut EventBus) {
        bus.on_fn(Event::ParseConfig, |payload| {
            let Some(block) = payload.block() else {
                return Ok(None);
            };
            Ok(parse_config(block)?.map(Outcome::Value))
        });
    }
}

fn parse_config(block: &Block) -> Result<Option<Value>> {
    let parsed: Value = match block.language.as_str() {
        "toml" => toml::from_str(&block.code)?,
        "yaml" | "yml" => serde_yaml::from_str(&block.code)?,
        _ => return Ok(None),
    };

    match parsed {
        Value::Object(_) => Ok(Some(parsed)),
        // An empty YAML document.
        Value::Null => Ok(None),
        _ => Err(OmniError::Directive {
            location: block.location.clone(),
            message: format!("{} config must be a mapping", block.language),
        }),
    }
}
