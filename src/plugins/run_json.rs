//! Merges `run` and `config` JSON blocks into the file data.

use serde_json::Value;

use crate::bus::{Event, EventBus};
use crate::errors::{OmniError, Result};
use crate::model::{Block, FileData};

use super::Plugin;

/// Deep-merges every top-level key of a JSON `run`/`config` block into the
/// matching `FileData` field during `parseBlock`.
///
/// Config blocks are already JSON by the time the block pass runs, so a
/// config block goes through here as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunJson;

impl RunJson {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for RunJson {
    fn name(&self) -> &str {
        "run-json"
    }

    fn register(&self, bus: &mut EventBus) {
        bus.on_fn(Event::ParseBlock, |payload| {
            let Some(block) = payload.block().filter(|b| applies(b)).cloned() else {
                return Ok(None);
            };
            if let Some(data) = payload.data() {
                run_json(&block, data)?;
            }
            Ok(None)
        });
    }
}

/// Returns true for JSON blocks marked `run` or `config`.
fn applies(block: &Block) -> bool {
    let directives = &block.directives;
    (directives.is_run() || directives.is_config()) && block.is_json()
}

/// Merges the top-level keys of a JSON block into `data`.
pub(crate) fn run_json(block: &Block, data: &mut FileData) -> Result<()> {
    let invalid = |message: String| OmniError::Directive {
        location: block.location.clone(),
        message,
    };

    let parsed: Value = serde_json::from_str(&block.code).map_err(|e| invalid(e.to_string()))?;
    let Value::Object(fields) = parsed else {
        return Err(invalid("expected a JSON object".to_string()));
    };

    for (key, value) in &fields {
        data.merge_field(key, value)
            .map_err(|e| invalid(e.to_string()))?;
    }
    tracing::debug!(
        "Merged {} keys from block at {}",
        fields.len(),
        block.location
    );
    Ok(())
}
