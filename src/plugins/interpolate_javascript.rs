//! Closes exported scripts over the shared context.

use crate::bus::{Event, EventBus};

use super::Plugin;

/// Wraps exported script blocks during `parseBlock` so they run with the
/// current `_shared` context bound to a `_shared` parameter.
///
/// The context is embedded as a JSON literal, so merges made after a block
/// is wrapped do not reach it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpolateJavascript;

impl InterpolateJavascript {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for InterpolateJavascript {
    fn name(&self) -> &str {
        "interpolate-javascript"
    }

    fn register(&self, bus: &mut EventBus) {
        bus.on_fn(Event::ParseBlock, |payload| {
            let exported_script = payload
                .block()
                .is_some_and(|b| b.directives.is_export() && b.is_script());
            if !exported_script {
                return Ok(None);
            }

            let Some(shared) = payload.data().map(|d| d.shared_json()).transpose()? else {
                return Ok(None);
            };
            if let Some(block) = payload.block() {
                block.code = interpolate(&block.code, &shared);
            }
            Ok(None)
        });
    }
}

/// Wraps `code` in a self-invoking function applied to `shared_json`.
pub fn interpolate(code: &str, shared_json: &str) -> String {
    format!(";!function(_shared){{{}}}({});", code, shared_json)
}
