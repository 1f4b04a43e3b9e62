//! Extracts fenced blocks from document contents.

use crate::bus::{Event, EventBus};
use crate::readers::parse_blocks;

use super::Plugin;

/// Fills `FileData::blocks` during `parseFile`.
///
/// Documents without fences keep `blocks` unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractCode;

impl ExtractCode {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ExtractCode {
    fn name(&self) -> &str {
        "extract-code"
    }

    fn register(&self, bus: &mut EventBus) {
        bus.on_fn(Event::ParseFile, |payload| {
            let Some(data) = payload.data() else {
                return Ok(None);
            };
            let blocks = parse_blocks(&data.contents, Some(data.path.as_path()))?;
            tracing::debug!("Extracted {} blocks from {}", blocks.len(), data.path.display());
            if !blocks.is_empty() {
                data.blocks = Some(blocks);
            }
            Ok(None)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Payload;
    use crate::model::FileData;

    fn parse(contents: &str) -> FileData {
        let mut bus = EventBus::new();
        ExtractCode::new().register(&mut bus);

        let mut data = FileData::new(".", "doc.md");
        data.contents = contents.to_string();
        bus.trigger(&Event::ParseFile, &mut Payload::File(&mut data))
            .unwrap();
        data
    }

    #[test]
    fn test_populates_blocks() {
        let data = parse("```json run\n{}\n```\n\n```js export\nx = 1\n```\n");
        let blocks = data.blocks.unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language, "json");
        assert_eq!(blocks[1].code, "x = 1");
    }

    #[test]
    fn test_no_fences_leaves_blocks_unset() {
        let data = parse("Only prose here.\n");
        assert!(data.blocks.is_none());
    }
}
