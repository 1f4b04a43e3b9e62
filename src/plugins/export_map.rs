//! Maps exported blocks to output files.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;

use crate::bus::{Event, EventBus};
use crate::errors::{OmniError, Result};
use crate::model::{Block, SCRIPT_TYPES};

use super::Plugin;

/// Computes `FileData::exports` during `exportFile`.
///
/// An `export=target` directive names a path under `output`; a bare
/// `export` flag mirrors the document's path with the block type's
/// extension. Blocks sharing a target are joined in document order. A
/// target that is absolute or climbs out of `output` is an error.
#[derive(Debug, Clone)]
pub struct ExportMap {
    output: PathBuf,
}

impl ExportMap {
    /// Creates the plugin writing below `output`.
    pub fn new(output: PathBuf) -> Self {
        Self { output }
    }

    fn target(&self, block: &Block, document: &Path) -> Result<PathBuf> {
        let relative = match block.directives.export_target() {
            Some(target) => PathBuf::from(target),
            None => document.with_extension(extension_for(&block.language)),
        };
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained || relative.as_os_str().is_empty() {
            return Err(OmniError::Directive {
                location: block.location.clone(),
                message: format!(
                    "export target `{}` is outside the output directory",
                    relative.display()
                ),
            });
        }
        Ok(self.output.join(relative))
    }
}

/// Returns the file extension used for blocks of `language`.
pub fn extension_for(language: &str) -> &str {
    if SCRIPT_TYPES.contains(&language) {
        "js"
    } else if language.is_empty() {
        "txt"
    } else {
        language
    }
}

impl Plugin for ExportMap {
    fn name(&self) -> &str {
        "export-map"
    }

    fn register(&self, bus: &mut EventBus) {
        let this = self.clone();
        bus.on_fn(Event::ExportFile, move |payload| {
            let Some(data) = payload.data() else {
                return Ok(None);
            };
            let Some(blocks) = &data.blocks else {
                return Ok(None);
            };

            let mut chunks: IndexMap<PathBuf, Vec<&str>> = IndexMap::new();
            for block in blocks.iter().filter(|b| b.directives.is_export()) {
                chunks
                    .entry(this.target(block, &data.path)?)
                    .or_default()
                    .push(&block.code);
            }

            let exports: Vec<(PathBuf, String)> = chunks
                .into_iter()
                .map(|(path, parts)| (path, parts.join("\n")))
                .collect();
            for (path, content) in exports {
                tracing::debug!("Mapped export {}", path.display());
                data.exports.insert(path, content);
            }
            Ok(None)
        });
    }
}
