//! Reads document contents.

use std::sync::Arc;

use crate::bus::{Event, EventBus};
use crate::io::FileSystem;

use super::Plugin;

/// Fills `FileData::contents` from `root/path` during `readFile`.
#[derive(Debug, Clone)]
pub struct ReadFiles {
    fs: Arc<dyn FileSystem>,
}

impl ReadFiles {
    /// Creates the plugin over a file system.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Plugin for ReadFiles {
    fn name(&self) -> &str {
        "read-files"
    }

    fn register(&self, bus: &mut EventBus) {
        let fs = Arc::clone(&self.fs);
        bus.on_fn(Event::ReadFile, move |payload| {
            if let Some(data) = payload.data() {
                let path = data.source_path();
                data.contents = fs.read(&path)?;
                tracing::debug!("Read {} ({} bytes)", path.display(), data.contents.len());
            }
            Ok(None)
        });
    }
}
