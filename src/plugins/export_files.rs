//! Writes mapped exports to disk.

use std::sync::Arc;

use crate::bus::{Event, EventBus};
use crate::io::FileSystem;

use super::Plugin;

/// Writes every entry of `FileData::exports` during `exportFile`.
#[derive(Debug, Clone)]
pub struct ExportFiles {
    fs: Arc<dyn FileSystem>,
    dry_run: bool,
}

impl ExportFiles {
    /// Creates the plugin. With `dry_run` the writes are only logged.
    pub fn new(fs: Arc<dyn FileSystem>, dry_run: bool) -> Self {
        Self { fs, dry_run }
    }
}

impl Plugin for ExportFiles {
    fn name(&self) -> &str {
        "export-files"
    }

    fn register(&self, bus: &mut EventBus) {
        let fs = Arc::clone(&self.fs);
        let dry_run = self.dry_run;
        bus.on_fn(Event::ExportFile, move |payload| {
            let Some(data) = payload.data() else {
                return Ok(None);
            };
            for (path, content) in &data.exports {
                if dry_run {
                    tracing::warn!("Would write {}", path.display());
                    continue;
                }
                fs.write(path, content)?;
                tracing::info!("Wrote {}", path.display());
            }
            Ok(None)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Payload;
    use crate::io::VirtualFs;
    use crate::model::FileData;
    use std::path::PathBuf;

    fn export(vfs: &Arc<VirtualFs>, dry_run: bool) {
        let mut bus = EventBus::new();
        let fs: Arc<dyn FileSystem> = vfs.clone();
        ExportFiles::new(fs, dry_run).register(&mut bus);

        let mut data = FileData::new(".", "a.md");
        data.exports
            .insert(PathBuf::from("dist/a.js"), "run()".to_string());
        data.exports
            .insert(PathBuf::from("dist/a.css"), "p{}".to_string());
        bus.trigger(&Event::ExportFile, &mut Payload::File(&mut data))
            .unwrap();
    }

    #[test]
    fn test_writes_exports() {
        let vfs = Arc::new(VirtualFs::new());
        export(&vfs, false);

        assert_eq!(vfs.get("dist/a.js"), Some("run()".to_string()));
        assert_eq!(vfs.get("dist/a.css"), Some("p{}".to_string()));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let vfs = Arc::new(VirtualFs::new());
        export(&vfs, true);

        assert!(vfs.list_files().is_empty());
    }
}
