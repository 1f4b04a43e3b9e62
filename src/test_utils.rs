//! Shared test utilities.

use std::sync::Arc;

use crate::config::Config;
use crate::interface::Omni;
use crate::io::VirtualFs;

/// Returns a configuration reading from `docs` and writing to `dist`.
pub fn test_config() -> Config {
    Config {
        input: "docs".into(),
        output: "dist".into(),
        ..Config::default()
    }
}

/// Builds an orchestrator over an in-memory file system seeded with `files`.
pub fn test_omni(files: &[(&str, &str)]) -> (Omni, Arc<VirtualFs>) {
    let vfs = Arc::new(VirtualFs::new());
    for (path, content) in files {
        vfs.add_file(*path, *content);
    }
    let omni = Omni::with_plugins(test_config(), vfs.clone(), Vec::new())
        .expect("test orchestrator");
    (omni, vfs)
}
