//! Watch command implementation.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use glob::Pattern;
use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::Config;
use crate::errors::{OmniError, Result};
use crate::interface::Omni;

/// Options for the watch command.
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// Debounce delay in milliseconds; 0 uses the configured value.
    pub debounce_ms: u64,
}

/// Decides which changed paths are documents to rebuild.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    root: PathBuf,
    output: PathBuf,
    config: Config,
    exclude: Vec<Pattern>,
}

impl ChangeFilter {
    /// Builds a filter for documents below `root`.
    pub fn new(root: PathBuf, config: &Config) -> Result<Self> {
        let exclude = config
            .watch
            .exclude
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            root,
            output: config.output.clone(),
            config: config.clone(),
            exclude,
        })
    }

    /// Returns the path relative to the root if a change to `path` should
    /// trigger a rebuild.
    pub fn relevant(&self, path: &Path) -> Option<PathBuf> {
        if path.starts_with(&self.output) {
            return None;
        }
        let relative = path.strip_prefix(&self.root).ok()?;
        let ext = relative.extension()?.to_str()?;
        if !self.config.is_document_type(ext) {
            return None;
        }
        if self.exclude.iter().any(|p| p.matches_path(relative)) {
            return None;
        }
        Some(relative.to_path_buf())
    }
}

/// Executes the watch command.
///
/// Builds everything once, then rebuilds each changed document until the
/// watcher shuts down.
pub fn watch(omni: &Omni, options: WatchOptions) -> Result<()> {
    let config = omni.config();
    let debounce = if options.debounce_ms > 0 {
        options.debounce_ms
    } else {
        config.watch.debounce_ms
    };

    if let Err(e) = omni.process_directory(None) {
        tracing::error!("Initial build error: {}", e);
    }

    // Notifications carry canonical paths.
    let root = fs::canonicalize(&config.input)?;
    let filter = ChangeFilter::new(root.clone(), config)?;
    let filter = match fs::canonicalize(&config.output) {
        Ok(output) => ChangeFilter { output, ..filter },
        Err(_) => filter,
    };

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        NotifyConfig::default().with_poll_interval(Duration::from_millis(debounce)),
    )
    .map_err(|e| OmniError::Watch(e.to_string()))?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| OmniError::Watch(e.to_string()))?;
    omni.watch()?;
    tracing::info!("Debounce {}ms, press Ctrl+C to stop", debounce);

    while let Ok(event) = rx.recv() {
        if !(event.kind.is_create() || event.kind.is_modify()) {
            continue;
        }
        let changed: BTreeSet<PathBuf> = event
            .paths
            .iter()
            .filter_map(|p| filter.relevant(p))
            .collect();

        for path in changed {
            tracing::debug!("File changed: {}", path.display());
            if let Err(e) = omni.process_file_at(&root, &path) {
                tracing::error!("{}: {}", path.display(), e);
            }
        }
    }

    omni.unwatch()
}
