//! Watch-mode transitions.

use std::path::PathBuf;

use crate::bus::{Event, EventBus};

use super::Plugin;

/// Logs `watch` and `unwatch`. Filesystem notifications are delivered by
/// the `watch` command, which drives the orchestrator.
#[derive(Debug, Clone)]
pub struct WatchLog {
    input: PathBuf,
}

impl WatchLog {
    pub fn new(input: PathBuf) -> Self {
        Self { input }
    }
}

impl Plugin for WatchLog {
    fn name(&self) -> &str {
        "watch"
    }

    fn register(&self, bus: &mut EventBus) {
        let input = self.input.clone();
        bus.on_fn(Event::Watch, move |_| {
            tracing::info!("Watching {} for changes", input.display());
            Ok(None)
        });
        let input = self.input.clone();
        bus.on_fn(Event::Unwatch, move |_| {
            tracing::info!("Stopped watching {}", input.display());
            Ok(None)
        });
    }
}
