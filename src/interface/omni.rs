//! The orchestrator driving documents through the plugin pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::bus::{Event, EventBus, Handler, Outcome, Payload};
use crate::config::Config;
use crate::errors::{OmniError, Result};
use crate::io::{extension_pattern, glob_braced, FileSystem, RealFs};
use crate::model::{FileData, JSON_TYPE};
use crate::plugins::{builtin_plugins, plugin_by_name, Plugin};

/// Runs files through the stages `readFile`, `parseFile`, `parseConfig`,
/// `parseBlock` and `exportFile`, in that order.
///
/// All handlers are registered during construction. Processing borrows the
/// orchestrator immutably, so one instance can process any number of files.
#[derive(Debug)]
pub struct Omni {
    config: Arc<Config>,
    fs: Arc<dyn FileSystem>,
    bus: EventBus,
}

impl Omni {
    /// Creates an orchestrator on the real file system with the built-in and
    /// configured plugins.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_plugins(config, Arc::new(RealFs::new()), Vec::new())
    }

    /// Creates an orchestrator over `fs`.
    ///
    /// Plugins register in this order: built-ins, those named in
    /// `config.plugins`, then `plugins`. Fires `init` once all are registered.
    pub fn with_plugins(
        config: Config,
        fs: Arc<dyn FileSystem>,
        plugins: Vec<Box<dyn Plugin>>,
    ) -> Result<Self> {
        let config = Arc::new(config);

        let mut registered = builtin_plugins(&config, &fs);
        for name in &config.plugins {
            registered.push(plugin_by_name(name)?);
        }
        registered.extend(plugins);

        let mut bus = EventBus::new();
        for plugin in &registered {
            tracing::debug!("Registering plugin {}", plugin.name());
            plugin.register(&mut bus);
        }

        let omni = Self { config, fs, bus };
        omni.trigger(Event::Init, &mut Payload::Empty)?;
        Ok(omni)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the event bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Subscribes a handler after construction.
    pub fn on(&mut self, event: impl Into<Event>, handler: Handler) {
        self.bus.on(event, handler);
    }

    /// Unsubscribes a handler.
    pub fn off(&mut self, event: impl Into<Event>, handler: &Handler) {
        self.bus.off(event, handler);
    }

    /// Fires an event, returning the last defined handler result.
    pub fn trigger(
        &self,
        event: impl Into<Event>,
        payload: &mut Payload<'_>,
    ) -> Result<Option<Outcome>> {
        self.bus.trigger(&event.into(), payload)
    }

    /// Signals that watch mode started.
    pub fn watch(&self) -> Result<()> {
        self.trigger(Event::Watch, &mut Payload::Empty).map(|_| ())
    }

    /// Signals that watch mode stopped.
    pub fn unwatch(&self) -> Result<()> {
        self.trigger(Event::Unwatch, &mut Payload::Empty).map(|_| ())
    }

    /// Processes `path`, relative to the configured input directory.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<FileData> {
        self.process_file_at(&self.config.input, path.as_ref())
    }

    /// Processes `path`, relative to `root`, and returns the final state.
    ///
    /// The first handler error aborts the file; later stages do not run.
    pub fn process_file_at(&self, root: &Path, path: &Path) -> Result<FileData> {
        let data = FileData::new(root, path);
        let data = self.file_stage(Event::ReadFile, data)?;
        let mut data = self.file_stage(Event::ParseFile, data)?;

        if data.blocks.is_some() {
            self.resolve_blocks(&mut data)?;
        }

        self.trigger(Event::ExportFile, &mut Payload::File(&mut data))?;
        tracing::info!(
            "Processed {} ({} blocks, {} exports)",
            data.path.display(),
            data.block_count(),
            data.exports.len()
        );
        Ok(data)
    }

    /// Fires a file-level stage. A defined result replaces the file data.
    fn file_stage(&self, event: Event, mut data: FileData) -> Result<FileData> {
        tracing::debug!("{} {}", event, data.path.display());
        let outcome = self.trigger(event.clone(), &mut Payload::File(&mut data))?;
        match outcome {
            None => Ok(data),
            Some(Outcome::File(replacement)) => Ok(*replacement),
            Some(other) => Err(OmniError::UnexpectedOutcome {
                event: event.to_string(),
                outcome: other.kind(),
            }),
        }
    }

    /// Resolves config blocks first, then visits every block in document order.
    ///
    /// Blocks stay in `data` throughout; handlers address the current one
    /// by index and may inspect its siblings.
    fn resolve_blocks(&self, data: &mut FileData) -> Result<()> {
        let mut index = 0;
        while index < data.block_count() {
            if data.block(index).is_some_and(|b| b.directives.is_config()) {
                let mut payload = Payload::Block {
                    index,
                    data: &mut *data,
                };
                let outcome = self.trigger(Event::ParseConfig, &mut payload)?;
                match outcome {
                    Some(Outcome::Value(value)) if is_defined(&value) => {
                        if let Some(block) = data.block_mut(index) {
                            block.code = serde_json::to_string(&value)?;
                            block.language = JSON_TYPE.to_string();
                        }
                    }
                    None | Some(Outcome::Value(_)) => {}
                    Some(other) => {
                        return Err(OmniError::UnexpectedOutcome {
                            event: Event::ParseConfig.to_string(),
                            outcome: other.kind(),
                        })
                    }
                }
            }
            index += 1;
        }

        let mut index = 0;
        while index < data.block_count() {
            let mut payload = Payload::Block {
                index,
                data: &mut *data,
            };
            self.trigger(Event::ParseBlock, &mut payload)?;
            index += 1;
        }
        Ok(())
    }

    /// Returns the directory scanned for `subdir`.
    pub fn input_root(&self, subdir: Option<&Path>) -> PathBuf {
        match subdir {
            Some(subdir) => self.config.input.join(subdir),
            None => self.config.input.clone(),
        }
    }

    /// Lists documents below [`input_root`](Self::input_root), relative to it.
    pub fn source_files(&self, subdir: Option<&Path>) -> Result<Vec<PathBuf>> {
        let root = self.input_root(subdir);
        let pattern = root.join(extension_pattern(&self.config.file_types));
        let files = glob_braced(self.fs.as_ref(), &pattern.to_string_lossy())?;

        Ok(files
            .into_iter()
            .map(|file| {
                let relative = file.strip_prefix(&root).map(Path::to_path_buf).ok();
                relative.unwrap_or(file)
            })
            .collect())
    }

    /// Processes every document below `subdir`, stopping at the first
    /// failure. Returns the number of processed files.
    pub fn process_directory(&self, subdir: Option<&Path>) -> Result<usize> {
        let root = self.input_root(subdir);
        let files = self.source_files(subdir)?;
        tracing::debug!("Found {} documents in {}", files.len(), root.display());

        for path in &files {
            self.process_file_at(&root, path)?;
        }
        Ok(files.len())
    }
}

/// JSON counterpart of a truthy value: `null`, `false`, `0` and `""` leave
/// a config block untouched.
fn is_defined(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
