//! Plugins attach behaviour to the pipeline by subscribing to bus events.
//!
//! Every plugin is registered exactly once, when the orchestrator is built.
//! Built-in plugins come first, in a fixed order, so that plugins added by
//! users see files that are already read, parsed and resolved by them:
//!
//! | plugin              | events                        |
//! |---------------------|-------------------------------|
//! | `read-files`        | `readFile`                    |
//! | `run-json`          | `parseBlock`                  |
//! | `config-formats`    | `parseConfig`                 |
//! | `extract-code`      | `parseFile`                   |
//! | `export-map`        | `exportFile`                  |
//! | `watch`             | `watch`, `unwatch`            |
//! | `export-files`      | `exportFile`                  |
//! | `directive-aliases` | `parseFile`                   |
//!
//! `interpolate-javascript` is not a built-in; it is enabled by name through
//! [`Config::plugins`](crate::config::Config::plugins).

mod config_formats;
mod directive_aliases;
mod export_files;
mod export_map;
mod extract_code;
mod interpolate_javascript;
mod read_files;
mod run_json;
mod watch;

pub use config_formats::ConfigFormats;
pub use directive_aliases::DirectiveAliases;
pub use export_files::ExportFiles;
pub use export_map::{extension_for, ExportMap};
pub use extract_code::ExtractCode;
pub use interpolate_javascript::{interpolate, InterpolateJavascript};
pub use read_files::ReadFiles;
pub use run_json::RunJson;
pub use watch::WatchLog;

use std::sync::Arc;

use crate::bus::EventBus;
use crate::config::Config;
use crate::errors::{OmniError, Result};
use crate::io::FileSystem;

/// An extension of the pipeline.
pub trait Plugin: Send + Sync {
    /// Returns the name of this plugin.
    fn name(&self) -> &str;

    /// Subscribes the plugin's handlers. Called once per orchestrator.
    fn register(&self, bus: &mut EventBus);
}

/// A plugin made from a closure.
pub struct FnPlugin<F> {
    name: String,
    register: F,
}

/// Wraps a registration closure as a plugin.
pub fn plugin_fn<F>(name: impl Into<String>, register: F) -> FnPlugin<F>
where
    F: Fn(&mut EventBus) + Send + Sync,
{
    FnPlugin {
        name: name.into(),
        register,
    }
}

impl<F> Plugin for FnPlugin<F>
where
    F: Fn(&mut EventBus) + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, bus: &mut EventBus) {
        (self.register)(bus);
    }
}

/// Returns the built-in plugins in registration order.
pub fn builtin_plugins(config: &Arc<Config>, fs: &Arc<dyn FileSystem>) -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(ReadFiles::new(Arc::clone(fs))),
        Box::new(RunJson::new()),
        Box::new(ConfigFormats::new()),
        Box::new(ExtractCode::new()),
        Box::new(ExportMap::new(config.output.clone())),
        Box::new(WatchLog::new(config.input.clone())),
        Box::new(ExportFiles::new(Arc::clone(fs), config.dry_run)),
        Box::new(DirectiveAliases::new(&config.aliases)),
    ]
}

/// Looks up an optional plugin by the name used in configuration files.
pub fn plugin_by_name(name: &str) -> Result<Box<dyn Plugin>> {
    match name {
        "interpolate-javascript" => Ok(Box::new(InterpolateJavascript::new())),
        other => Err(OmniError::UnknownPlugin(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Event;
    use crate::io::VirtualFs;

    #[test]
    fn test_builtin_order() {
        let config = Arc::new(Config::default());
        let fs: Arc<dyn FileSystem> = Arc::new(VirtualFs::new());

        let names: Vec<String> = builtin_plugins(&config, &fs)
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "read-files",
                "run-json",
                "config-formats",
                "extract-code",
                "export-map",
                "watch",
                "export-files",
                "directive-aliases",
            ]
        );
    }

    #[test]
    fn test_plugin_by_name() {
        let plugin = plugin_by_name("interpolate-javascript").unwrap();
        assert_eq!(plugin.name(), "interpolate-javascript");

        let err = plugin_by_name("minify").err().unwrap();
        assert!(matches!(err, OmniError::UnknownPlugin(name) if name == "minify"));
    }

    #[test]
    fn test_fn_plugin() {
        let plugin = plugin_fn("noop", |bus: &mut EventBus| {
            bus.on_fn("custom", |_| Ok(None));
        });
        let mut bus = EventBus::new();
        plugin.register(&mut bus);

        assert_eq!(plugin.name(), "noop");
        assert_eq!(bus.listener_count(&Event::from("custom")), 1);
    }
}
