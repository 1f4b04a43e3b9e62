//! Omni - literate document pipeline
//!
//! Omni reads documents with fenced code blocks, resolves the blocks'
//! directives through a chain of event-driven plugins and writes the
//! derived files.
//!
//! # Pipeline
//!
//! Each file passes through these events, in order:
//!
//! - **readFile**: load the document text
//! - **parseFile**: extract the fenced blocks
//! - **parseConfig**: resolve every `config` block into JSON
//! - **parseBlock**: apply directives (`run`, `config`, `export`) block by block
//! - **exportFile**: map exported blocks to output files and write them
//!
//! Plugins subscribe handlers to these events; the orchestrator only decides
//! the order and whether a handler's result replaces the current state.
//!
//! # Example
//!
//! ```no_run
//! use omni::{Config, Omni};
//!
//! let omni = Omni::new(Config::default()).unwrap();
//! omni.process_directory(None).unwrap();
//! ```

pub mod bus;
pub mod commands;
pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod plugins;
pub mod readers;
pub mod text_location;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use bus::{Event, EventBus, Handler, Outcome, Payload};
pub use config::Config;
pub use errors::{OmniError, Result};
pub use interface::Omni;
pub use model::{Block, Directive, DirectiveValue, Directives, FileData};
pub use plugins::{plugin_fn, Plugin};

// Re-export command options
pub use commands::{BuildOptions, WatchOptions};
