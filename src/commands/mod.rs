//! Command implementations behind the `omni` binary.

pub mod build;
pub mod config;
pub mod watch;

pub use build::{build, BuildOptions, BuildReport};
pub use config::{config, render_config};
pub use watch::{watch, ChangeFilter, WatchOptions};
