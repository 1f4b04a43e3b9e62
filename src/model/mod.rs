//! Core model types for Omni.

mod block;
mod directives;
mod file_data;
mod merge;

pub use block::{Block, JSON_TYPE, SCRIPT_TYPES};
pub use directives::{Directive, DirectiveValue, Directives};
pub use file_data::{FileData, SHARED_FIELD};
pub use merge::deep_merge;
