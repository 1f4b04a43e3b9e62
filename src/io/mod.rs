//! File system access for the pipeline.

mod braces;
mod file_system;

pub use braces::{expand_braces, extension_pattern, glob_braced};
pub use file_system::{FileSystem, RealFs, VirtualFs};
