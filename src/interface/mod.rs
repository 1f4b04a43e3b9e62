//! High-level interface for running documents through the pipeline.

mod omni;

pub use omni::Omni;
