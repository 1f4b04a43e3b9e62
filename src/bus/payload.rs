//! Arguments passed to handlers and the values they may return.

use serde_json::Value;

use crate::model::{Block, FileData};

/// Arguments of one `trigger` call, shared by every handler of the event.
#[derive(Debug)]
pub enum Payload<'a> {
    /// Events without arguments (`init`, `watch`, `unwatch`).
    Empty,
    /// File-level stages (`readFile`, `parseFile`, `exportFile`).
    File(&'a mut FileData),
    /// Block-level stages (`parseConfig`, `parseBlock`).
    ///
    /// The block under resolution is `data.blocks[index]`; the rest of the
    /// file, other blocks included, stays reachable through `data`.
    Block { index: usize, data: &'a mut FileData },
}

impl Payload<'_> {
    /// Returns the file data, for both file and block stages.
    pub fn data(&mut self) -> Option<&mut FileData> {
        match self {
            Payload::Empty => None,
            Payload::File(data) => Some(&mut **data),
            Payload::Block { data, .. } => Some(&mut **data),
        }
    }

    /// Returns the block under resolution, for block stages only.
    pub fn block(&mut self) -> Option<&mut Block> {
        match self {
            Payload::Block { index, data } => data.block_mut(*index),
            _ => None,
        }
    }

    /// Returns the index of the block under resolution.
    pub fn index(&self) -> Option<usize> {
        match self {
            Payload::Block { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// A defined value returned by a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Replacement file data (`readFile`, `parseFile`).
    File(Box<FileData>),
    /// Resolved configuration value (`parseConfig`).
    Value(Value),
}

impl Outcome {
    /// Returns a short name of the variant for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::File(_) => "file",
            Outcome::Value(_) => "value",
        }
    }
}
