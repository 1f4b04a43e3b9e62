//! Per-file pipeline state.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::block::Block;
use super::merge::deep_merge;
use crate::errors::{OmniError, Result};

/// Name of the shared context field as addressed from JSON blocks.
pub const SHARED_FIELD: &str = "_shared";

/// Data threaded through every stage of one file's pipeline.
///
/// A fresh value is created for every processed file; nothing here outlives
/// a single `process_file` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileData {
    /// Directory `path` is relative to.
    pub root: PathBuf,
    /// The file's identity within the source tree.
    pub path: PathBuf,
    /// Raw file text, filled in by `readFile` handlers.
    pub contents: String,
    /// Blocks in document order, filled in by `parseFile` handlers.
    pub blocks: Option<Vec<Block>>,
    /// Accumulated shared context (`_shared`).
    pub shared: Map<String, Value>,
    /// Any other top-level fields written by JSON blocks.
    pub fields: Map<String, Value>,
    /// Output path to content, filled in during `exportFile`.
    pub exports: IndexMap<PathBuf, String>,
}

impl FileData {
    /// Creates the initial state for a file.
    pub fn new(root: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Returns the path on disk (`root` joined with `path`).
    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.path)
    }

    /// Returns the relative path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of extracted blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.as_ref().map_or(0, Vec::len)
    }

    /// Returns the block at `index`.
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.as_ref()?.get(index)
    }

    /// Returns the block at `index` for rewriting.
    pub fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.as_mut()?.get_mut(index)
    }

    /// Serializes the shared context as a JSON object literal.
    pub fn shared_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.shared)?)
    }

    /// Reads a top-level field by its JSON name.
    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            SHARED_FIELD => Some(Value::Object(self.shared.clone())),
            "path" => Some(Value::String(self.path.to_string_lossy().into_owned())),
            "contents" => Some(Value::String(self.contents.clone())),
            _ => self.fields.get(key).cloned(),
        }
    }

    /// Deep-merges `value` into the top-level field `key`.
    ///
    /// `_shared` must stay an object, `path` and `contents` only accept
    /// strings, and `root`, `blocks` and `exports` are owned by the pipeline.
    pub fn merge_field(&mut self, key: &str, value: &Value) -> Result<()> {
        match key {
            SHARED_FIELD => {
                let current = Value::Object(std::mem::take(&mut self.shared));
                match deep_merge(Some(&current), value) {
                    Value::Object(merged) => {
                        self.shared = merged;
                        Ok(())
                    }
                    _ => {
                        if let Value::Object(previous) = current {
                            self.shared = previous;
                        }
                        Err(OmniError::ReservedField(key.to_string()))
                    }
                }
            }
            "path" | "contents" => {
                let Value::String(text) = value else {
                    return Err(OmniError::ReservedField(key.to_string()));
                };
                if key == "path" {
                    self.path = PathBuf::from(text);
                } else {
                    self.contents = text.clone();
                }
                Ok(())
            }
            "root" | "blocks" | "exports" => Err(OmniError::ReservedField(key.to_string())),
            _ => {
                let merged = deep_merge(self.fields.get(key), value);
                self.fields.insert(key.to_string(), merged);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_is_empty() {
        let data = FileData::new("docs", "guide.md");
        assert_eq!(data.source_path(), PathBuf::from("docs/guide.md"));
        assert!(data.contents.is_empty());
        assert!(data.blocks.is_none());
        assert!(data.shared.is_empty());
        assert_eq!(data.block_count(), 0);
    }

    #[test]
    fn test_merge_open_field() {
        let mut data = FileData::new(".", "a.md");
        data.merge_field("title", &json!("Hi")).unwrap();
        data.merge_field("meta", &json!({"tags": ["x"]})).unwrap();
        data.merge_field("meta", &json!({"tags": ["y"], "draft": true}))
            .unwrap();

        assert_eq!(data.field("title"), Some(json!("Hi")));
        assert_eq!(
            data.field("meta"),
            Some(json!({"tags": ["x", "y"], "draft": true}))
        );
    }

    #[test]
    fn test_merge_shared() {
        let mut data = FileData::new(".", "a.md");
        data.merge_field(SHARED_FIELD, &json!({"db": {"host": "localhost"}}))
            .unwrap();
        data.merge_field(SHARED_FIELD, &json!({"db": {"port": 5432}}))
            .unwrap();

        assert_eq!(
            Value::Object(data.shared.clone()),
            json!({"db": {"host": "localhost", "port": 5432}})
        );
        assert_eq!(data.shared_json().unwrap(), r#"{"db":{"host":"localhost","port":5432}}"#);
    }

    #[test]
    fn test_shared_must_stay_object() {
        let mut data = FileData::new(".", "a.md");
        data.merge_field(SHARED_FIELD, &json!({"k": 1})).unwrap();

        let err = data.merge_field(SHARED_FIELD, &json!(5)).unwrap_err();
        assert!(matches!(err, OmniError::ReservedField(_)));
        assert_eq!(data.shared.get("k"), Some(&json!(1)));
    }

    #[test]
    fn test_string_fields() {
        let mut data = FileData::new(".", "a.md");
        data.merge_field("contents", &json!("replaced")).unwrap();
        assert_eq!(data.contents, "replaced");

        assert!(data.merge_field("path", &json!(1)).is_err());
        assert!(data.merge_field("blocks", &json!([])).is_err());
        assert_eq!(data.path(), Path::new("a.md"));
    }
}
