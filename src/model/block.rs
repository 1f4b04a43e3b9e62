//! Code block representation.

use super::directives::Directives;
use crate::text_location::TextLocation;

/// Type tag of JSON blocks.
pub const JSON_TYPE: &str = "json";

/// Type tags that denote JavaScript.
pub const SCRIPT_TYPES: &[&str] = &["js", "javascript", "es6"];

/// A code block extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The fence type tag (e.g. "json", "js"). Empty for untyped fences.
    pub language: String,

    /// The source text. Plugins rewrite it in place.
    pub code: String,

    /// Directives declared on the fence.
    pub directives: Directives,

    /// Location of the opening fence.
    pub location: TextLocation,
}

impl Block {
    /// Creates a new block without directives.
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
            directives: Directives::new(),
            location: TextLocation::default(),
        }
    }

    /// Sets the directives.
    pub fn with_directives(mut self, directives: Directives) -> Self {
        self.directives = directives;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: TextLocation) -> Self {
        self.location = location;
        self
    }

    /// Returns true if the block holds JSON.
    pub fn is_json(&self) -> bool {
        self.language == JSON_TYPE
    }

    /// Returns true if the block holds JavaScript.
    pub fn is_script(&self) -> bool {
        SCRIPT_TYPES.contains(&self.language.as_str())
    }
}
