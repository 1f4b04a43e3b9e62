//! Pipeline event labels.

use std::fmt;

/// A named point in the pipeline at which handlers run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    /// Fired once after all plugins are registered.
    Init,
    /// Fill in `FileData::contents`.
    ReadFile,
    /// Fill in `FileData::blocks`.
    ParseFile,
    /// Resolve a `config` block into a JSON value.
    ParseConfig,
    /// Resolve directives of a single block.
    ParseBlock,
    /// Emit the derived artifacts of a file.
    ExportFile,
    /// Start watching the source tree.
    Watch,
    /// Stop watching the source tree.
    Unwatch,
    /// Event introduced by a plugin.
    Custom(String),
}

impl Event {
    /// Returns the label of this event.
    pub fn as_str(&self) -> &str {
        match self {
            Event::Init => "init",
            Event::ReadFile => "readFile",
            Event::ParseFile => "parseFile",
            Event::ParseConfig => "parseConfig",
            Event::ParseBlock => "parseBlock",
            Event::ExportFile => "exportFile",
            Event::Watch => "watch",
            Event::Unwatch => "unwatch",
            Event::Custom(label) => label,
        }
    }
}

impl From<&str> for Event {
    fn from(label: &str) -> Self {
        match label {
            "init" => Event::Init,
            "readFile" => Event::ReadFile,
            "parseFile" => Event::ParseFile,
            "parseConfig" => Event::ParseConfig,
            "parseBlock" => Event::ParseBlock,
            "exportFile" => Event::ExportFile,
            "watch" => Event::Watch,
            "unwatch" => Event::Unwatch,
            other => Event::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for event in [
            Event::Init,
            Event::ReadFile,
            Event::ParseFile,
            Event::ParseConfig,
            Event::ParseBlock,
            Event::ExportFile,
            Event::Watch,
            Event::Unwatch,
        ] {
            assert_eq!(Event::from(event.as_str()), event);
        }
    }

    #[test]
    fn test_custom_label() {
        let event = Event::from("lint");
        assert_eq!(event, Event::Custom("lint".to_string()));
        assert_eq!(event.to_string(), "lint");
    }
}
