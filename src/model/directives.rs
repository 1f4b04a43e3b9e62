//! Directive annotations attached to code blocks.
//!
//! Directives are declared on the fence line after the block type, e.g.
//! `` ```json run `` or `` ```js export=bundle.js ``. The known kinds get typed
//! accessors; anything else is kept under [`Directive::Other`] so plugins can
//! introduce new directives without touching this module.

use std::fmt;

use indexmap::IndexMap;

/// A directive name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Emit the block as (part of) an output file.
    Export,
    /// Evaluate the block during block resolution.
    Run,
    /// Treat the block as configuration for the document.
    Config,
    /// Any directive without dedicated handling.
    Other(String),
}

impl Directive {
    /// Returns the name as written in documents.
    pub fn as_str(&self) -> &str {
        match self {
            Directive::Export => "export",
            Directive::Run => "run",
            Directive::Config => "config",
            Directive::Other(name) => name,
        }
    }
}

impl From<&str> for Directive {
    fn from(name: &str) -> Self {
        match name {
            "export" => Directive::Export,
            "run" => Directive::Run,
            "config" => Directive::Config,
            other => Directive::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value carried by a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
    /// A bare flag such as `export`.
    Flag(bool),
    /// A keyed value such as `export=out.js`.
    Text(String),
}

impl DirectiveValue {
    /// Returns whether the value enables its directive.
    pub fn is_truthy(&self) -> bool {
        match self {
            DirectiveValue::Flag(b) => *b,
            DirectiveValue::Text(s) => !s.is_empty(),
        }
    }

    /// Returns the text value, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DirectiveValue::Text(s) => Some(s),
            DirectiveValue::Flag(_) => None,
        }
    }
}

/// Ordered directive set of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    items: IndexMap<Directive, DirectiveValue>,
}

impl Directives {
    /// Creates an empty directive set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set of enabled flags.
    pub fn flags<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut directives = Self::new();
        for name in names {
            directives.set(Directive::from(name), DirectiveValue::Flag(true));
        }
        directives
    }

    /// Sets a directive, replacing an existing value in place.
    pub fn set(&mut self, directive: Directive, value: DirectiveValue) {
        self.items.insert(directive, value);
    }

    /// Returns the value of a directive.
    pub fn get(&self, directive: &Directive) -> Option<&DirectiveValue> {
        self.items.get(directive)
    }

    /// Removes a directive, keeping the order of the rest.
    pub fn remove(&mut self, directive: &Directive) -> Option<DirectiveValue> {
        self.items.shift_remove(directive)
    }

    /// Returns true if the directive is present and truthy.
    pub fn is_set(&self, directive: &Directive) -> bool {
        self.get(directive).is_some_and(DirectiveValue::is_truthy)
    }

    /// Returns true if the block is exported.
    pub fn is_export(&self) -> bool {
        self.is_set(&Directive::Export)
    }

    /// Returns true if the block is run.
    pub fn is_run(&self) -> bool {
        self.is_set(&Directive::Run)
    }

    /// Returns true if the block is configuration.
    pub fn is_config(&self) -> bool {
        self.is_set(&Directive::Config)
    }

    /// Returns the explicit export target, as in `export=out.js`.
    pub fn export_target(&self) -> Option<&str> {
        self.get(&Directive::Export)
            .and_then(DirectiveValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// Renames `from` to `to`. Returns false when `from` is absent or `to`
    /// is already declared, in which case nothing changes.
    pub fn rename(&mut self, from: &Directive, to: Directive) -> bool {
        if self.items.contains_key(&to) {
            return false;
        }
        match self.items.get_index_of(from) {
            Some(index) => {
                let value = self.items[index].clone();
                self.items.shift_remove_index(index);
                self.items.shift_insert(index, to, value);
                true
            }
            None => false,
        }
    }

    /// Iterates over directives in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Directive, &DirectiveValue)> {
        self.items.iter()
    }

    /// Returns the number of directives.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no directives.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(Directive::from("export"), Directive::Export);
        assert_eq!(Directive::from("run"), Directive::Run);
        assert_eq!(Directive::from("config"), Directive::Config);
        assert_eq!(
            Directive::from("hidden"),
            Directive::Other("hidden".to_string())
        );
        assert_eq!(Directive::Other("hidden".to_string()).to_string(), "hidden");
    }

    #[test]
    fn test_typed_accessors() {
        let directives = Directives::flags(["export", "run"]);
        assert!(directives.is_export());
        assert!(directives.is_run());
        assert!(!directives.is_config());
    }

    #[test]
    fn test_false_flag_is_not_set() {
        let mut directives = Directives::new();
        directives.set(Directive::Config, DirectiveValue::Flag(false));
        assert!(!directives.is_config());
        assert_eq!(directives.len(), 1);
    }

    #[test]
    fn test_export_target() {
        let mut directives = Directives::new();
        directives.set(Directive::Export, DirectiveValue::Text("app.js".to_string()));
        assert!(directives.is_export());
        assert_eq!(directives.export_target(), Some("app.js"));

        let flags = Directives::flags(["export"]);
        assert_eq!(flags.export_target(), None);
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut directives = Directives::flags(["hidden", "exp", "run"]);
        assert!(directives.rename(&Directive::from("exp"), Directive::Export));

        let names: Vec<&str> = directives.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(names, vec!["hidden", "export", "run"]);
    }

    #[test]
    fn test_rename_does_not_clobber() {
        let mut directives = Directives::flags(["exp", "export"]);
        directives.set(Directive::Export, DirectiveValue::Text("keep.js".to_string()));

        assert!(!directives.rename(&Directive::from("exp"), Directive::Export));
        assert_eq!(directives.export_target(), Some("keep.js"));
        assert!(!directives.rename(&Directive::from("missing"), Directive::Run));
    }
}
