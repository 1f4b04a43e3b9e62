//! Renames directive aliases to their canonical names.

use indexmap::IndexMap;

use crate::bus::{Event, EventBus};
use crate::model::Directive;

use super::Plugin;

/// Rewrites aliased directives on every block during `parseFile`.
///
/// Registered after block extraction, so the blocks are already present.
/// An alias never replaces a canonical directive written out explicitly.
#[derive(Debug, Clone)]
pub struct DirectiveAliases {
    aliases: Vec<(Directive, Directive)>,
}

impl DirectiveAliases {
    /// Creates the plugin from an `alias -> canonical` table.
    pub fn new(aliases: &IndexMap<String, String>) -> Self {
        let aliases = aliases
            .iter()
            .map(|(alias, canonical)| {
                (Directive::from(alias.as_str()), Directive::from(canonical.as_str()))
            })
            .collect();
        Self { aliases }
    }
}

impl Plugin for DirectiveAliases {
    fn name(&self) -> &str {
        "directive-aliases"
    }

    fn register(&self, bus: &mut EventBus) {
        if self.aliases.is_empty() {
            return;
        }
        let aliases = self.aliases.clone();
        bus.on_fn(Event::ParseFile, move |payload| {
            let Some(blocks) = payload.data().and_then(|data| data.blocks.as_mut()) else {
                return Ok(None);
            };
            for block in blocks.iter_mut() {
                for (alias, canonical) in &aliases {
                    if block.directives.rename(alias, canonical.clone()) {
                        tracing::trace!(
                            "{}: {} -> {}",
                            block.location,
                            alias.as_str(),
                            canonical.as_str()
                        );
                    }
                }
            }
            Ok(None)
        });
    }
}
