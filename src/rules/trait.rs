use crate::config::Lookup;
use crate::models::{Derivation, FileNameComponents};

/// Everything a rule may look at when deciding on a new name
pub struct RuleInput<'a> {
    /// The complete old basename
    pub name: &'a str,
    /// The old basename split into its parts
    pub components: &'a FileNameComponents,
    /// Extracted document text, for content rules
    pub content: Option<&'a str>,
    /// Private configuration values, if a configuration was loaded
    pub lookup: Option<&'a dyn Lookup>,
}

impl<'a> RuleInput<'a> {
    pub fn new(name: &'a str, components: &'a FileNameComponents) -> Self {
        Self {
            name,
            components,
            content: None,
            lookup: None,
        }
    }

    pub fn with_content(mut self, content: &'a str) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_lookup(mut self, lookup: Option<&'a dyn Lookup>) -> Self {
        self.lookup = lookup;
        self
    }

    /// Configuration value for `key`; `None` without configuration
    pub fn lookup(&self, key: &str) -> Option<&'a str> {
        self.lookup.and_then(|l| l.lookup(key))
    }

    pub fn temporal(&self) -> Option<&'a str> {
        self.components.temporal.as_deref()
    }
}

/// A recognizer paired with the builder of the new name
pub trait Rule: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// The new name if the rule recognizes the input
    fn apply(&self, input: &RuleInput<'_>) -> Option<Derivation>;
}
