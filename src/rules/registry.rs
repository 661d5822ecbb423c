use crate::charge::Charge;
use crate::models::Derivation;
use crate::rules::{Rule, RuleInput};
use crate::template::Template;
use regex::Regex;
use std::sync::Arc;

/// Ordered rule table; the first rule that produces a name wins
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule with the lowest priority so far
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, rule: impl Rule + 'static) -> Self {
        self.register(Arc::new(rule));
        self
    }

    /// Try every rule in priority order and return the first result
    pub fn first_match(&self, input: &RuleInput<'_>) -> Option<Derivation> {
        for rule in &self.rules {
            if let Some(derivation) = rule.apply(input) {
                tracing::debug!(
                    rule = rule.name(),
                    new_name = %derivation.new_name,
                    "rule matched"
                );
                return Some(derivation);
            }
        }
        None
    }

    /// Rule names in priority order
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Regex recognizer whose match is rendered through a [`Template`]
pub struct TemplateRule {
    name: &'static str,
    regex: Regex,
    template: Template,
    underscores_to_spaces: bool,
}

impl TemplateRule {
    pub fn new(name: &'static str, regex: Regex, template: Template) -> Self {
        let unknown = template.unknown_groups(&regex);
        if !unknown.is_empty() {
            tracing::warn!(
                rule = name,
                groups = ?unknown,
                "template refers to groups the pattern never captures"
            );
        }
        Self {
            name,
            regex,
            template,
            underscores_to_spaces: false,
        }
    }

    /// Replace every `_` of the rendered name by a space
    pub fn underscores_to_spaces(mut self) -> Self {
        self.underscores_to_spaces = true;
        self
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn template(&self) -> &Template {
        &self.template
    }
}

impl Rule for TemplateRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Derivation> {
        let caps = self.regex.captures(input.name)?;
        let mut new_name = self.template.render(&caps);
        if self.underscores_to_spaces {
            new_name = new_name.replace('_', " ");
        }
        Some(Derivation::new(self.name, new_name))
    }
}

/// Name built by a [`RuleFn`], flagged when it still needs manual editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewName {
    pub name: String,
    pub needs_fix: bool,
}

impl NewName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            needs_fix: false,
        }
    }

    /// Flag the name when `charge` is the placeholder for a missing amount
    pub fn with_charge(mut self, charge: &Charge) -> Self {
        self.needs_fix |= charge.is_placeholder();
        self
    }
}

impl From<String> for NewName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Recognizer and builder written as one function
pub type RuleFn = fn(&RuleInput<'_>) -> Option<NewName>;

pub struct FnRule {
    name: &'static str,
    f: RuleFn,
}

impl FnRule {
    pub fn new(name: &'static str, f: RuleFn) -> Self {
        Self { name, f }
    }
}

impl Rule for FnRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Derivation> {
        let built = (self.f)(input)?;
        Some(Derivation::new(self.name, built.name).with_placeholder(built.needs_fix))
    }
}
