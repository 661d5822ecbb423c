pub mod content;
pub mod name;
pub mod registry;
pub mod r#trait;

pub use registry::{FnRule, NewName, RuleFn, RuleRegistry, TemplateRule};
pub use r#trait::{Rule, RuleInput};
