pub mod charge;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod guesser;
pub mod handler;
pub mod logging;
pub mod matcher;
pub mod models;
pub mod parser;
pub mod patterns;
pub mod renamer;
pub mod rules;
pub mod template;
pub mod utils;

pub use config::{Config, Lookup};
pub use error::GuessError;
pub use guesser::FilenameGuesser;
pub use handler::{FileHandler, HandleOutcome};
pub use models::{Derivation, FileNameComponents, Tags};
pub use renamer::Renamer;
pub use rules::{Rule, RuleRegistry};
