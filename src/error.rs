use thiserror::Error;

/// Errors raised by the name derivation engine.
///
/// A file for which no rule matched is not an error; that outcome is an
/// `Ok(None)` from the derivation functions.
#[derive(Error, Debug)]
pub enum GuessError {
    /// The caller passed an empty file name.
    #[error("file name must not be empty")]
    EmptyName,

    /// The name could not be split into components, or a path has no
    /// UTF-8 file name.
    #[error("file name could not be split into components: {0}")]
    Unparseable(String),
}

pub type Result<T> = std::result::Result<T, GuessError>;
