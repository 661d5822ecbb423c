use crate::error::{GuessError, Result};
use crate::models::{FileNameComponents, Tags};
use crate::patterns;
use once_cell::sync::Lazy;
use regex::Regex;

/// `[<temporal><sep>]<base>[ -- <tags>][.<extension>]`
///
/// The base is lazy so the tag block and the extension get the first claim
/// on trailing content. It may span line breaks, which are legal in names.
static NAME_TAGS_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?:(?P<temporal>{})[ \-_])?(?P<base>(?s:.+?))(?: -- (?P<tags>(?:\w+ ?)+))?(?:\.(?P<extension>\w+))?$",
        patterns::daytime_duration()
    ))
    .expect("file name pattern is valid")
});

impl FileNameComponents {
    /// Split a file name into temporal prefix, base, tags and extension
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(GuessError::EmptyName);
        }

        let caps = NAME_TAGS_EXTENSION
            .captures(name)
            .ok_or_else(|| GuessError::Unparseable(name.to_string()))?;

        let tags = caps
            .name("tags")
            .map(|m| Tags::from_block(m.as_str()))
            .unwrap_or_default();

        Ok(Self {
            temporal: caps.name("temporal").map(|m| m.as_str().to_string()),
            base: caps["base"].to_string(),
            tags,
            extension: caps.name("extension").map(|m| m.as_str().to_string()),
        })
    }
}

/// Shorthand for [`FileNameComponents::parse`]
pub fn split(name: &str) -> Result<FileNameComponents> {
    FileNameComponents::parse(name)
}
