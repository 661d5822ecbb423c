use crate::constants::{BETWEEN_TAG_SEPARATOR, FILENAME_TAG_SEPARATOR};
use std::fmt;

/// Ordered set of tags: insertion order is the order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a tag block on single spaces. Consecutive or trailing spaces
    /// yield an empty tag, exactly like the block was written.
    pub fn from_block(block: &str) -> Self {
        block.split(BETWEEN_TAG_SEPARATOR).collect()
    }

    /// Add a tag unless it is already present. Returns whether it was added.
    pub fn push(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Append every addition not already present, keeping existing order
    pub fn merge<I, S>(&mut self, additions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in additions {
            self.push(tag);
        }
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tags joined into the body of a tag block
    pub fn join(&self) -> String {
        self.0.join(BETWEEN_TAG_SEPARATOR)
    }

    /// The tag block as appended to a name, including the leading separator
    pub fn to_block(&self) -> String {
        format!("{}{}", FILENAME_TAG_SEPARATOR, self.join())
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Tags::new();
        tags.merge(iter);
        tags
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

/// Deduplicating union of `existing` and `additions`
pub fn merge_tags<S: AsRef<str>>(mut existing: Tags, additions: &[S]) -> Tags {
    existing.merge(additions.iter().map(|s| s.as_ref().to_string()));
    existing
}

/// The four structural parts of a file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameComponents {
    /// Date, date-time or date/time range prefix
    pub temporal: Option<String>,
    /// Descriptive part between prefix and tag block
    pub base: String,
    /// Tags of the tag block
    pub tags: Tags,
    /// Extension without the dot
    pub extension: Option<String>,
}

impl FileNameComponents {
    pub fn has_extension(&self, ext: &str) -> bool {
        self.extension.as_deref() == Some(ext)
    }

    /// Extension compared case-insensitively
    pub fn has_extension_ignore_case(&self, ext: &str) -> bool {
        self.extension
            .as_deref()
            .map(|e| e.eq_ignore_ascii_case(ext))
            .unwrap_or(false)
    }

    /// Existing tags merged with `additions`, rendered as a tag block
    pub fn tag_block_with(&self, additions: &[&str]) -> String {
        merge_tags(self.tags.clone(), additions).to_block()
    }
}

/// A new file name produced by a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    /// The new basename
    pub new_name: String,
    /// Name of the rule that produced it
    pub rule: &'static str,
    /// A value could not be extracted and a placeholder was inserted
    pub needs_fix: bool,
}

impl Derivation {
    pub fn new(rule: &'static str, new_name: impl Into<String>) -> Self {
        Self {
            new_name: new_name.into(),
            rule,
            needs_fix: false,
        }
    }

    pub fn with_placeholder(mut self, needs_fix: bool) -> Self {
        self.needs_fix = needs_fix;
        self
    }
}
