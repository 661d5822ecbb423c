use anyhow::Result;
use std::path::Path;

/// Trait for text extractors that read the text content of a document
#[async_trait::async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text content from the file at `path`
    async fn extract(&self, path: &Path) -> Result<String>;

    /// Check if this extractor supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}
