use crate::extractor::r#trait::TextExtractor;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Number of leading pages whose text is handed to the content rules
pub const DEFAULT_PAGE_LIMIT: usize = 2;

/// PDF text extractor reading the first pages with lopdf,
/// falling back to pdf-extract for documents lopdf cannot decode
pub struct PdfExtractor {
    page_limit: usize,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    fn extract_with_lopdf(path: &Path, page_limit: usize) -> Result<String> {
        use lopdf::Document;

        let doc = Document::load(path)
            .with_context(|| format!("Failed to load PDF: {}", path.display()))?;

        let pages: Vec<u32> = doc.get_pages().keys().copied().take(page_limit).collect();
        if pages.is_empty() {
            anyhow::bail!("PDF has no pages: {}", path.display());
        }

        let mut text_content = String::new();
        for page_num in pages {
            match doc.extract_text(&[page_num]) {
                Ok(page_text) => text_content.push_str(&page_text),
                Err(e) => tracing::debug!(
                    "lopdf could not read page {} of {}: {}",
                    page_num,
                    path.display(),
                    e
                ),
            }
        }
        Ok(text_content)
    }

    fn extract_blocking(path: PathBuf, page_limit: usize) -> Result<String> {
        let text = match Self::extract_with_lopdf(&path, page_limit) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => String::new(),
            Err(e) => {
                tracing::debug!("lopdf failed, trying pdf-extract: {:#}", e);
                String::new()
            }
        };

        let text = if text.trim().is_empty() {
            pdf_extract::extract_text(&path)
                .with_context(|| format!("Could not read PDF file content: {}", path.display()))?
        } else {
            text
        };

        if text.trim().is_empty() {
            anyhow::bail!("PDF file content is empty: {}", path.display());
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let path = path.to_path_buf();
        let page_limit = self.page_limit;
        tokio::task::spawn_blocking(move || Self::extract_blocking(path, page_limit)).await?
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "pdf")
    }
}
