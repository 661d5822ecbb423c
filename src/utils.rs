use crate::constants::DOCUMENT_EXTENSIONS;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Get file extension from path (without the dot), lowercased
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// True for extensions whose text content the content rules understand
pub fn is_document_extension(ext: &str) -> bool {
    DOCUMENT_EXTENSIONS
        .iter()
        .any(|doc| doc.eq_ignore_ascii_case(ext))
}

/// Regular files below `dir`, hidden entries skipped, in a stable order
pub fn collect_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Failed to read directory entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

fn is_hidden(name: Option<&str>) -> bool {
    name.map(|n| n.starts_with('.')).unwrap_or(false)
}
