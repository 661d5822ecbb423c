use crate::constants::{DEFAULT_ERROR_DIR, DEFAULT_SUCCESS_DIR};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Renames files inside their directory with dry-run support
#[derive(Debug, Clone)]
pub struct Renamer {
    dry_run: bool,
    quiet: bool,
    success_dir: String,
    error_dir: String,
}

impl Renamer {
    pub fn new(dry_run: bool, quiet: bool) -> Self {
        Self {
            dry_run,
            quiet,
            success_dir: DEFAULT_SUCCESS_DIR.to_string(),
            error_dir: DEFAULT_ERROR_DIR.to_string(),
        }
    }

    /// Override the names of the success and error sub-directories
    pub fn with_dirs(
        mut self,
        success_dir: impl Into<String>,
        error_dir: impl Into<String>,
    ) -> Self {
        self.success_dir = success_dir.into();
        self.error_dir = error_dir.into();
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Rename `old` to `new` within `dir`.
    ///
    /// Returns `Ok(false)` when nothing was (or would be) renamed: identical
    /// names, a missing source, or an already existing destination.
    pub fn rename(&self, dir: &Path, old: &str, new: &str) -> Result<bool> {
        if old == new {
            tracing::info!("Old filename is same as new filename: skipping file");
            return Ok(false);
        }

        let old_path = dir.join(old);
        let new_path = dir.join(new);

        if !old_path.is_file() {
            tracing::error!("file to rename does not exist: [{}]", old_path.display());
            return Ok(false);
        }

        if new_path.exists() {
            tracing::error!(
                "file can't be renamed since new file name already exists: [{}]",
                new_path.display()
            );
            return Ok(false);
        }

        if !self.quiet {
            println!("       →  {}", new);
        }
        tracing::debug!(" renaming \"{}\"", old_path.display());
        tracing::debug!("      ⤷   \"{}\"", new_path.display());

        if !self.dry_run {
            fs::rename(&old_path, &new_path).with_context(|| {
                format!("Failed to rename {} to {}", old_path.display(), new_path.display())
            })?;
        }
        Ok(true)
    }

    /// Move a renamed file into the success directory if it exists next to it
    pub fn move_to_success_dir(&self, dir: &Path, name: &str) -> Result<bool> {
        self.move_into(dir, &self.success_dir, name)
    }

    /// Move a file without a new name into the error directory if it exists next to it
    pub fn move_to_error_dir(&self, dir: &Path, name: &str) -> Result<bool> {
        self.move_into(dir, &self.error_dir, name)
    }

    fn move_into(&self, dir: &Path, sub_dir: &str, name: &str) -> Result<bool> {
        let target_dir = dir.join(sub_dir);
        if self.dry_run || !target_dir.is_dir() {
            return Ok(false);
        }

        let source = dir.join(name);
        let destination = target_dir.join(name);
        fs::rename(&source, &destination).with_context(|| {
            format!("Failed to move {} to {}", source.display(), destination.display())
        })?;
        tracing::info!("moved file to sub-directory \"{}\"", sub_dir);
        Ok(true)
    }
}
