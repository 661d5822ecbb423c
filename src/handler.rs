use crate::guesser::FilenameGuesser;
use crate::models::Derivation;
use crate::renamer::Renamer;
use anyhow::{Context, Result};
use std::path::Path;

/// What happened to one file handed to [`FileHandler::handle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// A new name was derived and applied (or simulated in dry-run)
    Renamed(Derivation),
    /// Neither the name nor the content gave enough cues
    NoMatch,
    /// Not a regular file, rename refused, or declined interactively
    Skipped,
}

impl HandleOutcome {
    pub fn is_renamed(&self) -> bool {
        matches!(self, HandleOutcome::Renamed(_))
    }
}

/// Runs the guesser on one file and carries out the rename
pub struct FileHandler {
    guesser: FilenameGuesser,
    renamer: Renamer,
    interactive: bool,
}

impl FileHandler {
    pub fn new(guesser: FilenameGuesser, renamer: Renamer) -> Self {
        Self {
            guesser,
            renamer,
            interactive: false,
        }
    }

    /// Ask before every rename
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub async fn handle(&self, path: &Path) -> Result<HandleOutcome> {
        if path.is_dir() {
            tracing::debug!(
                "Skipping directory \"{}\" because this tool only renames file names.",
                path.display()
            );
            return Ok(HandleOutcome::Skipped);
        }
        if !path.is_file() {
            tracing::error!(
                "Skipping \"{}\" because this tool only renames existing file names.",
                path.display()
            );
            return Ok(HandleOutcome::Skipped);
        }

        if !self.renamer.is_quiet() {
            println!("\n   {}  ...", path.display());
        }

        let dirname = path.parent().unwrap_or_else(|| Path::new("."));
        let basename = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("File name is not valid UTF-8: {}", path.display()))?;

        let Some(derivation) = self.guesser.guess(path).await? else {
            tracing::warn!(
                "I failed to derive new filename: not enough cues in file name or PDF file content"
            );
            self.renamer.move_to_error_dir(dirname, basename)?;
            return Ok(HandleOutcome::NoMatch);
        };

        if derivation.needs_fix {
            tracing::warn!(
                "rule {} could not extract every value, please fix the placeholder in \"{}\"",
                derivation.rule,
                derivation.new_name
            );
        }

        if self.interactive && !self.confirm(&derivation.new_name)? {
            tracing::info!("keeping \"{}\"", basename);
            return Ok(HandleOutcome::Skipped);
        }

        if !self.renamer.rename(dirname, basename, &derivation.new_name)? {
            return Ok(HandleOutcome::Skipped);
        }
        self.renamer.move_to_success_dir(dirname, &derivation.new_name)?;

        Ok(HandleOutcome::Renamed(derivation))
    }

    fn confirm(&self, new_name: &str) -> Result<bool> {
        use dialoguer::Confirm;
        Confirm::new()
            .with_prompt(format!("Rename to \"{}\"?", new_name))
            .default(true)
            .interact()
            .context("Failed to read user input")
    }
}
