use anyhow::{Context, Result};
use clap::Parser;
use guessfs::{
    config::{Config, Lookup, RenamerConfig},
    logging::{init_logging, LogConfig},
    utils, FileHandler, FilenameGuesser, Renamer,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "guessfs")]
#[command(about = "Derive meaningful file names from old file names and PDF content")]
#[command(version)]
struct Cli {
    /// Just simulate what would happen, do not modify files
    #[arg(short = 'd', long)]
    dry_run: bool,
    /// Enable verbose mode
    #[arg(short, long)]
    verbose: bool,
    /// Enable quiet mode
    #[arg(short, long)]
    quiet: bool,
    /// Ask before renaming each file
    #[arg(short, long)]
    interactive: bool,
    /// Descend into directories
    #[arg(short, long)]
    recursive: bool,
    /// Configuration file
    /// (defaults to config/settings.toml or ~/.config/guessfs/settings.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Files to rename
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogConfig {
        verbose: cli.verbose,
        quiet: cli.quiet,
    })?;

    let config = match &cli.config {
        Some(path) => Some(Config::from_file(path)?),
        None => Config::load().context("Failed to load configuration")?,
    };
    if config.is_none() {
        tracing::warn!(
            "Could not find settings.toml; rules that need private settings are disabled"
        );
    }

    let renamer_config: RenamerConfig = config
        .as_ref()
        .map(|c| c.renamer.clone())
        .unwrap_or_default();
    let dry_run = cli.dry_run || renamer_config.dry_run_default;
    if dry_run {
        tracing::debug!("DRYRUN active, not changing any files");
    }

    let lookup = config.map(|c| Arc::new(c) as Arc<dyn Lookup>);
    let renamer = Renamer::new(dry_run, cli.quiet)
        .with_dirs(renamer_config.success_dir, renamer_config.error_dir);
    let handler =
        FileHandler::new(FilenameGuesser::new(lookup), renamer).interactive(cli.interactive);

    let files: Vec<PathBuf> = cli
        .files
        .iter()
        .flat_map(|path| {
            if cli.recursive && path.is_dir() {
                utils::collect_files(path)
            } else {
                vec![path.clone()]
            }
        })
        .collect();
    tracing::debug!("{} filenames found", files.len());

    let mut failures = 0usize;
    for file in &files {
        match handler.handle(file).await {
            Ok(outcome) if outcome.is_renamed() => {}
            Ok(_) => failures += 1,
            Err(e) => {
                tracing::error!("Failed to handle {}: {:#}", file.display(), e);
                failures += 1;
            }
        }
    }

    if !cli.quiet {
        println!();
    }

    if failures == 0 {
        tracing::debug!("successfully finished.");
        Ok(())
    } else {
        tracing::debug!("finished with {} filename(s) that could not be derived", failures);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_flags() {
        let cli = Cli::try_parse_from(["guessfs", "-d", "a.pdf"]).unwrap();
        assert!(cli.dry_run);
        let cli = Cli::try_parse_from(["guessfs", "--dry-run", "a.pdf"]).unwrap();
        assert!(cli.dry_run);
        assert!(Cli::try_parse_from(["guessfs", "-s", "a.pdf"]).is_err());
    }

    #[test]
    fn test_files_are_required() {
        assert!(Cli::try_parse_from(["guessfs", "-v"]).is_err());
    }
}
