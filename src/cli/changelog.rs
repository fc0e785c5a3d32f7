use std::fs;
use std::path::{Path, PathBuf};

use crate::changelog::{self, ChangelogFile, Collector, Splice};
use crate::config::{self, Config};
use crate::display;
use crate::error::{AddonkitError, Result};
use crate::git::Repository;
use crate::runner::SystemRunner;

fn context(config_path: Option<PathBuf>) -> Result<(PathBuf, Config)> {
    let cwd = std::env::current_dir()?;
    let config = config::resolve(config_path, &cwd)?;
    Ok((cwd, config))
}

fn collect_entry(dir: &Path, config: &Config) -> Result<String> {
    Collector::new(config, &SystemRunner)?.collect(dir)
}

/// Draft a changelog entry in the editor and print it
pub fn collect(config_path: Option<PathBuf>) -> Result<()> {
    let (cwd, config) = context(config_path)?;
    let entry = collect_entry(&cwd, &config)?;
    println!("{}", entry);
    Ok(())
}

/// Add a release section to the changelog and recompile the HTML view.
///
/// Without `message` or `file` the entry is drafted in the editor first.
pub fn update(
    version: String,
    message: Option<String>,
    file: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (cwd, config) = context(config_path)?;

    let body = match (message, file) {
        (Some(message), _) => message,
        (None, Some(path)) => fs::read_to_string(&path).map_err(|e| {
            AddonkitError::Changelog(format!("Cannot read entry from '{}': {}", path.display(), e))
        })?,
        (None, None) => collect_entry(&cwd, &config)?,
    };

    match changelog::update_changelog(&cwd, &config, &version, body.trim())? {
        Splice::Created => println!("Changelog created for {}", version),
        Splice::Inserted => println!("Changelog updated for {}", version),
        Splice::MarkerMissing => eprintln!(
            "Warning: no marker line in {}, {} was not added",
            config.changelog.path.display(),
            version
        ),
    }
    println!("Compiled changelog written to: {}", config.changelog.html_path.display());

    Ok(())
}

/// Regenerate the HTML view from the current changelog
pub fn compile(config_path: Option<PathBuf>) -> Result<()> {
    let (cwd, config) = context(config_path)?;
    let repo = Repository::discover(&cwd)?;
    let file = ChangelogFile::new(repo.workdir()?, &config);

    file.compile(&repo.name()?)?;
    println!("Compiled changelog written to: {}", file.html_path().display());

    Ok(())
}

/// Print the changelog to the terminal
pub fn show(config_path: Option<PathBuf>) -> Result<()> {
    let (cwd, config) = context(config_path)?;
    let repo = Repository::discover(&cwd)?;
    let file = ChangelogFile::new(repo.workdir()?, &config);

    let markdown = fs::read_to_string(file.path()).map_err(|e| {
        AddonkitError::Changelog(format!(
            "Cannot read '{}': {}. Run 'addonkit changelog update' first.",
            file.path().display(),
            e
        ))
    })?;
    display::print_changelog(&markdown);

    Ok(())
}
