use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

use crate::changelog::MARKER;
use crate::config::Config;
use crate::error::Result;
use crate::git::Repository;
use crate::renderer;

/// What happened to CHANGELOG.md during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splice {
    /// The file did not exist and was created with a header
    Created,
    /// The section went in at the marker
    Inserted,
    /// The file has no marker; its content was left as it was
    MarkerMissing,
}

/// CHANGELOG.md and its compiled HTML view inside one repository
pub struct ChangelogFile {
    path: PathBuf,
    html_path: PathBuf,
}

impl ChangelogFile {
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            path: root.join(&config.changelog.path),
            html_path: root.join(&config.changelog.html_path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn html_path(&self) -> &Path {
        &self.html_path
    }

    /// Add a release section at the marker, creating the file if needed
    pub fn add_release(
        &self,
        repo_name: &str,
        version: &str,
        date: NaiveDate,
        body: &str,
    ) -> Result<Splice> {
        let section = release_section(version, date, body);

        if !self.path.exists() {
            let content = format!("# Changelog of {}\n\n{}\n", repo_name, section);
            fs::write(&self.path, content)?;
            tracing::debug!("created {}", self.path.display());
            return Ok(Splice::Created);
        }

        let existing = fs::read_to_string(&self.path)?;
        match splice(&existing, &section) {
            Some(updated) => {
                fs::write(&self.path, updated)?;
                tracing::debug!("inserted {} into {}", version, self.path.display());
                Ok(Splice::Inserted)
            }
            None => {
                tracing::warn!(
                    "{} has no marker line, release {} was not inserted",
                    self.path.display(),
                    version
                );
                Ok(Splice::MarkerMissing)
            }
        }
    }

    /// Regenerate the HTML view from the current markdown
    pub fn compile(&self, repo_name: &str) -> Result<()> {
        let markdown = fs::read_to_string(&self.path)?;

        if let Some(parent) = self.html_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.html_path, renderer::render_html(repo_name, &markdown))?;
        tracing::debug!("compiled {}", self.html_path.display());

        Ok(())
    }
}

/// Record a release in the changelog of the repository containing `dir`
/// and recompile the HTML view
pub fn update_changelog(dir: &Path, config: &Config, version: &str, body: &str) -> Result<Splice> {
    let repo = Repository::discover(dir)?;
    let repo_name = repo.name()?;
    let file = ChangelogFile::new(repo.workdir()?, config);

    let splice = file.add_release(&repo_name, version, Local::now().date_naive(), body)?;
    file.compile(&repo_name)?;

    Ok(splice)
}

/// Marker line, then the dated heading and the entry body
fn release_section(version: &str, date: NaiveDate, body: &str) -> String {
    format!(
        "{}\n\n## {} ({})\n\n{}",
        MARKER,
        version,
        date.format("%Y-%m-%d"),
        body
    )
}

/// Replace the first marker with `section`; `None` without a marker
fn splice(existing: &str, section: &str) -> Option<String> {
    if existing.contains(MARKER) {
        Some(existing.replacen(MARKER, section, 1))
    } else {
        None
    }
}
