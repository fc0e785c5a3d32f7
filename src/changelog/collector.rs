use regex::Regex;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::git::Repository;
use crate::runner::{CommandLine, CommandRunner};
use crate::shortcodes::Shortcodes;

const DRAFT_HELP: &str =
    "Write your changelog in markdown format above. Anything in this comment region is ignored.";

/// Collects a release entry from the user, seeded with the commits since
/// the last release
pub struct Collector<'a, R: CommandRunner> {
    config: &'a Config,
    runner: &'a R,
    shortcodes: Shortcodes,
}

impl<'a, R: CommandRunner> Collector<'a, R> {
    pub fn new(config: &'a Config, runner: &'a R) -> Result<Self> {
        let shortcodes = Shortcodes::gitmoji()?.with_overrides(&config.shortcodes)?;
        Ok(Self {
            config,
            runner,
            shortcodes,
        })
    }

    /// First-parent commits since the latest tag, shortcodes replaced
    pub fn commit_log(&self, repo: &Repository) -> Result<String> {
        let since = repo.latest_release_tag()?;
        match &since {
            Some(tag) => tracing::debug!("collecting commits since {}", tag),
            None => tracing::debug!("no release tag, collecting all commits"),
        }

        let log = repo.first_parent_log(since.as_deref())?;
        Ok(self.shortcodes.replace(&log))
    }

    /// Open a draft in the editor and return what the user wrote.
    ///
    /// The draft lives in a temporary file that is removed on every exit
    /// path, including editor failure.
    pub fn collect(&self, dir: &Path) -> Result<String> {
        let repo = Repository::discover(dir)?;
        let commit_log = self.commit_log(&repo)?;
        let editor = CommandLine::parse(&self.config.commands.editor)?;

        let draft = tempfile::Builder::new()
            .prefix("CHANGELOG-")
            .suffix(".md")
            .tempfile()?;
        fs::write(draft.path(), draft_template(&commit_log))?;

        let draft_path = draft.path().to_string_lossy().into_owned();
        self.runner
            .interactive(dir, &editor.program, &editor.args_with(&[draft_path.as_str()]))?;

        let written = fs::read_to_string(draft.path())?;
        extract_entry(&written)
    }
}

/// Blank authoring space followed by the commit log inside a comment
pub fn draft_template(commit_log: &str) -> String {
    format!("\n\n<!---\n{}\n\n{}\n-->\n", DRAFT_HELP, commit_log)
}

/// Drop every `<!--- ... -->` region and surrounding whitespace
pub fn extract_entry(draft: &str) -> Result<String> {
    let comment = Regex::new(r"(?s)<!---.*?-->")?;
    Ok(comment.replace_all(draft, "").trim().to_string())
}
