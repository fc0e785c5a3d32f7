//! Repository queries
//!
//! Read-only lookups used by the changelog workflow: the latest release tag,
//! the first-parent history since that tag and the repository name.

use git2::{Oid, Repository as Git2Repository, Sort};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{AddonkitError, Result};

/// A git repository opened for queries
pub struct Repository {
    repo: Git2Repository,
}

impl Repository {
    /// Open the repository containing `dir`
    pub fn discover(dir: &Path) -> Result<Self> {
        let repo = Git2Repository::discover(dir).map_err(|e| {
            AddonkitError::Changelog(format!(
                "Cannot open Git repository at '{}': {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { repo })
    }

    /// Root of the working tree
    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| AddonkitError::Changelog("Repository has no working tree".to_string()))
    }

    /// Most recent tag reachable from HEAD, if any.
    ///
    /// History is walked newest first and the first tagged commit wins. When
    /// several tags point at that commit the greatest name is returned.
    pub fn latest_release_tag(&self) -> Result<Option<String>> {
        let tags = self.tags_by_commit()?;
        if tags.is_empty() {
            return Ok(None);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        for oid in revwalk {
            if let Some(names) = tags.get(&oid?) {
                return Ok(names.iter().max().cloned());
            }
        }

        Ok(None)
    }

    /// One line per first-parent commit, newest first: `<short id> <summary>`.
    /// With `since`, commits reachable from that revision are left out.
    pub fn first_parent_log(&self, since: Option<&str>) -> Result<String> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.simplify_first_parent()?;
        revwalk.push_head()?;

        if let Some(rev) = since {
            let commit = self.repo.revparse_single(rev)?.peel_to_commit()?;
            revwalk.hide(commit.id())?;
        }

        let mut lines = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            let short_id = commit.as_object().short_id()?;
            lines.push(format!(
                "{} {}",
                short_id.as_str().unwrap_or_default(),
                commit.summary().unwrap_or_default()
            ));
        }

        Ok(lines.join("\n"))
    }

    /// Repository name, taken from the `origin` URL when there is one and
    /// from the working tree directory otherwise
    pub fn name(&self) -> Result<String> {
        if let Ok(remote) = self.repo.find_remote("origin") {
            if let Some(name) = remote.url().and_then(name_from_url) {
                return Ok(name);
            }
        }

        self.workdir()?
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| AddonkitError::Changelog("Cannot determine repository name".to_string()))
    }

    fn tags_by_commit(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut tags: HashMap<Oid, Vec<String>> = HashMap::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let target = match self
                .repo
                .revparse_single(&format!("refs/tags/{}", name))
                .and_then(|object| object.peel_to_commit())
            {
                Ok(commit) => commit.id(),
                Err(e) => {
                    tracing::debug!("ignoring tag {}: {}", name, e);
                    continue;
                }
            };
            tags.entry(target).or_default().push(name.to_string());
        }

        Ok(tags)
    }
}

/// Last path segment of a remote URL without a `.git` suffix
fn name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
