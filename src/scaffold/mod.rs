//! Project scaffolding
//!
//! Generates a new project by merging a branch of the template repository
//! into a fresh git repository, then stamps the project identity into it.
//! Steps run strictly in order and the first failure aborts the run. A
//! partially generated directory is left in place.

use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::Config;
use crate::display::Spinner;
use crate::error::{AddonkitError, Result};
use crate::runner::{CommandLine, CommandRunner};

/// Files in the template that carry the package name
const MANIFESTS: [&str; 2] = ["package.json", "package-lock.json"];

/// Source file whose version comment carries the project name
const SOURCE_MARKER: &str = "src/__init__.py";

/// A project to generate
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    pub name: String,
    pub base_branch: String,
    pub uuid: Uuid,
}

impl ProjectRequest {
    /// Request with a freshly generated identifier
    pub fn new(name: &str, base_branch: &str) -> Self {
        Self {
            name: name.to_string(),
            base_branch: base_branch.to_string(),
            uuid: Uuid::new_v4(),
        }
    }
}

/// Result of a scaffolding run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    /// Nothing was touched because the target path is taken
    AlreadyExists(PathBuf),
}

pub struct Scaffolder<'a, R: CommandRunner> {
    config: &'a Config,
    runner: &'a R,
}

impl<'a, R: CommandRunner> Scaffolder<'a, R> {
    pub fn new(config: &'a Config, runner: &'a R) -> Self {
        Self { config, runner }
    }

    /// Generate `request.name` inside `parent`
    pub fn run(&self, parent: &Path, request: &ProjectRequest) -> Result<InitOutcome> {
        if request.name.trim().is_empty() {
            return Err(AddonkitError::Template(
                "Project name must not be empty".to_string(),
            ));
        }

        let project_dir = parent.join(&request.name);
        if project_dir.exists() {
            return Ok(InitOutcome::AlreadyExists(project_dir));
        }

        fs::create_dir_all(&project_dir)?;

        let spinner = Spinner::start("Generating project...");
        self.fetch_template(&project_dir, &request.base_branch, &spinner)?;

        spinner.set_title("Installing npm libraries");
        let install = CommandLine::parse(&self.config.commands.install)?;
        self.runner
            .output(&project_dir, &install.program, &install.args_with(&[]))?;

        spinner.set_title("Configuring addon settings");
        stamp_identity(&project_dir, request)?;
        rename_placeholder(&project_dir, &self.config.template.placeholder, &request.name)?;

        self.git(&project_dir, &["add", "-A"])?;
        let message = format!(
            "feat: new addon generated from {}/{}",
            self.config.template.remote_name, request.base_branch
        );
        self.git(&project_dir, &["commit", "-m", &message])?;

        Ok(InitOutcome::Created(project_dir))
    }

    fn fetch_template(&self, dir: &Path, base_branch: &str, spinner: &Spinner) -> Result<()> {
        let template = &self.config.template;
        spinner.set_title("Fetching template content");

        self.git(dir, &["init"])?;
        self.git(
            dir,
            &["remote", "add", &template.remote_name, &template.remote_url],
        )?;
        self.git(dir, &["fetch", &template.remote_name, base_branch])?;
        self.git(dir, &["checkout", "-b", &template.work_branch])?;
        self.git(
            dir,
            &["merge", &format!("{}/{}", template.remote_name, base_branch)],
        )?;

        Ok(())
    }

    fn git(&self, dir: &Path, args: &[&str]) -> Result<String> {
        self.runner.output(dir, "git", args)
    }
}

/// Write the project identifier and base branch files
fn stamp_identity(dir: &Path, request: &ProjectRequest) -> Result<()> {
    let uuid_path = dir.join("src/UUID");
    if let Some(parent) = uuid_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&uuid_path, request.uuid.to_string())?;
    fs::write(dir.join("BASEBRANCH"), &request.base_branch)?;
    Ok(())
}

/// Put the project name where the template has its placeholder
fn rename_placeholder(dir: &Path, placeholder: &str, name: &str) -> Result<()> {
    let token = regex::escape(placeholder);

    let manifest_name = Regex::new(&format!(r#""name": "{}","#, token))?;
    let manifest_replacement = format!(r#""name": "{}","#, name);
    for manifest in MANIFESTS {
        replace_in_file(&dir.join(manifest), &manifest_name, &manifest_replacement)?;
    }

    let version_comment = Regex::new(&format!("# {} v", token))?;
    replace_in_file(
        &dir.join(SOURCE_MARKER),
        &version_comment,
        &format!("# {} v", name),
    )?;

    Ok(())
}

/// Replace every match in a file. Missing files are skipped with a warning.
fn replace_in_file(path: &Path, pattern: &Regex, replacement: &str) -> Result<bool> {
    if !path.exists() {
        tracing::warn!("{} not found, skipping rename", path.display());
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    let updated = pattern.replace_all(&content, NoExpand(replacement));
    let changed = updated != content;
    if changed {
        fs::write(path, updated.as_ref())?;
        tracing::debug!("renamed project in {}", path.display());
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    const PACKAGE_JSON: &str = "{\n  \"name\": \"addon_template\",\n  \"version\": \"1.0.0\"\n}\n";
    const INIT_PY: &str = "# addon_template v20.5.1i0\n\nfrom aqt import mw\n";

    /// Records commands; `git merge` lays down template files
    #[derive(Default)]
    struct FakeRunner {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl CommandRunner for FakeRunner {
        fn output(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String> {
            let line = format!("{} {}", program, args.join(" "));
            self.calls.borrow_mut().push(line.clone());

            if self.fail_on.is_some_and(|prefix| line.starts_with(prefix)) {
                return Err(AddonkitError::Command {
                    command: line,
                    status: "exit status: 1".to_string(),
                    stderr: "boom".to_string(),
                });
            }

            if program == "git" && args.first() == Some(&"merge") {
                fs::create_dir_all(dir.join("src")).unwrap();
                fs::write(dir.join("package.json"), PACKAGE_JSON).unwrap();
                fs::write(dir.join("package-lock.json"), PACKAGE_JSON).unwrap();
                fs::write(dir.join(SOURCE_MARKER), INIT_PY).unwrap();
            }

            Ok(String::new())
        }

        fn interactive(&self, _dir: &Path, program: &str, _args: &[&str]) -> Result<()> {
            panic!("unexpected interactive command {}", program)
        }
    }

    fn request(name: &str) -> ProjectRequest {
        ProjectRequest {
            name: name.to_string(),
            base_branch: "master".to_string(),
            uuid: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
        }
    }

    #[test]
    fn test_generates_project() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let runner = FakeRunner::default();

        let outcome = Scaffolder::new(&config, &runner)
            .run(temp.path(), &request("my_addon"))
            .unwrap();

        let dir = temp.path().join("my_addon");
        assert_eq!(outcome, InitOutcome::Created(dir.clone()));
        assert_eq!(
            fs::read_to_string(dir.join("src/UUID")).unwrap(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert_eq!(fs::read_to_string(dir.join("BASEBRANCH")).unwrap(), "master");
        assert!(fs::read_to_string(dir.join("package.json"))
            .unwrap()
            .contains("\"name\": \"my_addon\","));
        assert!(fs::read_to_string(dir.join("package-lock.json"))
            .unwrap()
            .contains("\"name\": \"my_addon\","));
        assert!(fs::read_to_string(dir.join(SOURCE_MARKER))
            .unwrap()
            .starts_with("# my_addon v20.5.1i0"));
    }

    #[test]
    fn test_commands_run_in_order() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let runner = FakeRunner::default();

        Scaffolder::new(&config, &runner)
            .run(temp.path(), &request("my_addon"))
            .unwrap();

        assert_eq!(
            *runner.calls.borrow(),
            vec![
                "git init",
                "git remote add template https://github.com/trgkanki/addon_template",
                "git fetch template master",
                "git checkout -b develop",
                "git merge template/master",
                "npm i",
                "git add -A",
                "git commit -m feat: new addon generated from template/master",
            ]
        );
    }

    #[test]
    fn test_existing_directory_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("my_addon");
        fs::create_dir(&existing).unwrap();
        fs::write(existing.join("keep.txt"), "mine").unwrap();
        let config = Config::default();
        let runner = FakeRunner::default();

        let outcome = Scaffolder::new(&config, &runner)
            .run(temp.path(), &request("my_addon"))
            .unwrap();

        assert_eq!(outcome, InitOutcome::AlreadyExists(existing.clone()));
        assert!(runner.calls.borrow().is_empty());
        let entries: Vec<_> = fs::read_dir(&existing).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(fs::read_to_string(existing.join("keep.txt")).unwrap(), "mine");
    }

    #[test]
    fn test_existing_file_also_blocks() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("my_addon"), "").unwrap();
        let config = Config::default();
        let runner = FakeRunner::default();

        let outcome = Scaffolder::new(&config, &runner)
            .run(temp.path(), &request("my_addon"))
            .unwrap();

        assert!(matches!(outcome, InitOutcome::AlreadyExists(_)));
    }

    #[test]
    fn test_failed_fetch_stops_the_run() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let runner = FakeRunner {
            fail_on: Some("git fetch"),
            ..Default::default()
        };

        let result = Scaffolder::new(&config, &runner).run(temp.path(), &request("my_addon"));

        assert!(matches!(result, Err(AddonkitError::Command { .. })));
        assert_eq!(runner.calls.borrow().last().unwrap(), "git fetch template master");
        let dir = temp.path().join("my_addon");
        assert!(dir.exists());
        assert!(!dir.join("src/UUID").exists());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let runner = FakeRunner::default();

        let result = Scaffolder::new(&config, &runner).run(temp.path(), &request(" "));
        assert!(matches!(result, Err(AddonkitError::Template(_))));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_rename_inserts_name_literally() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), PACKAGE_JSON).unwrap();

        rename_placeholder(temp.path(), "addon_template", "cash$1_addon").unwrap();

        assert!(fs::read_to_string(temp.path().join("package.json"))
            .unwrap()
            .contains("\"name\": \"cash$1_addon\","));
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        let pattern = Regex::new("x").unwrap();
        assert!(!replace_in_file(&temp.path().join("nope.json"), &pattern, "y").unwrap());
    }

    #[test]
    fn test_fresh_uuid_per_request() {
        let a = ProjectRequest::new("a", "master");
        let b = ProjectRequest::new("a", "master");
        assert_ne!(a.uuid, b.uuid);
        assert_eq!(a.uuid.get_version_num(), 4);
    }
}
