//! External command execution
//!
//! Every git, package manager and editor invocation goes through
//! [`CommandRunner`]. Commands always run in an explicit directory; the
//! process working directory is never changed.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{AddonkitError, Result};

/// Runs external programs to completion
pub trait CommandRunner {
    /// Run `program` in `dir`, returning captured stdout.
    /// A non-zero exit status is an error carrying stderr.
    fn output(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String>;

    /// Run `program` in `dir` attached to the terminal and wait for it to exit
    fn interactive(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()>;
}

/// Runs commands with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String> {
        let command = display_command(program, args);
        tracing::debug!(dir = %dir.display(), "running `{}`", command);

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| AddonkitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AddonkitError::Command {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn interactive(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()> {
        let command = display_command(program, args);
        tracing::debug!(dir = %dir.display(), "waiting on `{}`", command);

        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .status()
            .map_err(|source| AddonkitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(AddonkitError::Command {
                command,
                status: status.to_string(),
                stderr: String::new(),
            });
        }

        Ok(())
    }
}

/// A configured command line such as `npm i` or `code --wait`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Split a command line on whitespace. Quoting is not supported.
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| AddonkitError::Config("Empty command line".to_string()))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Argument list with `extra` appended, borrowed for a runner call
    pub fn args_with<'a>(&'a self, extra: &[&'a str]) -> Vec<&'a str> {
        self.args
            .iter()
            .map(String::as_str)
            .chain(extra.iter().copied())
            .collect()
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
