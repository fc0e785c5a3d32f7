use std::path::PathBuf;

use crate::config;
use crate::error::Result;
use crate::runner::SystemRunner;
use crate::scaffold::{InitOutcome, ProjectRequest, Scaffolder};

/// Process exit status when the project directory already exists
pub const EXISTS_EXIT_CODE: i32 = -1;

/// Generate a new project from the template repository
pub fn run(
    project_name: String,
    base_branch: String,
    config_path: Option<PathBuf>,
) -> Result<InitOutcome> {
    let cwd = std::env::current_dir()?;
    let config = config::resolve(config_path, &cwd)?;

    println!(
        "Generating project {} from {}/{}",
        project_name, config.template.remote_name, base_branch
    );
    let request = ProjectRequest::new(&project_name, &base_branch);
    println!(" - addon UUID: {}", request.uuid);

    let outcome = Scaffolder::new(&config, &SystemRunner).run(&cwd, &request)?;
    match &outcome {
        InitOutcome::Created(dir) => {
            println!("🎉 Project generated from template! ({})", dir.display());
        }
        InitOutcome::AlreadyExists(_) => {
            println!(" - Project directory already exists. Exiting.");
        }
    }

    Ok(outcome)
}
