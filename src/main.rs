mod changelog;
mod cli;
mod config;
mod display;
mod error;
mod git;
mod renderer;
mod runner;
mod scaffold;
mod shortcodes;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::scaffold::InitOutcome;

#[derive(Parser)]
#[command(name = "addonkit")]
#[command(about = "Scaffold add-on projects from a template and maintain their changelog", long_about = None)]
struct Cli {
    /// Log every external command and file write
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new project from a template branch
    Init {
        /// Name of the project directory to create
        project_name: String,

        /// Template branch to generate from
        base_branch: String,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Changelog commands
    Changelog {
        #[command(subcommand)]
        command: ChangelogCommands,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ChangelogCommands {
    /// Draft an entry from the commits since the last tag and print it
    Collect {
        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Add a release section and recompile the HTML changelog
    Update {
        /// Version of the release
        version: String,

        /// Entry text (skips the editor)
        #[arg(short, long, conflicts_with = "file")]
        message: Option<String>,

        /// Read the entry from a file (skips the editor)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Recompile the HTML changelog from CHANGELOG.md
    Compile {
        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Display the changelog
    Show {
        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize addonkit.toml configuration file
    Init {
        /// Path where to create the config file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "addonkit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init {
            project_name,
            base_branch,
            config,
        } => cli::init::run(project_name, base_branch, config).map(|outcome| match outcome {
            InitOutcome::Created(_) => 0,
            InitOutcome::AlreadyExists(_) => cli::init::EXISTS_EXIT_CODE,
        }),
        Commands::Changelog { command } => match command {
            ChangelogCommands::Collect { config } => cli::changelog::collect(config),
            ChangelogCommands::Update {
                version,
                message,
                file,
                config,
            } => cli::changelog::update(version, message, file, config),
            ChangelogCommands::Compile { config } => cli::changelog::compile(config),
            ChangelogCommands::Show { config } => cli::changelog::show(config),
        }
        .map(|_| 0),
        Commands::Config { command } => match command {
            ConfigCommands::Init { path } => cli::config::init(path).map(|_| 0),
        },
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
