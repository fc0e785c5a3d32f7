use thiserror::Error;

/// Addonkit error types
#[derive(Error, Debug)]
pub enum AddonkitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("Command `{command}` failed ({status}){detail}", detail = format_stderr(.stderr))]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Cannot run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    Regex(#[from] regex::Error),
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Result type for addonkit operations
pub type Result<T> = std::result::Result<T, AddonkitError>;
