//! Configuration module
//!
//! Handles loading and saving of addonkit.toml configuration files.
//! Every setting has a built-in default, so the file is optional.

mod types;

pub use types::Config;

use crate::error::{AddonkitError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given
pub const DEFAULT_FILE: &str = "addonkit.toml";

/// Load configuration from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        AddonkitError::Config(format!(
            "Cannot read config from '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Resolve the configuration for a command.
///
/// An explicit path must be readable. Without one, `addonkit.toml` in `dir`
/// is used when present and the defaults otherwise.
pub fn resolve(explicit: Option<PathBuf>, dir: &Path) -> Result<Config> {
    match explicit {
        Some(path) => load(&path),
        None => {
            let path = dir.join(DEFAULT_FILE);
            if path.exists() {
                load(&path)
            } else {
                tracing::debug!("no {} found, using defaults", DEFAULT_FILE);
                Ok(Config::default())
            }
        }
    }
}

/// Save configuration to a TOML file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|e| AddonkitError::Config(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, toml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(DEFAULT_FILE);

        let config = Config::default();
        save(&config, &config_path).unwrap();

        let loaded = load(&config_path).unwrap();
        assert_eq!(loaded.commands.install, "npm i");
        assert_eq!(loaded.template.remote_name, "template");
    }

    #[test]
    fn test_load_missing_config() {
        let result = load(Path::new("/nonexistent/addonkit.toml"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Cannot read config from"));
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = resolve(None, temp.path()).unwrap();
        assert_eq!(config.commands.editor, "code --wait");
    }

    #[test]
    fn test_resolve_picks_up_file_in_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DEFAULT_FILE),
            "[commands]\ninstall = \"pnpm install\"\n",
        )
        .unwrap();

        let config = resolve(None, temp.path()).unwrap();
        assert_eq!(config.commands.install, "pnpm install");
    }

    #[test]
    fn test_resolve_explicit_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let result = resolve(Some(temp.path().join("other.toml")), temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_save_creates_directories() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("nested/dir/addonkit.toml");

        save(&Config::default(), &config_path).unwrap();

        assert!(config_path.exists());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(DEFAULT_FILE);
        fs::write(&config_path, "[commands\n").unwrap();

        let err = load(&config_path).unwrap_err();
        assert!(matches!(err, AddonkitError::TomlParse(_)));
    }
}
