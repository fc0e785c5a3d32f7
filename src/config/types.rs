use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Addonkit configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template repository that new projects are generated from
    pub template: Template,

    /// External commands invoked by the workflows
    pub commands: Commands,

    /// Changelog file locations
    pub changelog: Changelog,

    /// Extra shortcode mappings, applied on top of the bundled gitmoji table
    pub shortcodes: BTreeMap<String, String>,
}

/// Template repository settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    /// Name of the git remote registered in the new project
    pub remote_name: String,

    /// Address of the template repository
    pub remote_url: String,

    /// Branch created in the new project before merging the template
    pub work_branch: String,

    /// Token in the template files that is replaced by the project name
    pub placeholder: String,
}

/// External command lines, split on whitespace before running
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Commands {
    /// Dependency installation
    pub install: String,

    /// Editor used for changelog drafts; must block until the file is closed
    pub editor: String,
}

/// Changelog paths, relative to the repository root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Changelog {
    pub path: PathBuf,
    pub html_path: PathBuf,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            remote_name: "template".to_string(),
            remote_url: "https://github.com/trgkanki/addon_template".to_string(),
            work_branch: "develop".to_string(),
            placeholder: "addon_template".to_string(),
        }
    }
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            install: "npm i".to_string(),
            editor: "code --wait".to_string(),
        }
    }
}

impl Default for Changelog {
    fn default() -> Self {
        Self {
            path: PathBuf::from("CHANGELOG.md"),
            html_path: PathBuf::from("src/CHANGELOG.html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.template.remote_name, "template");
        assert_eq!(
            config.template.remote_url,
            "https://github.com/trgkanki/addon_template"
        );
        assert_eq!(config.template.work_branch, "develop");
        assert_eq!(config.template.placeholder, "addon_template");
        assert_eq!(config.commands.install, "npm i");
        assert_eq!(config.commands.editor, "code --wait");
        assert_eq!(config.changelog.path, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.changelog.html_path, PathBuf::from("src/CHANGELOG.html"));
        assert!(config.shortcodes.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [commands]
            editor = "vim"

            [shortcodes]
            ":shipit:" = "🐿️"
            "#,
        )
        .unwrap();

        assert_eq!(config.commands.editor, "vim");
        assert_eq!(config.commands.install, "npm i");
        assert_eq!(config.template.work_branch, "develop");
        assert_eq!(config.shortcodes.get(":shipit:").unwrap(), "🐿️");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.template.placeholder, "addon_template");
        assert_eq!(parsed.changelog.html_path, PathBuf::from("src/CHANGELOG.html"));
    }
}
