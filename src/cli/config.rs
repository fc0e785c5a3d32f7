use crate::config::{self, Config};
use crate::error::Result;
use std::path::PathBuf;

/// Write addonkit.toml with the default settings
pub fn init(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(config::DEFAULT_FILE));

    if config_path.exists() {
        eprintln!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        eprintln!("Remove it first if you want to reinitialize.");
        return Ok(());
    }

    config::save(&Config::default(), &config_path)?;

    println!("Configuration file created: {}", config_path.display());
    println!("\nEdit it to point at another template repository, editor or package manager.");

    Ok(())
}
