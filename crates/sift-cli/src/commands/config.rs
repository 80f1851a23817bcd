//! Config command - show or initialize the configuration.

use sift_core::Config;
use std::path::PathBuf;

/// Run the config command.
pub fn run(config: Config, path: Option<PathBuf>, init: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    if init {
        if path.exists() {
            println!("Configuration already exists at {}", path.display());
        } else {
            config.save_to(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
        return Ok(());
    }

    let status = if path.exists() { "" } else { " (not created, using defaults)" };
    println!("# {}{}", path.display(), status);
    println!();
    print!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}
