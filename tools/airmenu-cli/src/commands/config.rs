//! Show or initialize the configuration.

use std::path::PathBuf;

use airmenu_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, path: Option<PathBuf>, init: bool) -> anyhow::Result<()> {
    if init {
        let target = path.unwrap_or_else(config_file_path);
        if target.exists() {
            anyhow::bail!("Config already exists at {}", target.display());
        }
        AppConfig::default().save_to(&target)?;
        println!("Wrote default config to {}", target.display());
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
