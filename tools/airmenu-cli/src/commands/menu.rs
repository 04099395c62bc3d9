//! Print the catalog in the web API shape.

use std::path::PathBuf;

use airmenu_common::config::AppConfig;
use airmenu_screen_engine::kiosk::billing_policy;

pub fn run(config: &AppConfig, catalog: Option<PathBuf>) -> anyhow::Result<()> {
    let menu = super::load_menu(catalog.as_deref())?;
    let api = menu.to_api_json(&billing_policy(config));
    println!("{}", serde_json::to_string_pretty(&api)?);
    Ok(())
}
