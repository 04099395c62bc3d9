pub mod config;
pub mod menu;
pub mod replay;
pub mod simulate;

use std::path::Path;

use airmenu_common::error::{AirmenuError, AirmenuResult};
use airmenu_kiosk_model::menu::Menu;

/// The catalog at `path`, or the built-in one.
pub fn load_menu(path: Option<&Path>) -> AirmenuResult<Menu> {
    let Some(path) = path else {
        return Ok(Menu::builtin());
    };
    if !path.exists() {
        return Err(AirmenuError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let json = std::fs::read_to_string(path)?;
    let menu = Menu::from_json(&json)
        .map_err(|e| AirmenuError::catalog(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), items = menu.items.len(), "Loaded catalog");
    Ok(menu)
}
