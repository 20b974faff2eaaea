//! Menu source.
//!
//! Loads the static menu from a JSON file. The menu is read-only: parsed
//! prices are never written back, they are recomputed at display time.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::types::Menu;

/// Default menu file path.
pub const DEFAULT_MENU_FILE: &str = "data/menu.json";

/// Parse and validate a menu from a JSON string.
pub fn parse_menu(json: &str) -> Result<Menu> {
    let menu: Menu = serde_json::from_str(json).context("Failed to parse menu JSON")?;
    menu.validate().context("Menu failed validation")?;
    debug!(
        categories = menu.categories.len(),
        items = menu.item_count(),
        "Menu parsed"
    );
    Ok(menu)
}

/// Load the menu from a JSON file.
pub fn load_menu(path: Option<&Path>) -> Result<Menu> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_MENU_FILE));

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read menu from {}", path.display()))?;

    let menu = parse_menu(&json)
        .with_context(|| format!("Failed to load menu from {}", path.display()))?;

    info!(
        path = %path.display(),
        categories = menu.categories.len(),
        items = menu.item_count(),
        veg = menu.veg_items().count(),
        "Menu loaded from disk"
    );

    Ok(menu)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
