//! menuboard — digital menu display
//!
//! Entry point. Loads configuration, initialises structured logging,
//! loads the menu, and either prints it as text (`--print`) or serves
//! the display until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use menuboard::config;
use menuboard::dashboard::{self, routes::DisplayState};
use menuboard::price::PriceShape;
use menuboard::render;
use menuboard::storage;
use menuboard::types::Menu;

const DEFAULT_CONFIG: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let mut config_path = DEFAULT_CONFIG.to_string();
    let mut print_only = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--print" => print_only = true,
            other => config_path = other.to_string(),
        }
    }

    let mut cfg = config::AppConfig::load(&config_path)?;
    let port_override = config::AppConfig::resolve_env(config::PORT_ENV).ok();
    cfg.apply_port_override(port_override.as_deref())?;

    init_logging();

    info!(
        restaurant = %cfg.restaurant.name,
        menu = %cfg.menu.path.display(),
        port = cfg.server.port,
        "menuboard starting up"
    );

    let menu = storage::load_menu(Some(cfg.menu.path.as_path()))?;
    log_price_summary(&menu);

    if print_only {
        print!("{}", render::render_text(&menu));
        return Ok(());
    }

    if !cfg.server.enabled {
        warn!("Display server disabled in config; nothing to do (try --print)");
        return Ok(());
    }

    let state = Arc::new(DisplayState::new(menu, &cfg));
    dashboard::serve(state, cfg.server.port, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received.");
    })
    .await?;

    info!("menuboard shut down cleanly.");
    Ok(())
}

/// Log how the menu's price texts classify, one field per shape.
fn log_price_summary(menu: &Menu) {
    let counts = menu.shape_counts();
    let count = |shape: PriceShape| counts.get(&shape).copied().unwrap_or(0);
    info!(
        complex = count(PriceShape::Complex),
        grouped = count(PriceShape::Grouped),
        half_full = count(PriceShape::HalfFull),
        simple = count(PriceShape::Simple),
        single = count(PriceShape::Single),
        "Price shapes"
    );
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("menuboard=info"));

    let json_logging = std::env::var("MENUBOARD_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
