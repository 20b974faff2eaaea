//! Configuration loading from TOML with environment variable overrides.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Parsing never reads the environment; the binary applies the
//! `MENUBOARD_PORT` override with [`AppConfig::apply_port_override`].

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides `server.port`.
pub const PORT_ENV: &str = "MENUBOARD_PORT";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub restaurant: RestaurantConfig,
    pub links: LinksConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RestaurantConfig {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    pub phone: String,
    /// Opening time, `"HH:MM"` (24h).
    pub opens_at: String,
    /// Closing time, `"HH:MM"` (24h). May be earlier than `opens_at`
    /// for service that runs past midnight.
    pub closes_at: String,
    /// UTC offset the service hours are written in, e.g. `"+05:30"`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

fn default_utc_offset() -> String {
    "+00:00".to_string()
}

/// Targets of the external-link buttons.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LinksConfig {
    pub order_url: String,
    pub maps_url: String,
    #[serde(default)]
    pub credit_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuConfig {
    #[serde(default = "default_menu_path")]
    pub path: PathBuf,
    /// Category highlighted when the display first loads.
    #[serde(default)]
    pub default_category: Option<String>,
}

fn default_menu_path() -> PathBuf {
    PathBuf::from(crate::storage::DEFAULT_MENU_FILE)
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            path: default_menu_path(),
            default_category: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub enabled: bool,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.restaurant.service_hours()?;
        config.restaurant.offset()?;
        Ok(config)
    }

    /// Replace `server.port` with `value` when one is given (the value of
    /// `MENUBOARD_PORT` in the binary).
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<()> {
        if let Some(port) = value {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV} is not a valid port: {port}"))?;
        }
        Ok(())
    }

    /// Resolve an environment variable name to its value.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}

impl RestaurantConfig {
    /// Parsed `(opens_at, closes_at)`.
    pub fn service_hours(&self) -> Result<(NaiveTime, NaiveTime)> {
        let parse = |field: &str, value: &str| {
            NaiveTime::parse_from_str(value.trim(), "%H:%M")
                .with_context(|| format!("Invalid {field} time (expected HH:MM): {value}"))
        };
        Ok((parse("opens_at", &self.opens_at)?, parse("closes_at", &self.closes_at)?))
    }

    /// Parsed `utc_offset`.
    pub fn offset(&self) -> Result<FixedOffset> {
        self.utc_offset
            .trim()
            .parse::<FixedOffset>()
            .with_context(|| format!("Invalid utc_offset (expected +HH:MM): {}", self.utc_offset))
    }

    /// Whether the kitchen is serving at `instant`, read in the
    /// restaurant's own offset.
    pub fn is_open_at_instant(&self, instant: DateTime<Utc>) -> Result<bool> {
        let local = instant.with_timezone(&self.offset()?).time();
        self.is_open_at(local)
    }

    /// Whether the kitchen is serving at `time`. Closing time is exclusive.
    pub fn is_open_at(&self, time: NaiveTime) -> Result<bool> {
        let (opens, closes) = self.service_hours()?;
        Ok(if opens <= closes {
            opens <= time && time < closes
        } else {
            time >= opens || time < closes
        })
    }

    /// Human-readable service window, e.g. `"12:00 PM – 11:00 PM"`.
    pub fn hours_label(&self) -> Result<String> {
        let (opens, closes) = self.service_hours()?;
        Ok(format!("{} – {}", opens.format("%I:%M %p"), closes.format("%I:%M %p")))
    }
}
