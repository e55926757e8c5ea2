//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section has serde
//! defaults so an empty file (or `Config::default()`) yields a working
//! setup pointed at the production geocoder.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub geocode: GeocodeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Geocoding collaborator endpoint and country restriction.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeConfig {
    #[serde(default = "default_geocode_url")]
    pub base_url: String,
    /// ISO country code appended to every geocode request.
    #[serde(default = "default_country")]
    pub country: String,
    /// API key sent with every geocode request. Empty is accepted so
    /// keyless local endpoints and mocks work.
    #[serde(default)]
    pub api_key: String,
}

fn default_geocode_url() -> String {
    "https://maps.googleapis.com/maps/api".into()
}

fn default_country() -> String {
    "GH".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Live listing store tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Seconds a freshly inserted listing keeps its "new arrival" flag.
    #[serde(default = "default_arrival_window")]
    pub new_arrival_window_secs: u64,
    /// Seconds to wait before retrying a dropped subscription.
    #[serde(default = "default_resubscribe_delay")]
    pub resubscribe_delay_secs: u64,
}

const fn default_arrival_window() -> u64 {
    5
}

const fn default_resubscribe_delay() -> u64 {
    2
}

/// Cluster/heatmap parameters handed to the map-rendering collaborator.
///
/// The core does not rasterize anything; it exposes these alongside the
/// filtered point set so the renderer can form clusters and weight the
/// heatmap consistently.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Cluster formation radius in screen pixels.
    #[serde(default = "default_cluster_radius")]
    pub cluster_radius: u32,
    /// Zoom level above which clustering disengages.
    #[serde(default = "default_cluster_max_zoom")]
    pub cluster_max_zoom: u8,
    /// Price at which heatmap weight saturates to 1.0.
    #[serde(default = "default_heatmap_ceiling")]
    pub heatmap_price_ceiling: Decimal,
    /// Zoom at which heatmap opacity starts fading out.
    #[serde(default = "default_fade_start")]
    pub heatmap_fade_start: u8,
    /// Zoom at which heatmap opacity reaches zero.
    #[serde(default = "default_fade_end")]
    pub heatmap_fade_end: u8,
}

const fn default_cluster_radius() -> u32 {
    50
}

const fn default_cluster_max_zoom() -> u8 {
    14
}

fn default_heatmap_ceiling() -> Decimal {
    Decimal::from(500_000)
}

const fn default_fade_start() -> u8 {
    14
}

const fn default_fade_end() -> u8 {
    15
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.geocode.base_url.is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if self.geocode.country.is_empty() {
            return Err(ConfigError::MissingField { field: "country" }.into());
        }
        if self.render.heatmap_fade_end < self.render.heatmap_fade_start {
            return Err(ConfigError::InvalidValue {
                field: "heatmap_fade_end",
                reason: "must be >= heatmap_fade_start".into(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocode: GeocodeConfig::default(),
            logging: LoggingConfig::default(),
            store: StoreConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocode_url(),
            country: default_country(),
            api_key: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            new_arrival_window_secs: default_arrival_window(),
            resubscribe_delay_secs: default_resubscribe_delay(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cluster_radius: default_cluster_radius(),
            cluster_max_zoom: default_cluster_max_zoom(),
            heatmap_price_ceiling: default_heatmap_ceiling(),
            heatmap_fade_start: default_fade_start(),
            heatmap_fade_end: default_fade_end(),
        }
    }
}
