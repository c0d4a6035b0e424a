use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use crate::core::scoring::{
    CITY_WEIGHT, COUNTRY_WEIGHT, COUNTY_WEIGHT, DISTANCE_WEIGHT, POSTAL_WEIGHT, STATE_WEIGHT,
    STREET_NAME_WEIGHT, STREET_NUMBER_WEIGHT,
};
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: Option<u64>,
}

impl GeocoderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(10))
    }
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoder_endpoint(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }
}

fn default_geocoder_endpoint() -> String {
    crate::services::GoogleGeocoder::DEFAULT_ENDPOINT.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_listings_path")]
    pub listings_path: String,
    #[serde(default = "default_boundaries_path")]
    pub boundaries_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            listings_path: default_listings_path(),
            boundaries_path: default_boundaries_path(),
        }
    }
}

fn default_listings_path() -> String { "data/listings.json".to_string() }
fn default_boundaries_path() -> String { "data/boundaries.json".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub max_capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

impl CacheSettings {
    pub fn capacity(&self) -> u64 {
        self.max_capacity.unwrap_or(10_000)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs.unwrap_or(3600))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_street_number_weight")]
    pub street_number: f64,
    #[serde(default = "default_street_name_weight")]
    pub street_name: f64,
    #[serde(default = "default_city_weight")]
    pub city: f64,
    #[serde(default = "default_county_weight")]
    pub county: f64,
    #[serde(default = "default_postal_weight")]
    pub postal: f64,
    #[serde(default = "default_state_weight")]
    pub state: f64,
    #[serde(default = "default_country_weight")]
    pub country: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            distance: default_distance_weight(),
            street_number: default_street_number_weight(),
            street_name: default_street_name_weight(),
            city: default_city_weight(),
            county: default_county_weight(),
            postal: default_postal_weight(),
            state: default_state_weight(),
            country: default_country_weight(),
        }
    }
}

fn default_distance_weight() -> f64 { DISTANCE_WEIGHT }
fn default_street_number_weight() -> f64 { STREET_NUMBER_WEIGHT }
fn default_street_name_weight() -> f64 { STREET_NAME_WEIGHT }
fn default_city_weight() -> f64 { CITY_WEIGHT }
fn default_county_weight() -> f64 { COUNTY_WEIGHT }
fn default_postal_weight() -> f64 { POSTAL_WEIGHT }
fn default_state_weight() -> f64 { STATE_WEIGHT }
fn default_country_weight() -> f64 { COUNTRY_WEIGHT }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            distance: config.distance,
            street_number: config.street_number,
            street_name: config.street_name,
            city: config.city,
            county: config.county,
            postal: config.postal,
            state: config.state,
            country: config.country,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingSettings {
    /// Apply `LOG_LEVEL` / `LOG_FORMAT` on top of the configured values
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(std::env::var("LOG_LEVEL").ok(), std::env::var("LOG_FORMAT").ok())
    }

    pub fn with_overrides(mut self, level: Option<String>, format: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.level = level;
        }
        if let Some(format) = format.filter(|f| !f.trim().is_empty()) {
            self.format = format;
        }
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with LOCATOR__)
    /// 4. GOOGLE_MAPS_API_KEY for the geocoder key
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., LOCATOR__SERVER__PORT -> server.port
            .add_source(env_source());

        with_api_key_override(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source());

        with_api_key_override(builder)?.build()?.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("LOCATOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn with_api_key_override(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    match std::env::var("GOOGLE_MAPS_API_KEY") {
        Ok(key) if !key.is_empty() => builder.set_override("geocoder.api_key", key),
        _ => Ok(builder),
    }
}
