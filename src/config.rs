/// Service configuration loader - parses floodroute.toml
///
/// Separates upstream endpoints, region selection, timeouts, and the
/// refresh interval from code, making it easy to point the service at a
/// different state or a mock upstream without recompiling. The directions
/// API key is taken from the environment (via dotenv), never from the
/// config file.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Runtime configuration. Every field has a default so the service can
/// start with no config file at all; `floodroute.toml` overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    // Upstream endpoints
    #[serde(default = "default_usgs_base_url")]
    pub usgs_base_url: String,
    #[serde(default = "default_nws_base_url")]
    pub nws_base_url: String,
    #[serde(default = "default_directions_base_url")]
    pub directions_base_url: String,

    // Region selection
    #[serde(default = "default_state_cd")]
    pub state_cd: String, // USGS stateCd filter, lowercase
    #[serde(default = "default_alert_area")]
    pub alert_area: String, // NWS alert area, uppercase

    // Gauge query recency window (ISO 8601 period)
    #[serde(default = "default_gauge_period")]
    pub gauge_period: String,

    // Endpoint server
    #[serde(default = "default_endpoint_port")]
    pub endpoint_port: u16,

    // Refresh throttle for the shared alert/gauge collections
    #[serde(default = "default_refresh_interval_minutes")]
    pub refresh_interval_minutes: i64,

    // Per-upstream request timeouts, seconds
    #[serde(default = "default_alert_timeout_secs")]
    pub alert_timeout_secs: u64,
    #[serde(default = "default_gauge_timeout_secs")]
    pub gauge_timeout_secs: u64,
    #[serde(default = "default_forecast_timeout_secs")]
    pub forecast_timeout_secs: u64,
    #[serde(default = "default_gauge_search_timeout_secs")]
    pub gauge_search_timeout_secs: u64,
    #[serde(default = "default_directions_timeout_secs")]
    pub directions_timeout_secs: u64,

    /// Filled from the GOOGLE_MAPS_API_KEY environment variable, not
    /// from the file.
    #[serde(skip)]
    pub directions_api_key: String,
}

fn default_usgs_base_url() -> String {
    "https://waterservices.usgs.gov/nwis/iv/".to_string()
}
fn default_nws_base_url() -> String {
    "https://api.weather.gov".to_string()
}
fn default_directions_base_url() -> String {
    "https://maps.googleapis.com/maps/api/directions/json".to_string()
}
fn default_state_cd() -> String {
    "nj".to_string()
}
fn default_alert_area() -> String {
    "NJ".to_string()
}
fn default_gauge_period() -> String {
    "PT1H".to_string()
}
fn default_endpoint_port() -> u16 {
    8080
}
fn default_refresh_interval_minutes() -> i64 {
    30
}
fn default_alert_timeout_secs() -> u64 {
    10
}
fn default_gauge_timeout_secs() -> u64 {
    15
}
fn default_forecast_timeout_secs() -> u64 {
    3
}
fn default_gauge_search_timeout_secs() -> u64 {
    5
}
fn default_directions_timeout_secs() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        // Deserializing an empty table applies every serde default.
        toml::from_str("").expect("empty config must deserialize")
    }
}

impl ServiceConfig {
    /// Loads configuration from `floodroute.toml` in the working
    /// directory, falling back to defaults when the file is absent.
    ///
    /// # Panics
    /// Panics if the file exists but is malformed.
    pub fn load() -> Self {
        Self::load_from("floodroute.toml")
    }

    pub fn load_from(path: &str) -> Self {
        let mut config: ServiceConfig = if Path::new(path).exists() {
            let contents = fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));
            toml::from_str(&contents)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
        } else {
            ServiceConfig::default()
        };

        config.directions_api_key = env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default();
        config
    }
}
