/// NWS (api.weather.gov) client: flood alerts and forecast text.
///
/// Two independent concerns share this provider:
/// - the active flood-alert feed (GeoJSON features) that populates the
///   shared context, and
/// - the two-step point forecast lookup whose detailed-forecast text is
///   classified into a precipitation estimate for the point scorer.
///
/// Precipitation classification is keyword precedence over lowercased
/// text, strongest keyword first. A fetch failure yields 0.0 inches —
/// absence of signal must read as "no rain", never as elevated risk.

use crate::config::ServiceConfig;
use crate::model::{AlertSeverity, FetchError, FloodAlert};
use crate::model::Coordinate;
use serde::Deserialize;
use std::time::Duration;

/// Event filter for the alert feed; the service only cares about flood
/// products.
pub const ALERT_EVENTS: &str = "Flood Warning,Flash Flood Warning,Flood Watch,Flash Flood Watch";

// ---------------------------------------------------------------------------
// Serde structures: alerts (GeoJSON)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

#[derive(Deserialize)]
struct AlertFeature {
    #[serde(default)]
    properties: AlertProperties,
}

// Every field defaulted: a half-populated alert still becomes a record,
// and a totally empty one is dropped below.
#[derive(Deserialize, Default)]
#[serde(default)]
struct AlertProperties {
    id: String,
    event: String,
    severity: String,
    description: String,
    #[serde(rename = "areaDesc")]
    area_desc: String,
    expires: String,
}

// ---------------------------------------------------------------------------
// Serde structures: point forecast (two-step lookup)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PointsProperties {
    forecast: Option<String>,
}

#[derive(Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ForecastPeriod {
    #[serde(rename = "detailedForecast")]
    detailed_forecast: String,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the active-alerts URL for an area, filtered to flood events.
pub fn build_alerts_url(base: &str, area: &str) -> String {
    format!(
        "{}/alerts?area={}&event={}",
        base,
        area,
        urlencoding::encode(ALERT_EVENTS)
    )
}

/// Builds the point-metadata URL that yields the forecast URL for a
/// coordinate.
pub fn build_points_url(base: &str, point: Coordinate) -> String {
    format!("{}/points/{},{}", base, point.lat, point.lng)
}

// ---------------------------------------------------------------------------
// Alert parsing
// ---------------------------------------------------------------------------

/// Parses a GeoJSON alert response into `FloodAlert` records. Features
/// with no id and no event are dropped; everything else is kept with
/// whatever fields were present.
///
/// # Errors
/// - `FetchError::ParseError` — the envelope could not be deserialized.
pub fn parse_alerts(json: &str) -> Result<Vec<FloodAlert>, FetchError> {
    let response: AlertsResponse = serde_json::from_str(json)
        .map_err(|e| FetchError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let alerts = response
        .features
        .into_iter()
        .map(|f| f.properties)
        .filter(|p| !p.id.is_empty() || !p.event.is_empty())
        .map(|p| FloodAlert {
            id: p.id,
            event: p.event,
            severity: AlertSeverity::parse(&p.severity),
            description: p.description,
            areas: p.area_desc,
            expires: p.expires,
        })
        .collect();

    Ok(alerts)
}

// ---------------------------------------------------------------------------
// Precipitation classification
// ---------------------------------------------------------------------------

/// Classifies detailed-forecast text into an estimated precipitation
/// amount in inches. Case-insensitive keyword precedence; the strongest
/// matching keyword wins.
pub fn classify_forecast_text(text: &str) -> f64 {
    let text = text.to_lowercase();

    if text.contains("flood") {
        4.0 // an actual flood mention in the forecast
    } else if text.contains("heavy rain") {
        2.5
    } else if text.contains("thunderstorm") {
        1.5
    } else if text.contains("rain") || text.contains("shower") {
        0.8
    } else if text.contains("drizzle") || text.contains("light rain") {
        0.2
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Fetch wrappers
// ---------------------------------------------------------------------------

/// Fetches active flood alerts for the configured area.
pub fn fetch_alerts(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Result<Vec<FloodAlert>, FetchError> {
    let url = build_alerts_url(&config.nws_base_url, &config.alert_area);

    let response = client
        .get(&url)
        .timeout(Duration::from_secs(config.alert_timeout_secs))
        .send()?;

    if !response.status().is_success() {
        return Err(FetchError::HttpError(response.status().as_u16()));
    }

    let body = response.text()?;
    parse_alerts(&body)
}

/// Precipitation signal for the point scorer: resolve the coordinate to
/// its forecast URL, fetch the forecast, classify the first period's
/// detailed text. Never fails — any missing piece yields 0.0 inches.
pub fn fetch_precipitation(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
    point: Coordinate,
) -> f64 {
    match fetch_forecast_text(client, config, point) {
        Ok(text) => classify_forecast_text(&text),
        Err(e) => {
            eprintln!("NWS forecast lookup failed, assuming no rain: {}", e);
            0.0
        }
    }
}

fn fetch_forecast_text(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
    point: Coordinate,
) -> Result<String, FetchError> {
    let timeout = Duration::from_secs(config.forecast_timeout_secs);

    let points_url = build_points_url(&config.nws_base_url, point);
    let response = client.get(&points_url).timeout(timeout).send()?;
    if !response.status().is_success() {
        return Err(FetchError::HttpError(response.status().as_u16()));
    }
    let points: PointsResponse = serde_json::from_str(&response.text()?)
        .map_err(|e| FetchError::ParseError(format!("points response: {}", e)))?;

    let forecast_url = points
        .properties
        .forecast
        .ok_or_else(|| FetchError::NoDataAvailable("no forecast URL for point".to_string()))?;

    let response = client.get(&forecast_url).timeout(timeout).send()?;
    if !response.status().is_success() {
        return Err(FetchError::HttpError(response.status().as_u16()));
    }
    let forecast: ForecastResponse = serde_json::from_str(&response.text()?)
        .map_err(|e| FetchError::ParseError(format!("forecast response: {}", e)))?;

    forecast
        .properties
        .periods
        .into_iter()
        .next()
        .map(|p| p.detailed_forecast)
        .ok_or_else(|| FetchError::NoDataAvailable("forecast has no periods".to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
