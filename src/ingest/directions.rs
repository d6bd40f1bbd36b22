/// Directions API client (route fetching with avoidance hints).
///
/// The routing provider returns routes as ordered legs, each with
/// start/end coordinates and steps; that is all the scorer needs, so
/// everything else in the payload is dropped at parse time. This is the
/// one upstream whose failure is terminal for a request — no route means
/// nothing to assess — so errors surface as `RiskError::RouteUnavailable`
/// instead of degrading to a default.

use crate::config::ServiceConfig;
use crate::model::{FetchError, RiskError, Route};
use serde::Deserialize;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Serde structures
// ---------------------------------------------------------------------------

// Leg/step shapes deserialize straight into the model Route types: the
// provider uses the same {lat, lng} field names.
#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Route>,
    #[serde(default)]
    status: String,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a directions request URL. `avoid` adds an avoidance constraint
/// (`"highways"` or `"tolls"`); `alternatives` asks the provider for more
/// than one route.
pub fn build_directions_url(
    config: &ServiceConfig,
    origin: &str,
    destination: &str,
    avoid: Option<&str>,
    alternatives: bool,
) -> String {
    let mut url = format!(
        "{}?origin={}&destination={}&key={}&departure_time=now",
        config.directions_base_url,
        urlencoding::encode(origin),
        urlencoding::encode(destination),
        urlencoding::encode(&config.directions_api_key),
    );
    if let Some(avoid) = avoid {
        url.push_str("&avoid=");
        url.push_str(avoid);
    }
    if alternatives {
        url.push_str("&alternatives=true");
    }
    url
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a directions response into routes.
///
/// # Errors
/// - `FetchError::ParseError` — malformed JSON.
/// - `FetchError::NoDataAvailable` — well-formed response with zero
///   routes (carries the provider's status string, e.g. `ZERO_RESULTS`).
pub fn parse_directions(json: &str) -> Result<Vec<Route>, FetchError> {
    let response: DirectionsResponse = serde_json::from_str(json)
        .map_err(|e| FetchError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if response.routes.is_empty() {
        return Err(FetchError::NoDataAvailable(format!(
            "provider returned no routes (status: {})",
            if response.status.is_empty() {
                "unknown"
            } else {
                &response.status
            }
        )));
    }

    Ok(response.routes)
}

// ---------------------------------------------------------------------------
// Fetch wrapper
// ---------------------------------------------------------------------------

/// Fetches one or more routes between two free-text endpoints.
pub fn fetch_routes(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
    origin: &str,
    destination: &str,
    avoid: Option<&str>,
    alternatives: bool,
) -> Result<Vec<Route>, RiskError> {
    let url = build_directions_url(config, origin, destination, avoid, alternatives);

    let result = client
        .get(&url)
        .timeout(Duration::from_secs(config.directions_timeout_secs))
        .send()
        .map_err(FetchError::from)
        .and_then(|response| {
            if !response.status().is_success() {
                return Err(FetchError::HttpError(response.status().as_u16()));
            }
            let body = response.text()?;
            parse_directions(&body)
        });

    result.map_err(|e| RiskError::RouteUnavailable(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
