/// USGS NWIS Instantaneous Values (IV) API client.
///
/// Handles URL construction and JSON response parsing for the USGS Water
/// Services IV endpoint:
///   https://waterservices.usgs.gov/nwis/iv/
///
/// The IV service returns WaterML rendered as JSON. See `fixtures.rs` for
/// annotated examples of the response structure. Two queries exist: the
/// statewide gauge feed that populates the shared context, and the
/// nearest-gauge search behind the point scorer's gauge-height signal.

use crate::config::ServiceConfig;
use crate::model::{Coordinate, FetchError, RiskLevel, StreamGauge, PARAM_DISCHARGE, PARAM_STAGE};
use serde::Deserialize;

/// Neutral gauge height substituted when no plausible reading is found
/// or the fetch fails outright. Typical NJ streams sit at 2-5 ft.
pub const DEFAULT_GAUGE_HEIGHT_FT: f64 = 3.5;

// ---------------------------------------------------------------------------
// Serde structures for WaterML JSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct IvResponse {
    value: ValueWrapper,
}

#[derive(Deserialize)]
struct ValueWrapper {
    #[serde(rename = "timeSeries")]
    time_series: Vec<TimeSeries>,
}

#[derive(Deserialize)]
struct TimeSeries {
    #[serde(rename = "sourceInfo")]
    source_info: SourceInfo,
    variable: Variable,
    values: Vec<Values>,
}

#[derive(Deserialize)]
struct SourceInfo {
    #[serde(rename = "siteName")]
    site_name: String,
    #[serde(rename = "siteCode")]
    site_code: Vec<SiteCode>,
    #[serde(rename = "geoLocation", default)]
    geo_location: Option<GeoLocation>,
}

#[derive(Deserialize)]
struct SiteCode {
    value: String,
}

#[derive(Deserialize)]
struct GeoLocation {
    #[serde(rename = "geogLocation")]
    geog_location: GeogLocation,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GeogLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct Variable {
    #[serde(rename = "variableCode")]
    variable_code: Vec<VariableCode>,
    unit: Unit,
    #[serde(rename = "noDataValue", default = "default_no_data_value")]
    no_data_value: f64,
}

fn default_no_data_value() -> f64 {
    -999999.0
}

#[derive(Deserialize)]
struct VariableCode {
    value: String,
}

#[derive(Deserialize)]
struct Unit {
    #[serde(rename = "unitCode")]
    unit_code: String,
}

#[derive(Deserialize)]
struct Values {
    value: Vec<ValueEntry>,
}

#[derive(Deserialize)]
struct ValueEntry {
    value: String, // USGS returns measurements as strings!
    #[serde(rename = "dateTime")]
    date_time: String,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the statewide gauge-height feed URL with a recency window
/// (ISO 8601 period, e.g. `"PT1H"` for readings from the past hour).
pub fn build_feed_url(base: &str, state_cd: &str, period: &str) -> String {
    format!(
        "{}?stateCd={}&parameterCd={}&format=json&period={}",
        base, state_cd, PARAM_STAGE, period
    )
}

/// Builds the active-station gauge search URL used by the point scorer's
/// nearest-gauge lookup. No recency window — latest value per station.
pub fn build_search_url(base: &str, state_cd: &str) -> String {
    format!(
        "{}?stateCd={}&parameterCd={}&format=json&siteStatus=active",
        base, state_cd, PARAM_STAGE
    )
}

// ---------------------------------------------------------------------------
// Risk labeling
// ---------------------------------------------------------------------------

/// Labels a single reading with a flood-risk level, keyed on parameter
/// code. Thresholds are sized for NJ streams: stage readings (ft) flag
/// above 5/8, discharge readings (cfs) above 800/2000. Unknown parameter
/// codes default to low.
pub fn flood_risk_label(value: f64, parameter_code: &str) -> RiskLevel {
    match parameter_code {
        PARAM_STAGE => {
            if value > 8.0 {
                RiskLevel::High
            } else if value > 5.0 {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
        PARAM_DISCHARGE => {
            if value > 2000.0 {
                RiskLevel::High
            } else if value > 800.0 {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
        _ => RiskLevel::Low,
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a USGS IV API JSON response into a flat list of `StreamGauge`s,
/// one per `timeSeries` entry with a usable latest value and coordinates.
///
/// A malformed or incomplete entry is skipped, never fatal — one bad
/// gauge record must not abort the rest of the feed.
///
/// # Errors
/// - `FetchError::ParseError` — the envelope itself could not be
///   deserialized.
/// - `FetchError::NoDataAvailable` — every entry was empty, missing
///   coordinates, or carried the USGS sentinel value (`-999999`).
pub fn parse_gauges(json: &str) -> Result<Vec<StreamGauge>, FetchError> {
    let response: IvResponse = serde_json::from_str(json)
        .map_err(|e| FetchError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if response.value.time_series.is_empty() {
        return Err(FetchError::NoDataAvailable(
            "No timeSeries entries in response".to_string(),
        ));
    }

    let mut gauges = Vec::new();

    for series in response.value.time_series {
        let Some(site_code) = series.source_info.site_code.first() else {
            continue;
        };
        let site_code = site_code.value.clone();
        let site_name = series.source_info.site_name.clone();

        // Gauges without coordinates are useless for proximity work.
        let Some(geo) = series.source_info.geo_location.as_ref() else {
            continue;
        };
        let lat = geo.geog_location.latitude;
        let lng = geo.geog_location.longitude;
        if lat == 0.0 || lng == 0.0 {
            continue;
        }

        let Some(parameter_code) = series.variable.variable_code.first() else {
            continue;
        };
        let parameter_code = parameter_code.value.clone();
        let unit = series.variable.unit.unit_code.clone();
        let no_data_value = series.variable.no_data_value;

        // Most recent value is the last entry in the chronological array.
        let Some(latest) = series.values.first().and_then(|w| w.value.last()) else {
            continue;
        };
        let value: f64 = match latest.value.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        if (value - no_data_value).abs() < 0.1 {
            continue;
        }

        let flood_risk = flood_risk_label(value, &parameter_code);

        gauges.push(StreamGauge {
            site_code,
            site_name,
            location: Coordinate::new(lat, lng),
            parameter_code,
            value,
            unit,
            datetime: latest.date_time.clone(),
            flood_risk,
        });
    }

    if gauges.is_empty() {
        return Err(FetchError::NoDataAvailable(
            "All timeSeries entries were unusable".to_string(),
        ));
    }

    Ok(gauges)
}

// ---------------------------------------------------------------------------
// Nearest-gauge search
// ---------------------------------------------------------------------------

/// Picks the latest stage reading from the gauge nearest to `point`,
/// falling back to `DEFAULT_GAUGE_HEIGHT_FT` when nothing plausible is
/// in range.
///
/// Distance here is planar over raw degrees, not haversine. Gauges are
/// sparse enough that the distortion never changes the outcome in a
/// meaningful way; switching to great-circle distance would change
/// which gauge wins for some points, so leave it as-is.
/// Readings outside the plausibility band (0, 50) ft are ignored.
pub fn nearest_stage_height(gauges: &[StreamGauge], point: Coordinate) -> f64 {
    let mut closest_height = DEFAULT_GAUGE_HEIGHT_FT;
    let mut min_distance = f64::INFINITY;

    for gauge in gauges.iter().filter(|g| g.parameter_code == PARAM_STAGE) {
        let d_lat = point.lat - gauge.location.lat;
        let d_lng = point.lng - gauge.location.lng;
        let distance = (d_lat * d_lat + d_lng * d_lng).sqrt();

        if distance < min_distance && gauge.value > 0.0 && gauge.value < 50.0 {
            closest_height = gauge.value;
            min_distance = distance;
        }
    }

    closest_height
}

// ---------------------------------------------------------------------------
// Fetch wrappers
// ---------------------------------------------------------------------------

/// Fetches the statewide gauge feed for the shared context.
pub fn fetch_gauges(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Result<Vec<StreamGauge>, FetchError> {
    let url = build_feed_url(&config.usgs_base_url, &config.state_cd, &config.gauge_period);

    let response = client
        .get(&url)
        .timeout(std::time::Duration::from_secs(config.gauge_timeout_secs))
        .send()?;

    if !response.status().is_success() {
        return Err(FetchError::HttpError(response.status().as_u16()));
    }

    let body = response.text()?;
    parse_gauges(&body)
}

/// Gauge-height signal for the point scorer. Never fails: any transport
/// or parse problem yields the neutral default so scoring stays
/// available when USGS is unreachable.
pub fn fetch_gauge_height(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
    point: Coordinate,
) -> f64 {
    let url = build_search_url(&config.usgs_base_url, &config.state_cd);

    let result = client
        .get(&url)
        .timeout(std::time::Duration::from_secs(
            config.gauge_search_timeout_secs,
        ))
        .send()
        .map_err(FetchError::from)
        .and_then(|response| {
            if !response.status().is_success() {
                return Err(FetchError::HttpError(response.status().as_u16()));
            }
            let body = response.text()?;
            parse_gauges(&body)
        });

    match result {
        Ok(gauges) => nearest_stage_height(&gauges, point),
        Err(e) => {
            eprintln!("USGS gauge search failed, using default: {}", e);
            DEFAULT_GAUGE_HEIGHT_FT
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    // --- URL construction ---------------------------------------------------

    #[test]
    fn test_feed_url_targets_iv_endpoint_with_json_format() {
        let url = build_feed_url("https://waterservices.usgs.gov/nwis/iv/", "nj", "PT1H");
        assert!(
            url.contains("waterservices.usgs.gov/nwis/iv/"),
            "must target the IV endpoint, got: {}",
            url
        );
        assert!(url.contains("format=json"), "must request JSON format");
        assert!(url.contains("stateCd=nj"), "must filter by state");
        assert!(url.contains("period=PT1H"), "must include recency window");
        assert!(url.contains(PARAM_STAGE), "must request gauge height");
    }

    #[test]
    fn test_search_url_filters_to_active_sites_without_period() {
        let url = build_search_url("https://waterservices.usgs.gov/nwis/iv/", "nj");
        assert!(url.contains("siteStatus=active"));
        assert!(!url.contains("period="), "search has no recency window");
    }

    // --- Risk labeling ------------------------------------------------------

    #[test]
    fn test_stage_thresholds() {
        assert_eq!(flood_risk_label(8.1, PARAM_STAGE), RiskLevel::High);
        assert_eq!(flood_risk_label(8.0, PARAM_STAGE), RiskLevel::Medium);
        assert_eq!(flood_risk_label(5.1, PARAM_STAGE), RiskLevel::Medium);
        assert_eq!(flood_risk_label(5.0, PARAM_STAGE), RiskLevel::Low);
        assert_eq!(flood_risk_label(2.3, PARAM_STAGE), RiskLevel::Low);
    }

    #[test]
    fn test_discharge_thresholds_differ_from_stage() {
        assert_eq!(flood_risk_label(2500.0, PARAM_DISCHARGE), RiskLevel::High);
        assert_eq!(flood_risk_label(1000.0, PARAM_DISCHARGE), RiskLevel::Medium);
        assert_eq!(flood_risk_label(500.0, PARAM_DISCHARGE), RiskLevel::Low);
    }

    #[test]
    fn test_unknown_parameter_code_defaults_low() {
        assert_eq!(flood_risk_label(1e9, "00010"), RiskLevel::Low);
    }

    // --- Parsing: happy path ------------------------------------------------

    #[test]
    fn test_parse_statewide_feed_values_and_metadata() {
        let gauges = parse_gauges(fixture_nj_gauges_json())
            .expect("valid fixture should parse without error");

        let millstone = gauges
            .iter()
            .find(|g| g.site_code == "01403060")
            .expect("should find Millstone River gauge");
        assert_eq!(millstone.site_name, "Millstone River at Blackwells Mills NJ");
        assert_eq!(millstone.unit, "ft");
        assert!((millstone.value - 9.12).abs() < 0.001);
        assert_eq!(millstone.flood_risk, RiskLevel::High, "9.12 ft stage is high");
        assert!((millstone.location.lat - 40.4532).abs() < 1e-4);

        let rahway = gauges
            .iter()
            .find(|g| g.site_code == "01395000")
            .expect("should find Rahway River gauge");
        assert!((rahway.value - 2.31).abs() < 0.001);
        assert_eq!(rahway.flood_risk, RiskLevel::Low);
    }

    #[test]
    fn test_parse_skips_record_without_coordinates() {
        // Feed contains one good gauge and one with a missing geoLocation;
        // the bad record is dropped, the good one survives.
        let gauges = parse_gauges(fixture_gauge_missing_coords_json())
            .expect("partial data should still parse");
        assert_eq!(gauges.len(), 1, "only the georeferenced gauge survives");
        assert_eq!(gauges[0].site_code, "01395000");
    }

    // --- Parsing: error and edge cases --------------------------------------

    #[test]
    fn test_parse_sentinel_value_returns_no_data() {
        let result = parse_gauges(fixture_gauge_sentinel_json());
        assert!(
            matches!(result, Err(FetchError::NoDataAvailable(_))),
            "sentinel value -999999 should yield NoDataAvailable, got {:?}",
            result
        );
    }

    #[test]
    fn test_parse_malformed_json_returns_parse_error() {
        let result = parse_gauges("{ this is not valid json }}}");
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_parse_empty_time_series_returns_no_data() {
        let json = r#"{ "value": { "timeSeries": [] } }"#;
        let result = parse_gauges(json);
        assert!(matches!(result, Err(FetchError::NoDataAvailable(_))));
    }

    // --- Nearest-gauge search -----------------------------------------------

    #[test]
    fn test_nearest_search_picks_closest_stage_gauge() {
        let gauges = parse_gauges(fixture_nj_gauges_json()).unwrap();
        // Right next to the Millstone gauge (40.4532, -74.5876).
        let near_millstone = Coordinate::new(40.45, -74.59);
        assert!((nearest_stage_height(&gauges, near_millstone) - 9.12).abs() < 0.001);

        // Right next to the Rahway gauge (40.6076, -74.2846).
        let near_rahway = Coordinate::new(40.61, -74.28);
        assert!((nearest_stage_height(&gauges, near_rahway) - 2.31).abs() < 0.001);
    }

    #[test]
    fn test_nearest_search_ignores_implausible_readings() {
        let mut gauges = parse_gauges(fixture_nj_gauges_json()).unwrap();
        // Closest gauge reports an impossible 120 ft; the search must skip
        // it and take the next-nearest plausible reading.
        gauges[0].value = 120.0;
        let near_first = gauges[0].location;
        let height = nearest_stage_height(&gauges, near_first);
        assert!(
            height > 0.0 && height < 50.0,
            "implausible reading must not be selected, got {}",
            height
        );
    }

    #[test]
    fn test_nearest_search_empty_input_returns_default() {
        let point = Coordinate::new(40.0, -74.5);
        assert_eq!(nearest_stage_height(&[], point), DEFAULT_GAUGE_HEIGHT_FT);
    }
}
