/// Core data types for the flood-aware routing service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond level classification, no I/O, and no external
/// state — only types and their conversions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parameter codes
// ---------------------------------------------------------------------------

/// USGS parameter code for discharge (streamflow), in cubic feet per second.
pub const PARAM_DISCHARGE: &str = "00060";

/// USGS parameter code for gage height (stage), in feet.
pub const PARAM_STAGE: &str = "00065";

// ---------------------------------------------------------------------------
// Geography
// ---------------------------------------------------------------------------

/// A latitude/longitude pair. Plain value type, no validation on
/// construction — callers validate ranges at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }
}

// ---------------------------------------------------------------------------
// Risk levels
// ---------------------------------------------------------------------------

/// Discrete risk level for a single scored point or gauge reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classifies a point risk score using the fixed per-point thresholds.
    ///
    /// Note: the route aggregator uses a *different* threshold scheme
    /// (0.7/0.4 over max scores). The two schemes are independent and
    /// kept separate on purpose.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.50 {
            RiskLevel::High
        } else if score >= 0.15 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Overall risk level for a route. `Unknown` only when the route has no legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteRiskLevel {
    Unknown,
    Low,
    Medium,
    High,
}

impl RouteRiskLevel {
    /// One-directional escalation used by warning fusion: low becomes
    /// medium, anything else is left alone. Nothing downgrades.
    pub fn escalate_to_medium(self) -> Self {
        match self {
            RouteRiskLevel::Low => RouteRiskLevel::Medium,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteRiskLevel::Unknown => "unknown",
            RouteRiskLevel::Low => "low",
            RouteRiskLevel::Medium => "medium",
            RouteRiskLevel::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Point predictions
// ---------------------------------------------------------------------------

/// Flood risk prediction for a single coordinate at a forecast horizon.
///
/// Created fresh on every scoring call, never persisted. `risk_score` is
/// always within [0.0, 0.80] and `risk_level` is derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct PointRiskAssessment {
    pub location: Coordinate,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    /// Fixed at 0.70 — placeholder for a future confidence model.
    pub confidence: f64,
    pub prediction_time: DateTime<Utc>,
    pub current_time: DateTime<Utc>,
    pub hours_ahead: i64,
    /// Up to 3 human-readable contributing factors, gauge text first,
    /// then precipitation text, then a fallback line. Never empty.
    pub key_factors: Vec<String>,
    /// Position within a route sample sequence; absent for standalone
    /// point predictions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_index: Option<usize>,
}

// ---------------------------------------------------------------------------
// Route aggregates
// ---------------------------------------------------------------------------

/// Warning categories emitted by route aggregation, in fusion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// High-risk segment predicted along the route (predictive variant).
    PredictedFlood,
    /// Severe/Extreme hazard alert, current-conditions variant.
    FloodAlert,
    /// Severe/Extreme hazard alert, predictive variant.
    CurrentAlert,
    /// High water at a gauge, current-conditions variant.
    HighWater,
    /// High water at a gauge, predictive variant.
    HighWaterCurrent,
    /// User-submitted flooding report near the route.
    UserReport,
}

/// One warning attached to a route assessment. Optional fields vary by
/// source: alerts carry severity, gauges and reports carry a location,
/// predicted segments carry both severity and confidence.
#[derive(Debug, Clone, Serialize)]
pub struct RouteWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A route segment whose predicted level is medium or high.
#[derive(Debug, Clone, Serialize)]
pub struct AffectedSegment {
    pub index: usize,
    pub location: Coordinate,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub key_factors: Vec<String>,
}

/// Aggregate flood risk verdict over a route.
///
/// Aggregates many `PointRiskAssessment`s plus externally supplied alerts,
/// gauges, and user reports — it does not own them. `avg_risk_score` and
/// `max_risk_score` are 0.0 when there are no scored segments (the
/// current-conditions variant scores none).
#[derive(Debug, Clone, Serialize)]
pub struct RouteRiskAssessment {
    pub risk_level: RouteRiskLevel,
    pub warnings: Vec<RouteWarning>,
    pub affected_segments: Vec<AffectedSegment>,
    pub avg_risk_score: f64,
    pub max_risk_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_ahead: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub predictions: Vec<PointRiskAssessment>,
}

impl RouteRiskAssessment {
    /// Assessment for a route with no legs: level unknown, nothing else.
    pub fn unknown() -> Self {
        RouteRiskAssessment {
            risk_level: RouteRiskLevel::Unknown,
            warnings: Vec::new(),
            affected_segments: Vec::new(),
            avg_risk_score: 0.0,
            max_risk_score: 0.0,
            hours_ahead: None,
            predictions: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Live feed records
// ---------------------------------------------------------------------------

/// Alert urgency from the hazard feed. Only Severe and Extreme participate
/// in risk fusion; everything else is carried but ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertSeverity {
    Minor,
    Moderate,
    Severe,
    Extreme,
    Unknown,
}

impl AlertSeverity {
    pub fn parse(s: &str) -> Self {
        match s {
            "Minor" => AlertSeverity::Minor,
            "Moderate" => AlertSeverity::Moderate,
            "Severe" => AlertSeverity::Severe,
            "Extreme" => AlertSeverity::Extreme,
            _ => AlertSeverity::Unknown,
        }
    }

    /// Whether this severity is strong enough to affect route scoring.
    pub fn is_actionable(&self) -> bool {
        matches!(self, AlertSeverity::Severe | AlertSeverity::Extreme)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Minor => "Minor",
            AlertSeverity::Moderate => "Moderate",
            AlertSeverity::Severe => "Severe",
            AlertSeverity::Extreme => "Extreme",
            AlertSeverity::Unknown => "Unknown",
        }
    }
}

/// An active flood alert from the hazard-alert feed.
#[derive(Debug, Clone, Serialize)]
pub struct FloodAlert {
    pub id: String,
    pub event: String,
    pub severity: AlertSeverity,
    pub description: String,
    pub areas: String,
    pub expires: String,
}

/// A stream gauge's latest reading, with a derived risk label from the
/// parameter-code keyed threshold classifier in `ingest::usgs`.
#[derive(Debug, Clone, Serialize)]
pub struct StreamGauge {
    pub site_code: String,
    pub site_name: String,
    pub location: Coordinate,
    pub parameter_code: String,
    pub value: f64,
    pub unit: String,
    pub datetime: String, // ISO 8601, as reported upstream
    pub flood_risk: RiskLevel,
}

/// A user-submitted flooding report. `verified` is always false at
/// creation; no verification workflow exists in this service.
#[derive(Debug, Clone, Serialize)]
pub struct UserReport {
    pub id: usize,
    pub location: Coordinate,
    pub description: String,
    pub user_email: String,
    pub timestamp: DateTime<Utc>,
    pub verified: bool,
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// A step within a leg. Only the start coordinate matters for waypoint
/// sampling; the rest of the provider payload is dropped at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub start_location: Coordinate,
}

/// One leg of a driving route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub start_location: Coordinate,
    pub end_location: Coordinate,
    pub steps: Vec<RouteStep>,
}

/// A driving route as an ordered sequence of legs. `PartialEq` is used to
/// deduplicate alternatives identical to the primary route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub legs: Vec<RouteLeg>,
    /// Short summary from the routing provider (e.g. road names), if any.
    #[serde(default)]
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// The only two conditions surfaced across the scorer/aggregator boundary.
/// Everything else degrades to a documented neutral default internally.
#[derive(Debug, PartialEq)]
pub enum RiskError {
    /// The routing provider returned no usable route. Terminal for the
    /// request: without a route there is nothing to assess.
    RouteUnavailable(String),
    /// Missing or out-of-range caller input, rejected before any
    /// external call is made.
    InvalidInput(String),
}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskError::RouteUnavailable(msg) => write!(f, "Route unavailable: {}", msg),
            RiskError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for RiskError {}

/// Errors that can arise when fetching or parsing an upstream feed.
/// These never cross the scorer boundary — fetch wrappers convert them
/// into neutral defaults and log the failure.
#[derive(Debug, PartialEq)]
pub enum FetchError {
    /// Non-2xx HTTP response from the upstream API.
    HttpError(u16),
    /// The response body could not be deserialized.
    ParseError(String),
    /// Structurally valid response with no usable records.
    NoDataAvailable(String),
    /// Transport-level failure (timeout, connection refused, DNS).
    Transport(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::HttpError(code) => write!(f, "HTTP error: {}", code),
            FetchError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            FetchError::NoDataAvailable(msg) => write!(f, "No data available: {}", msg),
            FetchError::Transport(msg) => write!(f, "Transport error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            FetchError::HttpError(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_thresholds_are_exact() {
        assert_eq!(RiskLevel::from_score(0.50), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.499), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.15), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.149), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.80), RiskLevel::High);
    }

    #[test]
    fn test_level_is_monotone_in_score() {
        let scores = [0.0, 0.02, 0.10, 0.15, 0.30, 0.50, 0.65, 0.80];
        let mut last = RiskLevel::Low;
        for s in scores {
            let level = RiskLevel::from_score(s);
            let rank = |l: RiskLevel| match l {
                RiskLevel::Low => 0,
                RiskLevel::Medium => 1,
                RiskLevel::High => 2,
            };
            assert!(
                rank(level) >= rank(last),
                "level must not decrease as score increases (score {})",
                s
            );
            last = level;
        }
    }

    #[test]
    fn test_escalation_only_raises_low() {
        assert_eq!(
            RouteRiskLevel::Low.escalate_to_medium(),
            RouteRiskLevel::Medium
        );
        assert_eq!(
            RouteRiskLevel::Medium.escalate_to_medium(),
            RouteRiskLevel::Medium,
            "medium must not escalate further"
        );
        assert_eq!(
            RouteRiskLevel::High.escalate_to_medium(),
            RouteRiskLevel::High,
            "high must never change"
        );
        assert_eq!(
            RouteRiskLevel::Unknown.escalate_to_medium(),
            RouteRiskLevel::Unknown
        );
    }

    #[test]
    fn test_severity_parse_and_actionability() {
        assert_eq!(AlertSeverity::parse("Severe"), AlertSeverity::Severe);
        assert_eq!(AlertSeverity::parse("Extreme"), AlertSeverity::Extreme);
        assert_eq!(AlertSeverity::parse("Moderate"), AlertSeverity::Moderate);
        assert_eq!(AlertSeverity::parse("garbage"), AlertSeverity::Unknown);

        assert!(AlertSeverity::Severe.is_actionable());
        assert!(AlertSeverity::Extreme.is_actionable());
        assert!(!AlertSeverity::Minor.is_actionable());
        assert!(!AlertSeverity::Moderate.is_actionable());
        assert!(!AlertSeverity::Unknown.is_actionable());
    }

    #[test]
    fn test_route_equality_for_deduplication() {
        let leg = RouteLeg {
            start_location: Coordinate::new(40.0, -74.5),
            end_location: Coordinate::new(40.1, -74.4),
            steps: vec![RouteStep {
                start_location: Coordinate::new(40.05, -74.45),
            }],
        };
        let a = Route {
            legs: vec![leg.clone()],
            summary: "US-1".to_string(),
        };
        let b = Route {
            legs: vec![leg],
            summary: "US-1".to_string(),
        };
        assert_eq!(a, b, "identical routes must compare equal");
    }

    #[test]
    fn test_warning_serializes_type_field_and_omits_empty_options() {
        let warning = RouteWarning {
            kind: WarningKind::HighWater,
            message: "High water levels detected near Test Gauge".to_string(),
            severity: None,
            location: Some(Coordinate::new(40.0, -74.0)),
            confidence: None,
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["type"], "high_water");
        assert!(json.get("severity").is_none(), "severity should be omitted");
        assert!(json.get("confidence").is_none());
        assert_eq!(json["location"]["lat"], 40.0);
    }
}
