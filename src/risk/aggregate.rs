/// Route-level risk aggregation.
///
/// Two variants exist and both are load-bearing:
///
/// - `assess_route_current` — current conditions only. Starts at low;
///   any Severe/Extreme alert forces high; a high-risk gauge or a user
///   report within 5 km of a leg endpoint raises low to medium.
/// - `assess_route_predictive` — fuses per-waypoint predictions with
///   live alerts and gauges. Its level rule (0.7/0.4 over max score,
///   0.3/0.5 over level fractions) is a second, independent threshold
///   scheme from the per-point classifier. Keep the two schemes
///   separate; they are not meant to agree.
///
/// Escalation is monotone and one-directional within a call: low can
/// become medium, nothing ever downgrades, and only the predictive
/// max/fraction rule itself produces high in that variant.

use crate::geo::haversine_km;
use crate::model::{
    AffectedSegment, FloodAlert, PointRiskAssessment, RiskLevel, Route, RouteRiskAssessment,
    RouteRiskLevel, RouteWarning, StreamGauge, UserReport, WarningKind,
};

/// User reports within this great-circle distance of a leg endpoint
/// count as "near the route".
pub const REPORT_PROXIMITY_KM: f64 = 5.0;

/// At most this many gauge warnings are attached per assessment.
const MAX_GAUGE_WARNINGS: usize = 3;

/// Joined factor strings in a predicted-flood warning are cut here.
const FACTOR_MESSAGE_LIMIT: usize = 100;

/// Leading characters of a user report kept in its warning message.
const REPORT_MESSAGE_LIMIT: usize = 50;

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

// ---------------------------------------------------------------------------
// Current-conditions variant
// ---------------------------------------------------------------------------

/// Assesses a route against live data only — no forecast horizon, no
/// point scoring. Used when the caller wants an immediate verdict.
pub fn assess_route_current(
    route: &Route,
    alerts: &[FloodAlert],
    gauges: &[StreamGauge],
    reports: &[UserReport],
) -> RouteRiskAssessment {
    if route.legs.is_empty() {
        return RouteRiskAssessment::unknown();
    }

    let mut risk_level = RouteRiskLevel::Low;
    let mut warnings = Vec::new();

    // Severe/Extreme alerts force the whole route to high.
    for alert in alerts.iter().filter(|a| a.severity.is_actionable()) {
        warnings.push(RouteWarning {
            kind: WarningKind::FloodAlert,
            message: format!("{}: {}", alert.event, alert.areas),
            severity: Some(alert.severity.as_str().to_string()),
            location: None,
            confidence: None,
        });
        risk_level = RouteRiskLevel::High;
    }

    // High-risk gauges raise low to medium, top 3 only.
    for gauge in gauges
        .iter()
        .filter(|g| g.flood_risk == RiskLevel::High)
        .take(MAX_GAUGE_WARNINGS)
    {
        warnings.push(RouteWarning {
            kind: WarningKind::HighWater,
            message: format!("High water levels detected near {}", gauge.site_name),
            severity: None,
            location: Some(gauge.location),
            confidence: None,
        });
        risk_level = risk_level.escalate_to_medium();
    }

    // User reports near any leg endpoint raise low to medium. A report
    // near several legs warns once per leg.
    for report in reports {
        for leg in &route.legs {
            let start_dist = haversine_km(report.location, leg.start_location);
            let end_dist = haversine_km(report.location, leg.end_location);

            if start_dist < REPORT_PROXIMITY_KM || end_dist < REPORT_PROXIMITY_KM {
                warnings.push(RouteWarning {
                    kind: WarningKind::UserReport,
                    message: format!(
                        "Reported flooding: {}...",
                        truncate_chars(&report.description, REPORT_MESSAGE_LIMIT)
                    ),
                    severity: None,
                    location: Some(report.location),
                    confidence: None,
                });
                risk_level = risk_level.escalate_to_medium();
            }
        }
    }

    RouteRiskAssessment {
        risk_level,
        warnings,
        affected_segments: Vec::new(),
        avg_risk_score: 0.0,
        max_risk_score: 0.0,
        hours_ahead: None,
        predictions: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Predictive variant
// ---------------------------------------------------------------------------

/// Fuses per-waypoint predictions with live alerts and gauges into a
/// route verdict for the given forecast horizon. `predictions` must be
/// the ordered output of the segment predictor for this route; user
/// reports do not participate in this variant.
pub fn assess_route_predictive(
    route: &Route,
    predictions: Vec<PointRiskAssessment>,
    alerts: &[FloodAlert],
    gauges: &[StreamGauge],
    hours_ahead: i64,
) -> RouteRiskAssessment {
    if route.legs.is_empty() {
        return RouteRiskAssessment::unknown();
    }

    let total = predictions.len();
    let high_count = predictions
        .iter()
        .filter(|p| p.risk_level == RiskLevel::High)
        .count();
    let medium_count = predictions
        .iter()
        .filter(|p| p.risk_level == RiskLevel::Medium)
        .count();

    let (avg_risk_score, max_risk_score) = if total > 0 {
        let sum: f64 = predictions.iter().map(|p| p.risk_score).sum();
        let max = predictions
            .iter()
            .map(|p| p.risk_score)
            .fold(f64::MIN, f64::max);
        (sum / total as f64, max)
    } else {
        (0.0, 0.0)
    };

    // Route-level threshold scheme, distinct from the per-point one.
    let mut risk_level = if max_risk_score >= 0.7 || high_count as f64 > total as f64 * 0.3 {
        RouteRiskLevel::High
    } else if max_risk_score >= 0.4 || medium_count as f64 > total as f64 * 0.5 {
        RouteRiskLevel::Medium
    } else {
        RouteRiskLevel::Low
    };

    let mut warnings = Vec::new();
    let mut affected_segments = Vec::new();

    // Predicted medium/high segments are recorded; high ones also warn.
    for (index, prediction) in predictions.iter().enumerate() {
        if prediction.risk_level == RiskLevel::Low {
            continue;
        }

        affected_segments.push(AffectedSegment {
            index,
            location: prediction.location,
            risk_level: prediction.risk_level,
            risk_score: prediction.risk_score,
            key_factors: prediction.key_factors.clone(),
        });

        if prediction.risk_level == RiskLevel::High {
            let factors = truncate_chars(
                &prediction.key_factors.join(", "),
                FACTOR_MESSAGE_LIMIT,
            );
            warnings.push(RouteWarning {
                kind: WarningKind::PredictedFlood,
                message: format!(
                    "High flood risk predicted in {} hours: {}",
                    hours_ahead, factors
                ),
                severity: Some("high".to_string()),
                location: Some(prediction.location),
                confidence: Some(prediction.confidence),
            });
        }
    }

    // Live alerts only nudge an otherwise-low route to medium here; the
    // predictive rule above owns the high verdict.
    for alert in alerts.iter().filter(|a| a.severity.is_actionable()) {
        warnings.push(RouteWarning {
            kind: WarningKind::CurrentAlert,
            message: format!("{}: {}", alert.event, alert.areas),
            severity: Some(alert.severity.as_str().to_string()),
            location: None,
            confidence: None,
        });
        risk_level = risk_level.escalate_to_medium();
    }

    // Current high gauges are informational in this variant: warned but
    // never escalating.
    for gauge in gauges
        .iter()
        .filter(|g| g.flood_risk == RiskLevel::High)
        .take(MAX_GAUGE_WARNINGS)
    {
        warnings.push(RouteWarning {
            kind: WarningKind::HighWaterCurrent,
            message: format!("Current high water: {}", gauge.site_name),
            severity: None,
            location: Some(gauge.location),
            confidence: None,
        });
    }

    RouteRiskAssessment {
        risk_level,
        warnings,
        affected_segments,
        avg_risk_score,
        max_risk_score,
        hours_ahead: Some(hours_ahead),
        predictions,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
