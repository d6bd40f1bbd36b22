/// Per-point flood risk prediction.
///
/// The scorer is an additive point system, not probabilistic inference:
/// a small base score plus contributions from the two fetched signals
/// (nearest gauge height, forecast precipitation), a static geofence
/// bonus for historically flood-prone regions, and a hurricane-season
/// bonus keyed on the *prediction* month. The total is clamped to 0.80;
/// no point ever scores higher.
///
/// `score_signals` is the pure core: deterministic given the signals,
/// coordinate, and clock. The fetch wrappers around it are the only I/O.

use crate::config::ServiceConfig;
use crate::model::{Coordinate, PointRiskAssessment, RiskLevel, Route};
use crate::regions::region_bonus;
use crate::ingest::{nws, usgs};
use chrono::{DateTime, Datelike, Duration, Utc};

/// Baseline risk present everywhere at all times.
pub const BASE_RISK_SCORE: f64 = 0.02;

/// Hard ceiling on any point score.
pub const MAX_RISK_SCORE: f64 = 0.80;

/// Fixed prediction confidence. A stub for a future confidence model —
/// kept constant on purpose, not derived from inputs.
pub const PREDICTION_CONFIDENCE: f64 = 0.70;

/// Forecast horizon substituted when the requested one is out of range.
pub const DEFAULT_HOURS_AHEAD: i64 = 3;

/// Accepted forecast horizon, inclusive.
pub const MIN_HOURS_AHEAD: i64 = 2;
pub const MAX_HOURS_AHEAD: i64 = 6;

/// Atlantic hurricane season peak (August-October).
const HURRICANE_SEASON_MONTHS: [u32; 3] = [8, 9, 10];

/// Every 3rd intermediate step is sampled when extracting route waypoints.
const STEP_SAMPLE_STRIDE: usize = 3;

/// Clamps a requested forecast horizon into [2, 6] hours. Out-of-range
/// values silently become the default — callers rely on this instead of
/// getting an error.
pub fn clamp_hours_ahead(hours: i64) -> i64 {
    if (MIN_HOURS_AHEAD..=MAX_HOURS_AHEAD).contains(&hours) {
        hours
    } else {
        DEFAULT_HOURS_AHEAD
    }
}

// ---------------------------------------------------------------------------
// Signal contributions
// ---------------------------------------------------------------------------

/// Gauge-height contribution. Bands are mutually exclusive; only the
/// highest matching band applies.
fn gauge_contribution(height_ft: f64) -> f64 {
    if height_ft > 15.0 {
        0.50
    } else if height_ft > 12.0 {
        0.30
    } else if height_ft > 10.0 {
        0.15
    } else if height_ft > 8.0 {
        0.08
    } else if height_ft > 6.0 {
        0.03
    } else {
        0.0
    }
}

/// Precipitation contribution, same mutually-exclusive banding.
fn precipitation_contribution(inches: f64) -> f64 {
    if inches > 4.0 {
        0.40
    } else if inches > 3.0 {
        0.20
    } else if inches > 2.0 {
        0.10
    } else if inches > 1.0 {
        0.03
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Scores a point from already-fetched signals. Pure: identical inputs
/// and clock produce identical output. The clock feeds `prediction_time`
/// and the seasonal bonus only — no other scoring math depends on it.
pub fn score_signals(
    point: Coordinate,
    gauge_height_ft: f64,
    precipitation_in: f64,
    hours_ahead: i64,
    now: DateTime<Utc>,
) -> PointRiskAssessment {
    let hours_ahead = clamp_hours_ahead(hours_ahead);
    let prediction_time = now + Duration::hours(hours_ahead);

    let mut risk_score = BASE_RISK_SCORE;
    risk_score += gauge_contribution(gauge_height_ft);
    risk_score += precipitation_contribution(precipitation_in);
    risk_score += region_bonus(point);

    // Seasonal bonus keyed on the month being predicted for, not the
    // current month — a 23:00 Jul 31 prediction 3 hours out is an
    // August prediction.
    if HURRICANE_SEASON_MONTHS.contains(&prediction_time.month()) {
        risk_score += 0.02;
    }

    let risk_score = risk_score.min(MAX_RISK_SCORE);
    let risk_level = RiskLevel::from_score(risk_score);

    let mut key_factors = Vec::new();
    if gauge_height_ft > 8.0 {
        key_factors.push(format!("Stream gauge elevated: {:.1} ft", gauge_height_ft));
    } else if gauge_height_ft > 6.0 {
        key_factors.push(format!("Stream gauge above normal: {:.1} ft", gauge_height_ft));
    }
    if precipitation_in > 2.0 {
        key_factors.push(format!("Heavy rain forecast: {:.1} inches", precipitation_in));
    } else if precipitation_in > 1.0 {
        key_factors.push(format!("Moderate rain expected: {:.1} inches", precipitation_in));
    }
    // Most of the time, conditions are normal.
    if key_factors.is_empty() {
        if risk_score < 0.05 {
            key_factors.push("Normal conditions - minimal flood risk".to_string());
        } else {
            key_factors.push("Slightly elevated conditions".to_string());
        }
    }
    key_factors.truncate(3);

    PointRiskAssessment {
        location: point,
        risk_level,
        risk_score,
        confidence: PREDICTION_CONFIDENCE,
        prediction_time,
        current_time: now,
        hours_ahead,
        key_factors,
        segment_index: None,
    }
}

/// Fetches both signals for a coordinate and scores it. The fetchers
/// degrade to neutral defaults internally, so this cannot fail.
pub fn predict_flood_risk(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
    point: Coordinate,
    hours_ahead: i64,
) -> PointRiskAssessment {
    let gauge_height_ft = usgs::fetch_gauge_height(client, config, point);
    let precipitation_in = nws::fetch_precipitation(client, config, point);
    score_signals(point, gauge_height_ft, precipitation_in, hours_ahead, Utc::now())
}

/// Scores an ordered sequence of route waypoints, tagging each result
/// with its position. Order and length are preserved, duplicates and
/// all — no deduplication.
pub fn predict_route_segments(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
    points: &[Coordinate],
    hours_ahead: i64,
) -> Vec<PointRiskAssessment> {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let mut assessment = predict_flood_risk(client, config, *point, hours_ahead);
            assessment.segment_index = Some(i);
            assessment
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Waypoint sampling
// ---------------------------------------------------------------------------

/// Extracts prediction waypoints from a route: each leg contributes its
/// start, every 3rd intermediate step's start, and its end, concatenated
/// in leg order.
pub fn sample_route_points(route: &Route) -> Vec<Coordinate> {
    let mut points = Vec::new();

    for leg in &route.legs {
        points.push(leg.start_location);
        for step in leg.steps.iter().step_by(STEP_SAMPLE_STRIDE) {
            points.push(step.start_location);
        }
        points.push(leg.end_location);
    }

    points
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
