/// Flood-risk scoring engine.
///
/// - `predictor` — per-point additive scorer and route waypoint sampling
/// - `aggregate` — route-level fusion of predictions with live alerts,
///   gauges, and user reports (current and predictive variants)
/// - `selector` — alternative-route comparison for high-risk primaries

pub mod aggregate;
pub mod predictor;
pub mod selector;
