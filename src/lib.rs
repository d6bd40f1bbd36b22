/// floodroute_service: flood-risk scoring and flood-aware routing service.
///
/// # Module structure
///
/// ```text
/// floodroute_service
/// ├── model       — shared data types (Coordinate, RouteRiskAssessment, RiskError, …)
/// ├── config      — service configuration loader (floodroute.toml + env)
/// ├── geo         — great-circle distance helper
/// ├── regions     — flood-prone region registry with risk bonuses
/// ├── service     — live-data context (alerts, gauges, user reports) + refresh
/// ├── endpoint    — JSON HTTP API (predict, route, predictive route, report)
/// ├── ingest
/// │   ├── usgs       — USGS NWIS IV API: gauge feed + nearest-stage lookup
/// │   ├── nws        — NWS alerts + gridpoint forecast precipitation
/// │   ├── directions — routing provider client (routes with legs and steps)
/// │   └── fixtures (test only) — representative API response payloads
/// └── risk
///     ├── predictor  — per-point additive scorer + route waypoint sampling
///     ├── aggregate  — route-level fusion (current + predictive variants)
///     └── selector   — alternative-route comparison for high-risk primaries
/// ```

/// Public modules
pub mod config;
pub mod endpoint;
pub mod geo;
pub mod ingest;
pub mod model;
pub mod regions;
pub mod risk;
pub mod service;
