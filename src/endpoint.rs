/// HTTP endpoint for flood-aware routing queries.
///
/// Thin JSON layer over the scoring engine. Every response uses the
/// `{"ok": bool, ...}` envelope; validation failures reject before any
/// external call is made.
///
/// Endpoints:
/// - GET  /health                      - Service health check
/// - POST /api/predict-flood           - Point prediction
/// - POST /api/flood-route             - Route + current-conditions risk
/// - POST /api/flood-route-predictive  - Route + predictive risk and
///                                       alternative selection
/// - POST /api/flood-report            - Submit a user flood report

use crate::config::ServiceConfig;
use crate::ingest::directions;
use crate::model::{Coordinate, RiskError, Route, RouteRiskLevel};
use crate::risk::aggregate::{assess_route_current, assess_route_predictive};
use crate::risk::predictor::{
    clamp_hours_ahead, predict_flood_risk, predict_route_segments, sample_route_points,
};
use crate::risk::selector::select_best_route;
use crate::service::FloodData;
use chrono::Utc;
use serde::Deserialize;
use std::io::Read;

/// Everything a request handler needs: config, HTTP client, and the
/// shared live-data context.
pub struct AppState {
    pub config: ServiceConfig,
    pub client: reqwest::blocking::Client,
    pub data: FloodData,
}

// ---------------------------------------------------------------------------
// Request Types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PredictRequest {
    latitude: Option<f64>,
    longitude: Option<f64>,
    hours_ahead: Option<i64>,
}

#[derive(Deserialize)]
struct RouteRequest {
    origin: Option<String>,
    destination: Option<String>,
    hours_ahead: Option<i64>,
}

#[derive(Deserialize)]
struct ReportRequest {
    latitude: Option<f64>,
    longitude: Option<f64>,
    description: Option<String>,
    user_email: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Checks presence and numeric range of a submitted coordinate pair.
fn validate_coordinate(lat: Option<f64>, lng: Option<f64>) -> Result<Coordinate, RiskError> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(RiskError::InvalidInput("Location required".to_string()));
    };
    if !(-90.0..=90.0).contains(&lat) {
        return Err(RiskError::InvalidInput(format!(
            "Latitude {} out of range [-90, 90]",
            lat
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(RiskError::InvalidInput(format!(
            "Longitude {} out of range [-180, 180]",
            lng
        )));
    }
    Ok(Coordinate::new(lat, lng))
}

fn validate_endpoints(
    origin: &Option<String>,
    destination: &Option<String>,
) -> Result<(String, String), RiskError> {
    match (origin, destination) {
        (Some(o), Some(d)) if !o.trim().is_empty() && !d.trim().is_empty() => {
            Ok((o.clone(), d.clone()))
        }
        _ => Err(RiskError::InvalidInput(
            "Origin and destination required".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

type JsonResponse = tiny_http::Response<std::io::Cursor<Vec<u8>>>;

fn handle_predict(state: &AppState, body: &str) -> JsonResponse {
    let request: PredictRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(_) => return error_response(400, "Invalid JSON body"),
    };

    let point = match validate_coordinate(request.latitude, request.longitude) {
        Ok(p) => p,
        Err(e) => return error_response(400, &e.to_string()),
    };
    let hours_ahead = clamp_hours_ahead(request.hours_ahead.unwrap_or(3));

    let prediction = predict_flood_risk(&state.client, &state.config, point, hours_ahead);
    ok_response(serde_json::json!({ "prediction": prediction }))
}

fn handle_flood_route(state: &mut AppState, body: &str) -> JsonResponse {
    let request: RouteRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(_) => return error_response(400, "Invalid JSON body"),
    };
    let (origin, destination) = match validate_endpoints(&request.origin, &request.destination) {
        Ok(pair) => pair,
        Err(e) => return error_response(400, &e.to_string()),
    };

    refresh_if_stale(state);

    let primary = match fetch_first_route(state, &origin, &destination, None) {
        Ok(route) => route,
        Err(e) => return error_response(502, &e.to_string()),
    };

    let risk = assess_route_current(
        &primary,
        &state.data.alerts,
        &state.data.gauges,
        &state.data.reports,
    );

    // One avoidance attempt for a high-risk primary; a provider with no
    // highway-free route is not an error here.
    let alternative = if risk.risk_level == RouteRiskLevel::High {
        fetch_first_route(state, &origin, &destination, Some("highways"))
            .ok()
            .map(|alt| {
                let alt_risk = assess_route_current(
                    &alt,
                    &state.data.alerts,
                    &state.data.gauges,
                    &state.data.reports,
                );
                serde_json::json!({ "route": alt, "flood_risk": alt_risk })
            })
    } else {
        None
    };

    ok_response(serde_json::json!({
        "primary_route": primary,
        "flood_risk": risk,
        "alternative_route": alternative,
        "data_last_updated": state.data.last_update.map(|d| d.to_rfc3339()),
    }))
}

fn handle_flood_route_predictive(state: &mut AppState, body: &str) -> JsonResponse {
    let request: RouteRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(_) => return error_response(400, "Invalid JSON body"),
    };
    let (origin, destination) = match validate_endpoints(&request.origin, &request.destination) {
        Ok(pair) => pair,
        Err(e) => return error_response(400, &e.to_string()),
    };
    let hours_ahead = clamp_hours_ahead(request.hours_ahead.unwrap_or(3));

    refresh_if_stale(state);

    let primary = match fetch_first_route(state, &origin, &destination, None) {
        Ok(route) => route,
        Err(e) => return error_response(502, &e.to_string()),
    };

    let client = &state.client;
    let config = &state.config;
    let data = &state.data;

    let mut assess = |route: &Route| {
        let points = sample_route_points(route);
        let predictions = predict_route_segments(client, config, &points, hours_ahead);
        assess_route_predictive(route, predictions, &data.alerts, &data.gauges, hours_ahead)
    };

    let primary_risk = assess(&primary);

    let choice = select_best_route(
        primary.clone(),
        primary_risk.clone(),
        |avoid| {
            directions::fetch_routes(client, config, &origin, &destination, Some(avoid), false)
                .ok()
                .and_then(|routes| routes.into_iter().next())
        },
        &mut assess,
    );

    ok_response(serde_json::json!({
        "recommended_route": choice.route,
        "recommended_risk": choice.assessment,
        "route_type": choice.route_type,
        "primary_route": primary,
        "primary_risk": primary_risk,
        "alternatives": choice.alternatives,
        "prediction_hours": hours_ahead,
        "data_last_updated": data.last_update.map(|d| d.to_rfc3339()),
    }))
}

fn handle_flood_report(state: &mut AppState, body: &str) -> JsonResponse {
    let request: ReportRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(_) => return error_response(400, "Invalid JSON body"),
    };

    let point = match validate_coordinate(request.latitude, request.longitude) {
        Ok(p) => p,
        Err(e) => return error_response(400, &e.to_string()),
    };
    let description = match request.description {
        Some(d) if !d.trim().is_empty() => d,
        _ => return error_response(400, "Description required"),
    };

    let report = state
        .data
        .add_user_report(point, description, request.user_email);
    ok_response(serde_json::json!({ "report": report }))
}

fn handle_health() -> JsonResponse {
    create_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": "floodroute_service",
        }),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn refresh_if_stale(state: &mut AppState) {
    if state
        .data
        .should_update(Utc::now(), state.config.refresh_interval_minutes)
    {
        println!("Flood data stale, refreshing...");
        state.data.refresh(&state.client, &state.config);
    }
}

fn fetch_first_route(
    state: &AppState,
    origin: &str,
    destination: &str,
    avoid: Option<&str>,
) -> Result<Route, RiskError> {
    directions::fetch_routes(&state.client, &state.config, origin, destination, avoid, false)?
        .into_iter()
        .next()
        .ok_or_else(|| RiskError::RouteUnavailable("provider returned no routes".to_string()))
}

fn ok_response(data: serde_json::Value) -> JsonResponse {
    create_response(200, serde_json::json!({ "ok": true, "data": data }))
}

fn error_response(status: u16, message: &str) -> JsonResponse {
    create_response(status, serde_json::json!({ "ok": false, "error": message }))
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: serde_json::Value) -> JsonResponse {
    let body = serde_json::to_string_pretty(&json).unwrap();

    tiny_http::Response::from_data(body.into_bytes())
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
        )
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start the endpoint server on the specified port. Runs the request
/// loop forever; returns only on a bind failure.
pub fn start_endpoint_server(port: u16, mut state: AppState) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET  /health");
    println!("   POST /api/predict-flood");
    println!("   POST /api/flood-route");
    println!("   POST /api/flood-route-predictive");
    println!("   POST /api/flood-report\n");

    for mut request in server.incoming_requests() {
        let mut body = String::new();
        if let Err(e) = request.as_reader().read_to_string(&mut body) {
            eprintln!("Failed to read request body: {}", e);
            continue;
        }

        let url = request.url().to_string();
        let method = request.method().to_string();

        let response = match (method.as_str(), url.as_str()) {
            ("GET", "/health") => handle_health(),
            ("POST", "/api/predict-flood") => handle_predict(&state, &body),
            ("POST", "/api/flood-route") => handle_flood_route(&mut state, &body),
            ("POST", "/api/flood-route-predictive") => {
                handle_flood_route_predictive(&mut state, &body)
            }
            ("POST", "/api/flood-report") => handle_flood_report(&mut state, &body),
            _ => create_response(
                404,
                serde_json::json!({
                    "ok": false,
                    "error": "Not found",
                    "available_endpoints": [
                        "/health",
                        "/api/predict-flood",
                        "/api/flood-route",
                        "/api/flood-route-predictive",
                        "/api/flood-report"
                    ]
                }),
            ),
        };

        if let Err(e) = request.respond(response) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
