//! Flood-Aware Routing Service - Main Entry Point
//!
//! A server-side service that:
//! 1. Ingests live data from USGS gauges and NWS alerts/forecasts
//! 2. Scores flood risk at points and along driving routes
//! 3. Recommends alternative routes when the primary is high risk
//! 4. Provides a JSON HTTP endpoint for all of the above
//!
//! Usage:
//!   cargo run --release                 # Listen on the configured port
//!   cargo run --release -- --port 9090  # Override the listen port
//!
//! Environment:
//!   GOOGLE_MAPS_API_KEY - Routing provider API key

use floodroute_service::config::ServiceConfig;
use floodroute_service::endpoint::{self, AppState};
use floodroute_service::service::FloodData;
use std::env;
use std::time::Duration;

fn main() {
    println!("🌊 Flood-Aware Routing Service");
    println!("==============================\n");

    dotenv::dotenv().ok();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut port_override: Option<u16> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                if i + 1 < args.len() {
                    port_override = args[i + 1].parse().ok();
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--port PORT]", args[0]);
                std::process::exit(1);
            }
        }
    }

    let config = ServiceConfig::load();
    let port = port_override.unwrap_or(config.endpoint_port);

    if config.directions_api_key.is_empty() {
        eprintln!("⚠️  GOOGLE_MAPS_API_KEY not set - route endpoints will fail");
    }

    // NWS rejects requests without an identifying User-Agent.
    let client = match reqwest::blocking::Client::builder()
        .user_agent("floodroute-service/0.1 (flood monitoring)")
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    // Warm the live-data context before accepting requests; a failed
    // feed just starts us with empty collections and a retry later.
    println!("📡 Fetching initial flood data...");
    let mut data = FloodData::new();
    let outcome = data.refresh(&client, &config);
    if outcome.any_ok() {
        println!("✓ Initial data loaded\n");
    } else {
        eprintln!("⚠️  Initial data fetch failed, continuing with empty data\n");
    }

    let state = AppState {
        config,
        client,
        data,
    };

    println!("🚀 Starting HTTP endpoint server...");
    if let Err(e) = endpoint::start_endpoint_server(port, state) {
        eprintln!("❌ Endpoint server error: {}", e);
        std::process::exit(1);
    }
}
