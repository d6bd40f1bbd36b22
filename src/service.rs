/// Shared live-data context: alerts, gauges, and user reports.
///
/// These collections live in an explicit `FloodData` value that the
/// caller owns and passes into aggregation, not in process-wide mutable
/// state. Refresh is a separate, explicit operation with its own
/// per-feed outcome; the caller decides when to invoke it (typically
/// before handling a request, if stale).
///
/// Collections are replaced wholesale on a successful refresh; a failed
/// feed keeps its previous contents. User reports only ever grow.

use crate::config::ServiceConfig;
use crate::ingest::{nws, usgs};
use crate::model::{Coordinate, FloodAlert, StreamGauge, UserReport};
use chrono::{DateTime, Duration, Utc};

/// Per-feed result of a refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub alerts_ok: bool,
    pub gauges_ok: bool,
}

impl RefreshOutcome {
    /// A refresh counts as successful if either feed came through.
    pub fn any_ok(&self) -> bool {
        self.alerts_ok || self.gauges_ok
    }
}

/// Live flood data shared across requests.
#[derive(Debug, Default)]
pub struct FloodData {
    pub alerts: Vec<FloodAlert>,
    pub gauges: Vec<StreamGauge>,
    pub reports: Vec<UserReport>,
    pub last_update: Option<DateTime<Utc>>,
}

impl FloodData {
    pub fn new() -> Self {
        FloodData::default()
    }

    /// Whether the alert/gauge collections are due for a refresh.
    /// Never-refreshed data is always due.
    pub fn should_update(&self, now: DateTime<Utc>, interval_minutes: i64) -> bool {
        match self.last_update {
            None => true,
            Some(last) => now - last > Duration::minutes(interval_minutes),
        }
    }

    /// Fetches both feeds and replaces the collections wholesale. A feed
    /// that fails keeps its previous contents. `last_update` advances
    /// only when at least one feed succeeded, so a total outage retries
    /// on the next request.
    pub fn refresh(
        &mut self,
        client: &reqwest::blocking::Client,
        config: &ServiceConfig,
    ) -> RefreshOutcome {
        let alerts_ok = match nws::fetch_alerts(client, config) {
            Ok(alerts) => {
                println!("Fetched {} NWS flood alerts", alerts.len());
                self.alerts = alerts;
                true
            }
            Err(e) => {
                eprintln!("Error fetching NWS alerts: {}", e);
                false
            }
        };

        let gauges_ok = match usgs::fetch_gauges(client, config) {
            Ok(gauges) => {
                println!("Fetched {} USGS stream gauges", gauges.len());
                self.gauges = gauges;
                true
            }
            Err(e) => {
                eprintln!("Error fetching USGS gauges: {}", e);
                false
            }
        };

        let outcome = RefreshOutcome {
            alerts_ok,
            gauges_ok,
        };
        if outcome.any_ok() {
            self.last_update = Some(Utc::now());
        }
        outcome
    }

    /// Appends a user-reported flood incident. Reports get sequential
    /// ids, are never verified, and are never pruned.
    pub fn add_user_report(
        &mut self,
        location: Coordinate,
        description: String,
        user_email: Option<String>,
    ) -> UserReport {
        let report = UserReport {
            id: self.reports.len() + 1,
            location,
            description,
            user_email: user_email.unwrap_or_else(|| "anonymous".to_string()),
            timestamp: Utc::now(),
            verified: false,
        };
        self.reports.push(report.clone());
        report
    }
}
