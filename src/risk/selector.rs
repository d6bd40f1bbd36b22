/// Alternative-route selection for high-risk primaries.
///
/// When the primary route scores high, a small fixed set of avoidance
/// constraints is tried against the routing provider, each candidate is
/// scored with the same aggregator, and the lowest-average-risk one is
/// recommended — but only if it is not itself high. There is no search
/// beyond the two constraints and no recursion; a candidate identical to
/// the primary route is skipped, not scored.
///
/// Fetching and scoring are injected as closures so the decision logic
/// stays independent of the routing provider and the forecast horizon.

use crate::model::{Route, RouteRiskAssessment, RouteRiskLevel};
use serde::Serialize;
use std::cmp::Ordering;

/// The fixed avoidance constraints tried, in order.
pub const AVOIDANCE_CONSTRAINTS: [&str; 2] = ["highways", "tolls"];

/// Which route ended up recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    Primary,
    Alternative,
}

/// An alternative route together with its assessment and the constraint
/// that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredAlternative {
    pub route: Route,
    pub flood_risk: RouteRiskAssessment,
    pub avoid_type: String,
}

/// Outcome of route selection: the recommended route, its assessment,
/// and the scored alternatives that were considered (ascending by
/// average risk).
#[derive(Debug, Clone, Serialize)]
pub struct RouteChoice {
    pub route: Route,
    pub assessment: RouteRiskAssessment,
    pub route_type: RouteType,
    pub alternatives: Vec<ScoredAlternative>,
}

/// Picks between the primary route and avoidance-constrained
/// alternatives.
///
/// `fetch_alternative` is called once per constraint and may return
/// `None` when the provider has no route for it; `assess` scores a
/// candidate with the caller's chosen aggregation variant. Neither is
/// invoked at all unless the primary is high.
pub fn select_best_route<F, S>(
    primary: Route,
    primary_assessment: RouteRiskAssessment,
    mut fetch_alternative: F,
    mut assess: S,
) -> RouteChoice
where
    F: FnMut(&str) -> Option<Route>,
    S: FnMut(&Route) -> RouteRiskAssessment,
{
    let mut alternatives = Vec::new();

    if primary_assessment.risk_level == RouteRiskLevel::High {
        for avoid in AVOIDANCE_CONSTRAINTS {
            let Some(candidate) = fetch_alternative(avoid) else {
                continue;
            };
            if candidate == primary {
                continue;
            }
            let flood_risk = assess(&candidate);
            alternatives.push(ScoredAlternative {
                route: candidate,
                flood_risk,
                avoid_type: avoid.to_string(),
            });
        }

        alternatives.sort_by(|a, b| {
            a.flood_risk
                .avg_risk_score
                .partial_cmp(&b.flood_risk.avg_risk_score)
                .unwrap_or(Ordering::Equal)
        });
    }

    if let Some(best) = alternatives.first() {
        if best.flood_risk.risk_level != RouteRiskLevel::High {
            return RouteChoice {
                route: best.route.clone(),
                assessment: best.flood_risk.clone(),
                route_type: RouteType::Alternative,
                alternatives,
            };
        }
    }

    RouteChoice {
        route: primary,
        assessment: primary_assessment,
        route_type: RouteType::Primary,
        alternatives,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
