/// Registry of historically flood-prone regions.
///
/// Each region is an axis-aligned bounding box carrying a fixed additive
/// risk bonus. The boxes are evaluated in registry order and at most one
/// bonus applies per coordinate. Bounds are exclusive on both sides.
/// The coordinates are a fixed table, not tuned; do not "correct" them.

use crate::model::Coordinate;

/// A named flood-prone bounding box with its score bonus.
#[derive(Debug, Clone, Copy)]
pub struct FloodProneRegion {
    pub name: &'static str,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
    pub bonus: f64,
}

impl FloodProneRegion {
    /// Strictly-inside containment test (bounds themselves excluded).
    pub fn contains(&self, point: Coordinate) -> bool {
        self.lat_min < point.lat
            && point.lat < self.lat_max
            && self.lng_min < point.lng
            && point.lng < self.lng_max
    }
}

/// The three regions, in priority order. First match wins.
pub const REGION_REGISTRY: [FloodProneRegion; 3] = [
    FloodProneRegion {
        name: "Atlantic City coastal",
        lat_min: 39.35,
        lat_max: 39.38,
        lng_min: -74.44,
        lng_max: -74.41,
        bonus: 0.05,
    },
    FloodProneRegion {
        name: "Hoboken",
        lat_min: 40.73,
        lat_max: 40.76,
        lng_min: -74.04,
        lng_max: -74.02,
        bonus: 0.05,
    },
    FloodProneRegion {
        name: "Toms River area",
        lat_min: 39.95,
        lat_max: 40.00,
        lng_min: -74.20,
        lng_max: -74.18,
        bonus: 0.03,
    },
];

/// Bonus for the first region containing the point, or 0.0 if none does.
pub fn region_bonus(point: Coordinate) -> f64 {
    REGION_REGISTRY
        .iter()
        .find(|r| r.contains(point))
        .map(|r| r.bonus)
        .unwrap_or(0.0)
}
