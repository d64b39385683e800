//! Timeline output structures

use serde::{Deserialize, Serialize};

/// One projected month: target, raw covered sum and per-pillar breakdown.
/// No clamping happens at this layer; `covered` may exceed `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// Month key, "YYYY-MM"
    pub month: String,
    pub target: f64,
    pub covered: f64,
    pub gap: f64,
    pub avs: f64,
    pub lpp: f64,
    pub laa: f64,
    pub p3: f64,
}

/// Non-numeric presentation marker (a child aging out, retirement starting)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Month key, "YYYY-MM"
    pub x: String,
    pub label: String,
}

/// Collected projection: monthly series plus markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineResult {
    pub data: Vec<TimelinePoint>,
    pub markers: Vec<Marker>,
}
