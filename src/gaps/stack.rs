//! Gap stack output structures

use serde::{Deserialize, Serialize};

use crate::num::{amount, finite_or_zero};

/// Insurance pillar a segment is paid from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pillar {
    #[serde(rename = "AVS")]
    Avs,
    #[serde(rename = "LPP")]
    Lpp,
    #[serde(rename = "LAA")]
    Laa,
    #[serde(rename = "P3")]
    P3,
}

/// One covered slice of the target income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapSegment {
    pub label: String,
    /// Monthly CHF, always finite and >= 0
    pub value: f64,
    pub source: Pillar,
    /// True when the amount came from an estimating fallback branch rather
    /// than a certificate or caller figure
    pub estimated: bool,
}

impl GapSegment {
    pub fn new(label: impl Into<String>, value: f64, source: Pillar, estimated: bool) -> Self {
        Self {
            label: label.into(),
            value: amount(value),
            source,
            estimated,
        }
    }
}

/// Target/covered/gap breakdown for one event instance
///
/// Invariants: `covered = min(target, Σ segments)` and
/// `gap = max(0, target − Σ segments)`, both computed from the unclamped
/// segment sum so a surplus yields gap = 0, never a negative number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapStack {
    pub target: f64,
    pub segments: Vec<GapSegment>,
    pub covered: f64,
    pub gap: f64,
}

impl GapStack {
    /// Build a stack from a target and raw segments. Zero-valued segments are
    /// dropped from the breakdown; covered and gap come from the full raw sum.
    pub fn new(target: f64, segments: Vec<GapSegment>) -> Self {
        let target = amount(target);
        let raw: f64 = segments.iter().map(|s| finite_or_zero(s.value)).sum();
        let segments = segments.into_iter().filter(|s| s.value > 0.0).collect();
        Self {
            target,
            segments,
            covered: raw.min(target),
            gap: (target - raw).max(0.0),
        }
    }

    /// Unclamped sum of all segments
    pub fn raw_covered(&self) -> f64 {
        self.segments.iter().map(|s| s.value).sum()
    }

    /// Whether any contributing segment is an estimate
    pub fn any_estimated(&self) -> bool {
        self.segments.iter().any(|s| s.estimated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(value: f64) -> GapSegment {
        GapSegment::new("test", value, Pillar::Avs, false)
    }

    #[test]
    fn test_gap_and_covered() {
        let stack = GapStack::new(7_125.0, vec![seg(2_000.0), seg(3_000.0)]);
        assert_eq!(stack.covered, 5_000.0);
        assert_eq!(stack.gap, 2_125.0);
    }

    #[test]
    fn test_surplus_clamps_covered_and_zeroes_gap() {
        let stack = GapStack::new(4_000.0, vec![seg(3_000.0), seg(3_000.0)]);
        assert_eq!(stack.covered, 4_000.0);
        assert_eq!(stack.gap, 0.0);
        // The raw breakdown keeps the surplus visible
        assert_eq!(stack.raw_covered(), 6_000.0);
    }

    #[test]
    fn test_zero_segments_dropped() {
        let stack = GapStack::new(4_000.0, vec![seg(0.0), seg(1_500.0)]);
        assert_eq!(stack.segments.len(), 1);
        assert_eq!(stack.covered, 1_500.0);
    }

    #[test]
    fn test_segment_guards() {
        let s = GapSegment::new("bad", f64::NAN, Pillar::Laa, true);
        assert_eq!(s.value, 0.0);
        let s2 = GapSegment::new("neg", -42.0, Pillar::Lpp, false);
        assert_eq!(s2.value, 0.0);
    }

    #[test]
    fn test_estimated_propagation() {
        let stack = GapStack::new(
            1_000.0,
            vec![
                GapSegment::new("a", 100.0, Pillar::Avs, false),
                GapSegment::new("b", 100.0, Pillar::Lpp, true),
            ],
        );
        assert!(stack.any_estimated());
    }
}
