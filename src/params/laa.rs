//! LAA (mandatory accident insurance) regulatory constants
//!
//! The percentages drive the accident-side coordination: the full disability
//! pension, the overall AVS+LAA cap, the survivor shares and the family cap.

use serde::{Deserialize, Serialize};

fn default_insured_earnings_max() -> f64 {
    148_200.0
}
fn default_disability_pct_full() -> f64 {
    80.0
}
fn default_overall_cap_pct() -> f64 {
    90.0
}
fn default_spouse_pct() -> f64 {
    40.0
}
fn default_orphan_pct() -> f64 {
    15.0
}
fn default_family_cap_pct() -> f64 {
    70.0
}

/// LAA parameters, year-dependent in principle but stable for long stretches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaaParams {
    /// Maximum insured annual earnings, CHF
    #[serde(default = "default_insured_earnings_max")]
    pub insured_earnings_max: f64,

    /// Disability pension at 100% degree, percent of insured earnings
    #[serde(default = "default_disability_pct_full")]
    pub disability_pct_full: f64,

    /// Overall AVS+LAA cap, percent of insured earnings
    #[serde(default = "default_overall_cap_pct")]
    pub overall_cap_pct: f64,

    /// Surviving spouse pension, percent of insured earnings
    #[serde(default = "default_spouse_pct")]
    pub spouse_pct: f64,

    /// Orphan pension, percent of insured earnings per orphan
    #[serde(default = "default_orphan_pct")]
    pub orphan_pct: f64,

    /// Cap on combined survivor pensions, percent of insured earnings
    #[serde(default = "default_family_cap_pct")]
    pub family_cap_pct: f64,
}

impl Default for LaaParams {
    fn default() -> Self {
        Self {
            insured_earnings_max: default_insured_earnings_max(),
            disability_pct_full: default_disability_pct_full(),
            overall_cap_pct: default_overall_cap_pct(),
            spouse_pct: default_spouse_pct(),
            orphan_pct: default_orphan_pct(),
            family_cap_pct: default_family_cap_pct(),
        }
    }
}

impl LaaParams {
    /// Annual earnings actually insured under LAA
    pub fn insured_earnings(&self, annual_income: f64) -> f64 {
        crate::num::finite_or_zero(annual_income)
            .max(0.0)
            .min(self.insured_earnings_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = LaaParams::default();
        assert_eq!(p.insured_earnings_max, 148_200.0);
        assert_eq!(p.disability_pct_full, 80.0);
        assert_eq!(p.overall_cap_pct, 90.0);
        assert_eq!(p.spouse_pct, 40.0);
        assert_eq!(p.orphan_pct, 15.0);
        assert_eq!(p.family_cap_pct, 70.0);
    }

    #[test]
    fn test_insured_earnings_capped() {
        let p = LaaParams::default();
        assert_eq!(p.insured_earnings(200_000.0), 148_200.0);
        assert_eq!(p.insured_earnings(95_000.0), 95_000.0);
        assert_eq!(p.insured_earnings(-5.0), 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let p: LaaParams = serde_json::from_str(r#"{ "insuredEarningsMax": 126000.0 }"#)
            .expect("partial LAA params");
        assert_eq!(p.insured_earnings_max, 126_000.0);
        assert_eq!(p.overall_cap_pct, 90.0);
    }
}
