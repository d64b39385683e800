//! Coordination Engine: cross-scheme aggregation rules per event cause
//!
//! Sickness benefits are purely additive. Accident benefits are coordinated:
//! the LAA pension is capped so that AVS/AI plus LAA never exceeds the
//! overall cap on insured earnings, and survivor shares are prorated against
//! the family cap first, then the overall cap. Annual intermediates stay as
//! real numbers; integer-CHF rounding happens only on the final monthly
//! figure.

use serde::{Deserialize, Serialize};

use crate::num::{amount, ratio, round_chf};
use crate::params::LaaParams;

/// Coordinated accident-invalidity amounts, annual CHF unless noted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccidentInvalidity {
    /// Insured earnings after the LAA ceiling
    pub insured: f64,
    /// AVS/AI disability pension, annual
    pub ai_annual: f64,
    /// Nominal LAA pension before coordination, annual
    pub nominal_laa: f64,
    /// LAA pension actually payable after the overall cap, annual
    pub laa_payable: f64,
    /// Coordinated AI + LAA total, rounded monthly CHF
    pub total_monthly: f64,
}

/// Coordinate the accident disability pension against the AVS/AI pension
pub fn accident_invalidity(
    annual_income: f64,
    degree_pct: f64,
    avs_invalidity_monthly: f64,
    laa: &LaaParams,
) -> AccidentInvalidity {
    let insured = laa.insured_earnings(annual_income);
    let degree = amount(degree_pct).min(100.0);

    let nominal_laa = insured * laa.disability_pct_full / 100.0 * degree / 100.0;
    let ai_annual = amount(avs_invalidity_monthly) * 12.0;
    let cap = insured * laa.overall_cap_pct / 100.0;
    let laa_payable = nominal_laa.min(cap - ai_annual).max(0.0);

    AccidentInvalidity {
        insured,
        ai_annual,
        nominal_laa,
        laa_payable,
        total_monthly: round_chf((ai_annual + laa_payable) / 12.0),
    }
}

/// Coordinated accident-survivor amounts, annual CHF
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccidentSurvivors {
    pub insured: f64,
    /// Spouse share after family-cap scaling and overall-cap proration
    pub spouse_annual: f64,
    /// Combined orphan share after scaling and proration
    pub orphan_annual: f64,
    /// Total LAA survivor pension payable, annual
    pub laa_payable: f64,
}

/// Coordinate the accident survivor pensions: family cap scales spouse and
/// orphan shares proportionally, then the overall AVS+LAA cap prorates what
/// remains
pub fn accident_survivors(
    annual_income: f64,
    spouse_has_right: bool,
    orphan_count: u32,
    avs_survivor_annual: f64,
    laa: &LaaParams,
) -> AccidentSurvivors {
    let insured = laa.insured_earnings(annual_income);

    let mut spouse = if spouse_has_right {
        insured * laa.spouse_pct / 100.0
    } else {
        0.0
    };
    let mut orphans = orphan_count as f64 * insured * laa.orphan_pct / 100.0;

    // Family cap: scale both shares by the same ratio so the cap is hit
    // exactly and the spouse:orphan proportion is preserved
    let nominal = spouse + orphans;
    let family_cap = insured * laa.family_cap_pct / 100.0;
    if nominal > family_cap {
        let scale = ratio(family_cap, nominal);
        spouse *= scale;
        orphans *= scale;
    }

    // Overall cap against the AVS survivor pension
    let capped_nominal = spouse + orphans;
    let overall_cap = insured * laa.overall_cap_pct / 100.0;
    let laa_payable = capped_nominal
        .min((overall_cap - amount(avs_survivor_annual)).max(0.0));
    let prorate = ratio(laa_payable, capped_nominal);

    AccidentSurvivors {
        insured,
        spouse_annual: spouse * prorate,
        orphan_annual: orphans * prorate,
        laa_payable,
    }
}
