//! Benefit Resolver: per scheme and event, pick the authoritative monthly
//! amount from a priority-ordered fallback chain and remember which branch
//! fired.

mod avs;
mod chain;
mod lpp;

pub use avs::{resolve_avs, AvsResolved};
pub use chain::{resolve_chain, BenefitSource, Candidate, ResolvedBenefit};

use chrono::NaiveDate;

use crate::household::Household;
use crate::params::RegulatoryParams;

/// Fully-populated internal benefit set, the output of the resolve pass.
/// Computation layers below only ever see this, never the raw optional
/// inputs.
#[derive(Debug, Clone)]
pub struct ResolvedBenefits {
    pub avs_invalidity: ResolvedBenefit,
    pub avs_invalidity_child: ResolvedBenefit,
    pub avs_widow: ResolvedBenefit,
    pub avs_orphan: ResolvedBenefit,
    pub avs_old_age: ResolvedBenefit,

    pub lpp_invalidity: ResolvedBenefit,
    pub lpp_invalidity_child: ResolvedBenefit,
    pub lpp_widow: ResolvedBenefit,
    pub lpp_orphan: ResolvedBenefit,
    pub lpp_retirement: ResolvedBenefit,

    pub p3_invalidity: ResolvedBenefit,
    pub p3_death: ResolvedBenefit,
    pub p3_retirement: ResolvedBenefit,
}

/// Run every fallback chain once for a household at a reference date
pub fn resolve_all(
    h: &Household,
    params: &RegulatoryParams,
    reference: NaiveDate,
) -> ResolvedBenefits {
    let avs = resolve_avs(h, params, reference);

    let lpp_inputs = &h.benefits.lpp;
    let lpp_invalidity = lpp::invalidity_adult(lpp_inputs, &params.lpp);
    let lpp_invalidity_child = lpp::invalidity_child(lpp_inputs, &lpp_invalidity);
    let lpp_widow = lpp::widow(lpp_inputs, &lpp_invalidity);
    let lpp_orphan = lpp::orphan(lpp_inputs, &lpp_invalidity);
    let lpp_retirement = lpp::retirement(lpp_inputs, &params.lpp);

    let p3 = &h.benefits.third_pillar;
    let provided = |label: &str, value: Option<f64>| {
        resolve_chain(label, &[Candidate::new(BenefitSource::Provided, value)])
    };

    ResolvedBenefits {
        avs_invalidity: avs.invalidity,
        avs_invalidity_child: avs.invalidity_child,
        avs_widow: avs.widow,
        avs_orphan: avs.orphan,
        avs_old_age: avs.old_age,
        lpp_invalidity,
        lpp_invalidity_child,
        lpp_widow,
        lpp_orphan,
        lpp_retirement,
        p3_invalidity: provided("p3.invalidity", p3.invalidity_monthly),
        p3_death: provided("p3.death", p3.death_monthly),
        p3_retirement: provided("p3.retirement", p3.retirement_monthly),
    }
}
