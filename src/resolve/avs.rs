//! AVS benefit resolution
//!
//! Caller-supplied monthlies are used directly unless the career override is
//! active, in which case every AVS figure is recomputed from the
//! career-coefficient-weighted échelle 44 lookup and flagged as estimated.

use chrono::{Datelike, NaiveDate};

use crate::household::{AvsCareer, EventContext, Household};
use crate::num::round_chf;
use crate::params::{RegulatoryParams, AVS_CHILD_FRACTION, AVS_WIDOW_FRACTION, FULL_CAREER_YEARS};

use super::chain::{resolve_chain, BenefitSource, Candidate, ResolvedBenefit};

/// Assumed first contribution age when only a birth date is known
const DEFAULT_CONTRIBUTION_START_AGE: i32 = 21;

/// All resolved AVS figures for one household
#[derive(Debug, Clone)]
pub struct AvsResolved {
    pub invalidity: ResolvedBenefit,
    pub invalidity_child: ResolvedBenefit,
    pub widow: ResolvedBenefit,
    pub orphan: ResolvedBenefit,
    pub old_age: ResolvedBenefit,
}

/// Resolve the AVS figures at a reference date
pub fn resolve_avs(h: &Household, params: &RegulatoryParams, reference: NaiveDate) -> AvsResolved {
    let avs = &h.benefits.avs;
    let ctx = &h.ctx;

    if ctx.career_override_active() {
        let ref_year = reference.year();
        let base = scale_base(h, params, ref_year, ref_year);

        let old_age = resolve_old_age(h, params, Some(base));
        return AvsResolved {
            invalidity: ResolvedBenefit::new(base, BenefitSource::ScaleEstimate),
            invalidity_child: ResolvedBenefit::new(
                round_chf(base * AVS_CHILD_FRACTION),
                BenefitSource::ScaleEstimate,
            ),
            widow: ResolvedBenefit::new(
                round_chf(base * AVS_WIDOW_FRACTION),
                BenefitSource::ScaleEstimate,
            ),
            orphan: ResolvedBenefit::new(
                round_chf(base * AVS_CHILD_FRACTION),
                BenefitSource::ScaleEstimate,
            ),
            old_age,
        };
    }

    let invalidity = resolve_chain(
        "avs.invalidity",
        &[Candidate::new(BenefitSource::Provided, avs.invalidity_monthly)],
    );
    AvsResolved {
        invalidity_child: fraction_fallback(
            "avs.invalidity_child",
            avs.invalidity_child_monthly,
            &invalidity,
            AVS_CHILD_FRACTION,
        ),
        widow: fraction_fallback("avs.widow", avs.widow_monthly, &invalidity, AVS_WIDOW_FRACTION),
        orphan: fraction_fallback("avs.orphan", avs.child_monthly, &invalidity, AVS_CHILD_FRACTION),
        old_age: resolve_old_age(h, params, None),
        invalidity,
    }
}

/// Old-age pension for the retirement stack: a locally projected value when
/// the career override and a birth date are both present, the server
/// projection otherwise
pub fn resolve_old_age(
    h: &Household,
    params: &RegulatoryParams,
    scale_estimate_now: Option<f64>,
) -> ResolvedBenefit {
    let ctx = &h.ctx;
    let local = match (ctx.career_override_active(), ctx.birth_date) {
        (true, Some(birth)) => {
            let retirement_year = birth.year() + params.lpp.retirement_age(ctx.sex) as i32;
            Some(scale_base(h, params, retirement_year, retirement_year))
        }
        _ => None,
    };

    resolve_chain(
        "avs.old_age",
        &[
            Candidate::new(BenefitSource::ScaleEstimate, local),
            Candidate::new(BenefitSource::Provided, h.benefits.avs.old_age_monthly),
            // Override without a birth date: fall back to today's scale figure
            Candidate::new(BenefitSource::ScaleEstimate, scale_estimate_now),
        ],
    )
}

/// Career-weighted scale pension: coefficient counted up to `coeff_year`,
/// scale vintage picked by `scale_year`
fn scale_base(h: &Household, params: &RegulatoryParams, coeff_year: i32, scale_year: i32) -> f64 {
    let career = h.ctx.avs_career.clone().unwrap_or_default();
    let coefficient = career_coefficient(&career, &h.ctx, coeff_year);
    let avg_income = average_determining_income(h.income.annual, &career, params, scale_year);
    params.avs_scale.pension(scale_year, avg_income, coefficient)
}

/// Contribution-years coefficient in [0, 1] as of the end of `to_year`
fn career_coefficient(career: &AvsCareer, ctx: &EventContext, to_year: i32) -> f64 {
    let start_year = career
        .start_year
        .or_else(|| ctx.birth_date.map(|b| b.year() + DEFAULT_CONTRIBUTION_START_AGE));
    let Some(start_year) = start_year else {
        // Nothing to anchor the career on: assume complete
        return 1.0;
    };
    let contributed = (to_year - start_year) as f64;
    let missing = career.missing_years.unwrap_or(0.0).max(0.0);
    ((contributed - missing) / FULL_CAREER_YEARS).clamp(0.0, 1.0)
}

/// Average determining income: annual income plus the caregiving bonus
/// (three minimum annual pensions per caregiving year, averaged over the
/// full career)
fn average_determining_income(
    annual_income: f64,
    career: &AvsCareer,
    params: &RegulatoryParams,
    year: i32,
) -> f64 {
    let caregiving = career.caregiving_years.unwrap_or(0.0).max(0.0);
    let bonus = caregiving * 3.0 * params.avs_scale.min_annual(year) / FULL_CAREER_YEARS;
    crate::num::finite_or_zero(annual_income).max(0.0) + bonus
}

/// Caller value first, then a legal fraction of the resolved adult pension
fn fraction_fallback(
    label: &str,
    provided: Option<f64>,
    adult: &ResolvedBenefit,
    fraction: f64,
) -> ResolvedBenefit {
    let fallback = if adult.monthly > 0.0 {
        Some(round_chf(adult.monthly * fraction))
    } else {
        None
    };
    resolve_chain(
        label,
        &[
            Candidate::new(BenefitSource::Provided, provided),
            Candidate::new(BenefitSource::LegalMinimum, fallback),
        ],
    )
}
