//! LPP benefit resolution
//!
//! Priority chains per figure. The adult invalidity pension is the anchor:
//! certificate, then the statutory-minimum projection, then a proxy from the
//! retirement capital, then zero. Child/orphan and widow figures fall back to
//! legal fractions of the resolved adult pension.

use crate::household::{LppInputs, Sex};
use crate::num::round_chf;
use crate::params::{LppMinimumParams, LPP_CHILD_FRACTION};

use super::chain::{resolve_chain, BenefitSource, Candidate, ResolvedBenefit};

/// Widow/widower pension as a fraction of the invalidity pension, the legal
/// default when the certificate carries no figure
const LPP_WIDOW_FRACTION: f64 = 0.60;

/// Adult invalidity pension: certificate > legal minimum > capital proxy > 0
pub fn invalidity_adult(lpp: &LppInputs, params: &LppMinimumParams) -> ResolvedBenefit {
    let legal_minimum = legal_minimum_monthly(lpp, params);
    let capital_proxy = capital_proxy_monthly(lpp, params);

    resolve_chain(
        "lpp.invalidity",
        &[
            Candidate::new(BenefitSource::Certificate, lpp.invalidity_monthly),
            Candidate::new(BenefitSource::LegalMinimum, legal_minimum),
            Candidate::new(BenefitSource::CapitalProxy, capital_proxy),
        ],
    )
}

/// Invalidity-child pension: certificate, else 20% of the resolved adult
/// pension (rounded)
pub fn invalidity_child(lpp: &LppInputs, adult: &ResolvedBenefit) -> ResolvedBenefit {
    child_of(lpp.invalidity_child_monthly, adult, "lpp.invalidity_child")
}

/// Orphan pension: certificate, else 20% of the resolved adult invalidity
/// pension (rounded)
pub fn orphan(lpp: &LppInputs, adult: &ResolvedBenefit) -> ResolvedBenefit {
    child_of(lpp.orphan_monthly, adult, "lpp.orphan")
}

/// Widow/widower pension: certificate, else 60% of the resolved adult
/// invalidity pension
pub fn widow(lpp: &LppInputs, adult: &ResolvedBenefit) -> ResolvedBenefit {
    let fallback = if adult.monthly > 0.0 {
        Some(round_chf(adult.monthly * LPP_WIDOW_FRACTION))
    } else {
        None
    };
    resolve_chain(
        "lpp.widow",
        &[
            Candidate::new(BenefitSource::Certificate, lpp.widow_monthly),
            Candidate::new(BenefitSource::LegalMinimum, fallback),
        ],
    )
}

/// Retirement pension: certified annual figure, else the capital-at-65
/// converted at the minimum rate
pub fn retirement(lpp: &LppInputs, params: &LppMinimumParams) -> ResolvedBenefit {
    let from_cert = lpp.retirement_annual_from_cert.map(|annual| annual / 12.0);
    let from_capital = lpp
        .capital_at_65_from_cert
        .map(|capital| params.monthly_from_capital(capital, lpp.min_conversion_rate_pct));
    resolve_chain(
        "lpp.retirement",
        &[
            Candidate::new(BenefitSource::Certificate, from_cert),
            Candidate::new(BenefitSource::CapitalProxy, from_capital),
        ],
    )
}

fn child_of(certificate: Option<f64>, adult: &ResolvedBenefit, label: &str) -> ResolvedBenefit {
    let fallback = if adult.monthly > 0.0 {
        Some(round_chf(adult.monthly * LPP_CHILD_FRACTION))
    } else {
        None
    };
    resolve_chain(
        label,
        &[
            Candidate::new(BenefitSource::Certificate, certificate),
            Candidate::new(BenefitSource::LegalMinimum, fallback),
        ],
    )
}

/// Statutory-minimum monthly pension, usable only when year, age, coordinated
/// salary and current assets are all present
fn legal_minimum_monthly(lpp: &LppInputs, params: &LppMinimumParams) -> Option<f64> {
    let min = &lpp.invalidity_min;
    let (_year, age, salary, assets) = (
        min.year?,
        min.age_years?,
        min.coordinated_salary?,
        min.current_assets?,
    );
    let sex = min.sex.unwrap_or(Sex::Male);
    Some(params.minimum_invalidity_annual(age, sex, salary, assets) / 12.0)
}

/// Proxy from the projected retirement capital (or, failing that, the
/// certified retirement annuity)
fn capital_proxy_monthly(lpp: &LppInputs, params: &LppMinimumParams) -> Option<f64> {
    if let Some(capital) = lpp.capital_at_65_from_cert {
        return Some(params.monthly_from_capital(capital, lpp.min_conversion_rate_pct));
    }
    lpp.retirement_annual_from_cert.map(|annual| annual / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::LppMinimumInputs;
    use approx::assert_relative_eq;

    fn params() -> LppMinimumParams {
        LppMinimumParams::default()
    }

    #[test]
    fn test_certificate_wins() {
        let lpp = LppInputs {
            invalidity_monthly: Some(2_500.0),
            capital_at_65_from_cert: Some(400_000.0),
            ..Default::default()
        };
        let adult = invalidity_adult(&lpp, &params());
        assert_eq!(adult.monthly, 2_500.0);
        assert_eq!(adult.source, BenefitSource::Certificate);
        assert!(!adult.estimated());
    }

    #[test]
    fn test_legal_minimum_branch() {
        let lpp = LppInputs {
            invalidity_min: LppMinimumInputs {
                year: Some(2024),
                age_years: Some(60),
                sex: Some(Sex::Male),
                coordinated_salary: Some(60_000.0),
                current_assets: Some(200_000.0),
            },
            ..Default::default()
        };
        let adult = invalidity_adult(&lpp, &params());
        assert_eq!(adult.source, BenefitSource::LegalMinimum);
        // (200'000 + 5y * 18% * 60'000) * 6.8% / 12
        assert_relative_eq!(adult.monthly, 17_272.0 / 12.0, epsilon = 1e-6);
        assert!(adult.estimated());
    }

    #[test]
    fn test_incomplete_minimum_inputs_fall_through() {
        let lpp = LppInputs {
            invalidity_min: LppMinimumInputs {
                year: Some(2024),
                age_years: Some(60),
                // coordinated_salary missing
                current_assets: Some(200_000.0),
                ..Default::default()
            },
            capital_at_65_from_cert: Some(300_000.0),
            ..Default::default()
        };
        let adult = invalidity_adult(&lpp, &params());
        assert_eq!(adult.source, BenefitSource::CapitalProxy);
        assert_relative_eq!(adult.monthly, 1_700.0, epsilon = 1e-9);
    }

    #[test]
    fn test_annuity_proxy_when_no_capital() {
        let lpp = LppInputs {
            retirement_annual_from_cert: Some(24_000.0),
            ..Default::default()
        };
        let adult = invalidity_adult(&lpp, &params());
        assert_eq!(adult.source, BenefitSource::CapitalProxy);
        assert_eq!(adult.monthly, 2_000.0);
    }

    #[test]
    fn test_exhausted_chain() {
        let adult = invalidity_adult(&LppInputs::default(), &params());
        assert_eq!(adult.monthly, 0.0);
        assert_eq!(adult.source, BenefitSource::None);
    }

    #[test]
    fn test_child_twenty_percent_default() {
        let lpp = LppInputs {
            invalidity_monthly: Some(2_000.0),
            ..Default::default()
        };
        let adult = invalidity_adult(&lpp, &params());
        let child = invalidity_child(&lpp, &adult);
        assert_eq!(child.monthly, 400.0);
        assert_eq!(child.source, BenefitSource::LegalMinimum);
        assert!(child.estimated());

        // Certificate child figure wins over the fraction
        let lpp_cert = LppInputs {
            invalidity_child_monthly: Some(450.0),
            ..lpp
        };
        let child_cert = invalidity_child(&lpp_cert, &adult);
        assert_eq!(child_cert.monthly, 450.0);
        assert!(!child_cert.estimated());
    }

    #[test]
    fn test_child_zero_when_no_adult_pension() {
        let lpp = LppInputs::default();
        let adult = invalidity_adult(&lpp, &params());
        let child = invalidity_child(&lpp, &adult);
        assert_eq!(child.monthly, 0.0);
        assert_eq!(child.source, BenefitSource::None);
    }

    #[test]
    fn test_widow_sixty_percent_default() {
        let lpp = LppInputs {
            invalidity_monthly: Some(3_000.0),
            ..Default::default()
        };
        let adult = invalidity_adult(&lpp, &params());
        let w = widow(&lpp, &adult);
        assert_eq!(w.monthly, 1_800.0);
        assert_eq!(w.source, BenefitSource::LegalMinimum);
    }

    #[test]
    fn test_retirement_resolution() {
        let lpp = LppInputs {
            retirement_annual_from_cert: Some(30_000.0),
            capital_at_65_from_cert: Some(400_000.0),
            ..Default::default()
        };
        let r = retirement(&lpp, &params());
        assert_eq!(r.monthly, 2_500.0);
        assert_eq!(r.source, BenefitSource::Certificate);

        let capital_only = LppInputs {
            capital_at_65_from_cert: Some(400_000.0),
            ..Default::default()
        };
        let r2 = retirement(&capital_only, &params());
        assert_eq!(r2.source, BenefitSource::CapitalProxy);
        assert_relative_eq!(r2.monthly, 400_000.0 * 0.068 / 12.0, epsilon = 1e-9);
    }
}
