//! Eligibility predicates over marital/family state and a reference date
//!
//! Pure functions; the reference date is always injected by the caller, the
//! core never reads the ambient clock.

use chrono::{Datelike, NaiveDate};

use crate::household::SurvivorContext;

/// Child eligibility cutoff in months: 18 years, or 25 while in education
pub const CHILD_CUTOFF_MONTHS: i64 = 18 * 12;
pub const CHILD_CUTOFF_MONTHS_EDUCATION: i64 = 25 * 12;

/// Cutoff in months for a disability/survivor child pension
pub fn child_cutoff_months(extend_for_education: bool) -> i64 {
    if extend_for_education {
        CHILD_CUTOFF_MONTHS_EDUCATION
    } else {
        CHILD_CUTOFF_MONTHS
    }
}

/// Whole months elapsed from `birth` to `reference` (negative if `birth` is
/// in the future)
pub fn months_between(reference: NaiveDate, birth: NaiveDate) -> i64 {
    let mut months = (reference.year() as i64 - birth.year() as i64) * 12
        + (reference.month() as i64 - birth.month() as i64);
    if reference.day() < birth.day() {
        months -= 1;
    }
    months
}

/// A child is eligible at the reference date iff strictly younger than the
/// cutoff (the exactly-at-cutoff month is not eligible). A child with unknown
/// birthdate is never counted: no default assumption.
pub fn child_eligible(
    reference: NaiveDate,
    birth: Option<NaiveDate>,
    cutoff_months: i64,
) -> bool {
    match birth {
        Some(birth) => {
            let age_months = months_between(reference, birth);
            age_months >= 0 && age_months < cutoff_months
        }
        None => false,
    }
}

/// Count of eligible children at the reference date among known birthdates
pub fn eligible_child_count(
    reference: NaiveDate,
    birthdates: &[Option<NaiveDate>],
    cutoff_months: i64,
) -> u32 {
    birthdates
        .iter()
        .filter(|b| child_eligible(reference, **b, cutoff_months))
        .count() as u32
}

/// AVS widow/widower right: married or registered partnership, with a child
/// or aged 45+ at widowhood after at least 5 years of marriage
pub fn avs_spouse_right(s: &SurvivorContext) -> bool {
    s.marital_status.is_union()
        && (s.has_child || (s.age_at_widowhood >= 45.0 && s.marriage_years >= 5.0))
}

/// LPP partner right: the AVS rule for married/registered couples; for
/// cohabiting partners, a beneficiary designation plus 5 years of
/// cohabitation; false otherwise
pub fn lpp_partner_right(s: &SurvivorContext) -> bool {
    use crate::household::MaritalStatus::*;
    match s.marital_status {
        Married | RegisteredPartnership => avs_spouse_right(s),
        Cohabiting => s.partner_designated && s.cohabitation_years >= 5.0,
        Single | Divorced | Widowed => false,
    }
}
