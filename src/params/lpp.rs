//! LPP (occupational pension) legal-minimum parameters
//!
//! Drives the fallback invalidity pension when the certificate carries no
//! figure: project the retirement assets to the reference retirement age
//! (current assets plus future credits, without interest, art. 24 LPP) and
//! apply the minimum conversion rate.

use serde::{Deserialize, Serialize};

use crate::household::Sex;
use crate::num::finite_or_zero;

fn default_min_conversion_rate_pct() -> f64 {
    6.8
}

/// Retirement credit band: [from_age, to_age] inclusive, rate as percent of
/// the coordinated salary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditBand {
    pub from_age: u32,
    pub to_age: u32,
    pub rate_pct: f64,
}

/// LPP minimum parameters for one vintage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LppMinimumParams {
    /// Statutory retirement credit bands
    pub credit_bands: Vec<CreditBand>,

    /// Minimum conversion rate at the reference age, percent
    #[serde(default = "default_min_conversion_rate_pct")]
    pub min_conversion_rate_pct: f64,

    /// Reference retirement age for men
    pub retirement_age_male: u32,

    /// Reference retirement age for women
    pub retirement_age_female: u32,
}

impl Default for LppMinimumParams {
    fn default() -> Self {
        Self {
            credit_bands: vec![
                CreditBand { from_age: 25, to_age: 34, rate_pct: 7.0 },
                CreditBand { from_age: 35, to_age: 44, rate_pct: 10.0 },
                CreditBand { from_age: 45, to_age: 54, rate_pct: 15.0 },
                CreditBand { from_age: 55, to_age: 70, rate_pct: 18.0 },
            ],
            min_conversion_rate_pct: default_min_conversion_rate_pct(),
            retirement_age_male: 65,
            retirement_age_female: 64,
        }
    }
}

impl LppMinimumParams {
    /// Reference retirement age for a given sex
    pub fn retirement_age(&self, sex: Sex) -> u32 {
        match sex {
            Sex::Male => self.retirement_age_male,
            Sex::Female => self.retirement_age_female,
        }
    }

    /// Annual retirement credit rate at an age, percent
    pub fn credit_rate_pct(&self, age: u32) -> f64 {
        self.credit_bands
            .iter()
            .find(|b| age >= b.from_age && age <= b.to_age)
            .map_or(0.0, |b| b.rate_pct)
    }

    /// Sum of future retirement credits from `age` (inclusive) to the
    /// reference retirement age (exclusive), without interest
    pub fn future_credits(&self, age: u32, sex: Sex, coordinated_salary: f64) -> f64 {
        let salary = finite_or_zero(coordinated_salary).max(0.0);
        let until = self.retirement_age(sex);
        (age..until)
            .map(|a| salary * self.credit_rate_pct(a) / 100.0)
            .sum()
    }

    /// Legal-minimum annual invalidity pension: conversion rate applied to the
    /// projected assets (current assets plus future credits without interest)
    pub fn minimum_invalidity_annual(
        &self,
        age: u32,
        sex: Sex,
        coordinated_salary: f64,
        current_assets: f64,
    ) -> f64 {
        let assets = finite_or_zero(current_assets).max(0.0);
        let projected = assets + self.future_credits(age, sex, coordinated_salary);
        projected * self.min_conversion_rate_pct / 100.0
    }

    /// Monthly pension derived from a retirement capital and the minimum
    /// conversion rate (the capital-proxy resolver branch)
    pub fn monthly_from_capital(&self, capital: f64, conversion_rate_pct: Option<f64>) -> f64 {
        let rate = conversion_rate_pct
            .map(finite_or_zero)
            .filter(|r| *r > 0.0)
            .unwrap_or(self.min_conversion_rate_pct);
        finite_or_zero(capital).max(0.0) * rate / 100.0 / 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_credit_bands() {
        let p = LppMinimumParams::default();
        assert_eq!(p.credit_rate_pct(24), 0.0);
        assert_eq!(p.credit_rate_pct(25), 7.0);
        assert_eq!(p.credit_rate_pct(34), 7.0);
        assert_eq!(p.credit_rate_pct(35), 10.0);
        assert_eq!(p.credit_rate_pct(50), 15.0);
        assert_eq!(p.credit_rate_pct(60), 18.0);
    }

    #[test]
    fn test_future_credits() {
        let p = LppMinimumParams::default();
        // From 60 to 65: 5 years at 18% of 60'000 = 54'000
        assert_relative_eq!(
            p.future_credits(60, Sex::Male, 60_000.0),
            54_000.0,
            epsilon = 1e-9
        );
        // Women retire at 64 under this vintage: one year fewer
        assert_relative_eq!(
            p.future_credits(60, Sex::Female, 60_000.0),
            43_200.0,
            epsilon = 1e-9
        );
        assert_eq!(p.future_credits(70, Sex::Male, 60_000.0), 0.0);
    }

    #[test]
    fn test_minimum_invalidity_annual() {
        let p = LppMinimumParams::default();
        // Assets 200'000, age 60, salary 60'000:
        // projected = 200'000 + 54'000 = 254'000; annual = 6.8% = 17'272
        let annual = p.minimum_invalidity_annual(60, Sex::Male, 60_000.0, 200_000.0);
        assert_relative_eq!(annual, 17_272.0, epsilon = 1e-6);
    }

    #[test]
    fn test_monthly_from_capital() {
        let p = LppMinimumParams::default();
        assert_relative_eq!(
            p.monthly_from_capital(300_000.0, None),
            300_000.0 * 0.068 / 12.0,
            epsilon = 1e-9
        );
        // Certificate rate wins when present and positive
        assert_relative_eq!(
            p.monthly_from_capital(300_000.0, Some(5.0)),
            1_250.0,
            epsilon = 1e-9
        );
        // Zero/invalid certificate rate falls back to the minimum
        assert_relative_eq!(
            p.monthly_from_capital(300_000.0, Some(0.0)),
            1_700.0,
            epsilon = 1e-9
        );
    }
}
