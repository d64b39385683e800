//! AVS benefit scale (échelle 44), indexed by year
//!
//! The scale gives the full-career monthly pension band for a given average
//! determining income. A partial career weights the full pension by the
//! contribution-years coefficient (years / 44, clamped to [0, 1]).

use serde::{Deserialize, Serialize};

use crate::num::{finite_or_zero, ratio};

/// Reference full career length in years
pub const FULL_CAREER_YEARS: f64 = 44.0;

/// One year's entry of the scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleEntry {
    /// Minimum full pension, CHF per month
    pub min_monthly: f64,

    /// Maximum full pension, CHF per month
    pub max_monthly: f64,

    /// Average determining income below which the minimum applies
    pub min_determining_income: f64,

    /// Average determining income above which the maximum applies
    pub max_determining_income: f64,
}

impl ScaleEntry {
    /// Full-career monthly pension for an average determining income.
    /// Linear interpolation between the scale bounds; the statutory table is
    /// stepped but the steps are small relative to advisory precision.
    pub fn full_pension(&self, avg_determining_income: f64) -> f64 {
        let income = finite_or_zero(avg_determining_income).max(0.0);
        let span = self.max_determining_income - self.min_determining_income;
        let position = ratio(income - self.min_determining_income, span).clamp(0.0, 1.0);
        self.min_monthly + (self.max_monthly - self.min_monthly) * position
    }
}

/// Year-indexed scale with a compiled-in fallback vintage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvsScale {
    /// Entries sorted by ascending year
    entries: Vec<(i32, ScaleEntry)>,
}

impl AvsScale {
    /// Scale with the 2024 vintage only
    pub fn default_2024() -> Self {
        Self {
            entries: vec![(
                2024,
                ScaleEntry {
                    min_monthly: 1_225.0,
                    max_monthly: 2_450.0,
                    min_determining_income: 14_700.0,
                    max_determining_income: 88_200.0,
                },
            )],
        }
    }

    /// Build from (year, entry) pairs; entries are sorted internally
    pub fn new(mut entries: Vec<(i32, ScaleEntry)>) -> Self {
        entries.sort_by_key(|(year, _)| *year);
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a year: latest vintage at or before the requested year,
    /// falling back to the earliest known vintage
    pub fn entry_for(&self, year: i32) -> Option<&ScaleEntry> {
        self.entries
            .iter()
            .rev()
            .find(|(y, _)| *y <= year)
            .or_else(|| self.entries.first())
            .map(|(_, e)| e)
    }

    /// Career-weighted monthly pension for a year, average determining income
    /// and contribution-years coefficient in [0, 1]
    pub fn pension(&self, year: i32, avg_determining_income: f64, coefficient: f64) -> f64 {
        let Some(entry) = self.entry_for(year) else {
            return 0.0;
        };
        let coeff = finite_or_zero(coefficient).clamp(0.0, 1.0);
        entry.full_pension(avg_determining_income) * coeff
    }

    /// Minimum full annual pension for a year (basis of the caregiving bonus)
    pub fn min_annual(&self, year: i32) -> f64 {
        self.entry_for(year).map_or(0.0, |e| e.min_monthly * 12.0)
    }
}

impl Default for AvsScale {
    fn default() -> Self {
        Self::default_2024()
    }
}
