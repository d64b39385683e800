//! Timeline Projector: monthly benefit series with age-indexed transitions
//!
//! Drives the resolver, eligibility and coordination logic across a date
//! range: children age out month by month, the retirement month switches the
//! old-age benefits on. The series is generated lazily through a restartable
//! iterator; `project()` collects it together with the presentation markers.

use chrono::{Datelike, Months, NaiveDate};

use crate::coordination::{accident_invalidity, accident_survivors};
use crate::eligibility::{
    avs_spouse_right, eligible_child_count, lpp_partner_right, CHILD_CUTOFF_MONTHS,
    CHILD_CUTOFF_MONTHS_EDUCATION,
};
use crate::gaps::monthly_target;
use crate::household::{EventCause, Household};
use crate::num::round_chf;
use crate::params::RegulatoryParams;
use crate::resolve::{resolve_all, ResolvedBenefits};

use super::point::{Marker, TimelinePoint, TimelineResult};

/// Hard bound on the number of projected months
const MAX_PROJECTION_MONTHS: usize = 600;

/// Which life event the timeline projects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineTheme {
    Disability,
    Death,
    Retirement,
}

/// Timeline projection engine for one household
pub struct TimelineProjector<'a> {
    params: &'a RegulatoryParams,
    household: &'a Household,
}

impl<'a> TimelineProjector<'a> {
    pub fn new(params: &'a RegulatoryParams, household: &'a Household) -> Self {
        Self { params, household }
    }

    /// Lazy monthly iterator between two dates (inclusive of both months).
    /// Each call starts a fresh, independent pass.
    pub fn iter(
        &self,
        theme: TimelineTheme,
        scenario: EventCause,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TimelineIter<'a> {
        let h = self.household;
        let resolved = resolve_all(h, self.params, start);
        let targets = h.targets.clamped();
        let income = crate::num::finite_or_zero(h.income.annual).max(0.0);
        let target_pct = match theme {
            TimelineTheme::Disability => targets.invalidity_pct,
            TimelineTheme::Death => targets.death_pct,
            TimelineTheme::Retirement => targets.retirement_pct,
        };

        TimelineIter {
            household: h,
            resolved,
            laa: h.benefits.laa.unwrap_or(self.params.laa),
            theme,
            scenario,
            income,
            target: monthly_target(target_pct, income),
            retirement_month: self.retirement_month(),
            current: Some(month_floor(start)),
            end: month_floor(end),
            remaining: MAX_PROJECTION_MONTHS,
        }
    }

    /// Collect the full series and its markers
    pub fn project(
        &self,
        theme: TimelineTheme,
        scenario: EventCause,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TimelineResult {
        TimelineResult {
            data: self.iter(theme, scenario, start, end).collect(),
            markers: self.markers(start, end),
        }
    }

    /// First month of the reference retirement age, when a birth date is known
    pub fn retirement_month(&self) -> Option<NaiveDate> {
        let ctx = &self.household.ctx;
        let birth = ctx.birth_date?;
        let age = self.params.lpp.retirement_age(ctx.sex) as i32;
        NaiveDate::from_ymd_opt(birth.year() + age, birth.month(), 1)
    }

    /// Presentation markers inside [start, end]: children's 18th and 25th
    /// birthday months and the retirement-start month
    pub fn markers(&self, start: NaiveDate, end: NaiveDate) -> Vec<Marker> {
        let (start, end) = (month_floor(start), month_floor(end));
        let mut markers = Vec::new();

        for (i, birth) in self.household.ctx.children_birthdates.iter().enumerate() {
            let Some(birth) = birth else { continue };
            for (age, label) in [(18, "turns 18"), (25, "turns 25")] {
                if let Some(m) = NaiveDate::from_ymd_opt(birth.year() + age, birth.month(), 1) {
                    if m >= start && m <= end {
                        markers.push(Marker {
                            x: month_key(m),
                            label: format!("Child {} {}", i + 1, label),
                        });
                    }
                }
            }
        }

        if let Some(m) = self.retirement_month() {
            if m >= start && m <= end {
                markers.push(Marker {
                    x: month_key(m),
                    label: "Retirement".to_string(),
                });
            }
        }

        markers.sort_by(|a, b| a.x.cmp(&b.x));
        markers
    }
}

/// Lazily generated monthly series
pub struct TimelineIter<'a> {
    household: &'a Household,
    resolved: ResolvedBenefits,
    laa: crate::params::LaaParams,
    theme: TimelineTheme,
    scenario: EventCause,
    income: f64,
    target: f64,
    retirement_month: Option<NaiveDate>,
    current: Option<NaiveDate>,
    end: NaiveDate,
    remaining: usize,
}

impl TimelineIter<'_> {
    fn point_at(&self, month: NaiveDate) -> TimelinePoint {
        let (avs, lpp, laa, p3) = match self.theme {
            TimelineTheme::Disability => self.disability_breakdown(month),
            TimelineTheme::Death => self.death_breakdown(month),
            TimelineTheme::Retirement => self.retirement_breakdown(month),
        };

        let avs = round_chf(avs);
        let lpp = round_chf(lpp);
        let laa = round_chf(laa);
        let p3 = round_chf(p3);
        let covered = avs + lpp + laa + p3;

        TimelinePoint {
            month: month_key(month),
            target: self.target,
            covered,
            gap: (self.target - covered).max(0.0),
            avs,
            lpp,
            laa,
            p3,
        }
    }

    /// Disability: adult pensions plus per-child amounts scaled by the count
    /// of children still eligible this month (18, or 25 with the education
    /// extension); LAA only in the accident scenario
    fn disability_breakdown(&self, month: NaiveDate) -> (f64, f64, f64, f64) {
        let ctx = &self.household.ctx;
        let cutoff = if ctx.extend_child_to_25 {
            CHILD_CUTOFF_MONTHS_EDUCATION
        } else {
            CHILD_CUTOFF_MONTHS
        };
        let n = self.children_at(month, cutoff) as f64;
        let r = &self.resolved;

        let avs = r.avs_invalidity.monthly + r.avs_invalidity_child.monthly * n;
        let lpp = r.lpp_invalidity.monthly + r.lpp_invalidity_child.monthly * n;
        let laa = if self.scenario == EventCause::Accident {
            let c = accident_invalidity(self.income, ctx.degree(), r.avs_invalidity.monthly, &self.laa);
            c.laa_payable / 12.0
        } else {
            0.0
        };
        (avs, lpp, laa, r.p3_invalidity.monthly)
    }

    /// Death: survivor pensions with the orphan count fixed at the 18-year
    /// cutoff, independent of the education-extension flag
    fn death_breakdown(&self, month: NaiveDate) -> (f64, f64, f64, f64) {
        let ctx = &self.household.ctx;
        let n = self.children_at(month, CHILD_CUTOFF_MONTHS) as f64;
        let r = &self.resolved;

        let avs_right = avs_spouse_right(&ctx.survivor);
        let lpp_right = lpp_partner_right(&ctx.survivor);
        let avs_widow = if avs_right { r.avs_widow.monthly } else { 0.0 };
        let lpp_widow = if lpp_right { r.lpp_widow.monthly } else { 0.0 };

        let avs = avs_widow + r.avs_orphan.monthly * n;
        let lpp = lpp_widow + r.lpp_orphan.monthly * n;
        let laa = if self.scenario == EventCause::Accident {
            let s = accident_survivors(self.income, avs_right, n as u32, avs * 12.0, &self.laa);
            s.laa_payable / 12.0
        } else {
            0.0
        };
        (avs, lpp, laa, r.p3_death.monthly)
    }

    /// Retirement: zero before the retirement month, the old-age pensions
    /// from that month on
    fn retirement_breakdown(&self, month: NaiveDate) -> (f64, f64, f64, f64) {
        let retired = self
            .retirement_month
            .map(|m| month >= m)
            .unwrap_or(false);
        if !retired {
            return (0.0, 0.0, 0.0, 0.0);
        }
        let r = &self.resolved;
        (
            r.avs_old_age.monthly,
            r.lpp_retirement.monthly,
            0.0,
            r.p3_retirement.monthly,
        )
    }

    fn children_at(&self, month: NaiveDate, cutoff: i64) -> u32 {
        let ctx = &self.household.ctx;
        if ctx.children_birthdates.is_empty() {
            ctx.children_count
        } else {
            eligible_child_count(month, &ctx.children_birthdates, cutoff)
        }
    }
}

impl Iterator for TimelineIter<'_> {
    type Item = TimelinePoint;

    fn next(&mut self) -> Option<TimelinePoint> {
        let current = self.current?;
        if current > self.end || self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;
        self.current = current.checked_add_months(Months::new(1));
        Some(self.point_at(current))
    }
}

/// First day of the month of a date
fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// "YYYY-MM" presentation key
fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
