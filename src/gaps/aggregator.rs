//! Gap Aggregator: one target/covered/gap stack per event instance
//!
//! Combines resolved per-scheme amounts (coordinated on the accident side)
//! into the per-event breakdown consumed by reporting. Clamping lives here
//! and only here; the timeline layer below reports raw sums.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::coordination::{accident_invalidity, accident_survivors};
use crate::eligibility::{
    avs_spouse_right, child_cutoff_months, eligible_child_count, lpp_partner_right,
};
use crate::household::{EventCause, EventContext, Household, NeedTargets};
use crate::num::round_chf;
use crate::params::{LaaParams, RegulatoryParams};
use crate::resolve::{resolve_all, ResolvedBenefits};

use super::stack::{GapSegment, GapStack, Pillar};

/// Rounded monthly targets per event, CHF
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetsMonthly {
    pub invalidity: f64,
    pub death: f64,
    pub retirement: f64,
}

/// Sickness and accident stacks for one event, plus the one matching the
/// declared cause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGaps {
    pub maladie: GapStack,
    pub accident: GapStack,
    pub current: GapStack,
}

/// Death-event stacks, with the lump-sum LPP death capital when present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathGaps {
    pub maladie: GapStack,
    pub accident: GapStack,
    pub current: GapStack,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<f64>,
}

/// Full per-household gap report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapsResult {
    pub targets_pct: NeedTargets,
    pub targets_monthly: TargetsMonthly,
    pub invalidity: EventGaps,
    pub death: DeathGaps,
    pub retirement: GapStack,
}

/// The gap computation engine: regulatory parameters in, gap stacks out
pub struct GapEngine {
    params: RegulatoryParams,
}

impl GapEngine {
    pub fn new(params: RegulatoryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RegulatoryParams {
        &self.params
    }

    /// Compute all gap stacks for a household at a reference date.
    /// Pure: identical inputs give identical output, no clock reads, no
    /// mutation of the registry.
    pub fn compute(&self, h: &Household, reference: NaiveDate) -> GapsResult {
        let targets = h.targets.clamped();
        let income = crate::num::finite_or_zero(h.income.annual).max(0.0);
        let laa = h.benefits.laa.unwrap_or(self.params.laa);
        let resolved = resolve_all(h, &self.params, reference);

        let targets_monthly = TargetsMonthly {
            invalidity: monthly_target(targets.invalidity_pct, income),
            death: monthly_target(targets.death_pct, income),
            retirement: monthly_target(targets.retirement_pct, income),
        };

        let children = covered_children(&h.ctx, reference);

        let invalidity = self.invalidity_gaps(
            targets_monthly.invalidity,
            income,
            &h.ctx,
            &resolved,
            &laa,
            children,
        );
        let death = self.death_gaps(
            targets_monthly.death,
            income,
            &h.ctx,
            &resolved,
            &laa,
            children,
            h.benefits.lpp.death_capital,
        );
        let retirement = retirement_stack(targets_monthly.retirement, &resolved);

        GapsResult {
            targets_pct: targets,
            targets_monthly,
            invalidity,
            death,
            retirement,
        }
    }

    fn invalidity_gaps(
        &self,
        target: f64,
        income: f64,
        ctx: &EventContext,
        r: &ResolvedBenefits,
        laa: &LaaParams,
        children: u32,
    ) -> EventGaps {
        let n = children as f64;

        let base_segments = |avs_value: f64, avs_estimated: bool| {
            vec![
                GapSegment::new("AVS/AI invalidity pension", avs_value, Pillar::Avs, avs_estimated),
                GapSegment::new(
                    "AVS/AI child pensions",
                    r.avs_invalidity_child.monthly * n,
                    Pillar::Avs,
                    r.avs_invalidity_child.estimated(),
                ),
                GapSegment::new(
                    "LPP invalidity pension",
                    r.lpp_invalidity.monthly,
                    Pillar::Lpp,
                    r.lpp_invalidity.estimated(),
                ),
                GapSegment::new(
                    "LPP child pensions",
                    r.lpp_invalidity_child.monthly * n,
                    Pillar::Lpp,
                    r.lpp_invalidity_child.estimated(),
                ),
                GapSegment::new(
                    "3rd pillar",
                    r.p3_invalidity.monthly,
                    Pillar::P3,
                    r.p3_invalidity.estimated(),
                ),
            ]
        };

        // Sickness: purely additive, every scheme at face value
        let maladie = GapStack::new(
            target,
            base_segments(r.avs_invalidity.monthly, r.avs_invalidity.estimated()),
        );

        // Accident: AI + LAA coordinated against the overall cap
        let coordinated =
            accident_invalidity(income, ctx.degree(), r.avs_invalidity.monthly, laa);
        let mut accident_segments = base_segments(
            coordinated.ai_annual / 12.0,
            r.avs_invalidity.estimated(),
        );
        accident_segments.push(GapSegment::new(
            "LAA pension",
            coordinated.laa_payable / 12.0,
            Pillar::Laa,
            false,
        ));
        let accident = GapStack::new(target, accident_segments);

        let current = match ctx.cause_invalidity {
            EventCause::Sickness => maladie.clone(),
            EventCause::Accident => accident.clone(),
        };
        EventGaps { maladie, accident, current }
    }

    #[allow(clippy::too_many_arguments)]
    fn death_gaps(
        &self,
        target: f64,
        income: f64,
        ctx: &EventContext,
        r: &ResolvedBenefits,
        laa: &LaaParams,
        orphans: u32,
        death_capital: Option<f64>,
    ) -> DeathGaps {
        let n = orphans as f64;
        let avs_right = avs_spouse_right(&ctx.survivor);
        let lpp_right = lpp_partner_right(&ctx.survivor);

        let avs_widow = if avs_right { r.avs_widow.monthly } else { 0.0 };
        let lpp_widow = if lpp_right { r.lpp_widow.monthly } else { 0.0 };

        let base_segments = || {
            vec![
                GapSegment::new(
                    "AVS widow(er) pension",
                    avs_widow,
                    Pillar::Avs,
                    r.avs_widow.estimated(),
                ),
                GapSegment::new(
                    "AVS orphan pensions",
                    r.avs_orphan.monthly * n,
                    Pillar::Avs,
                    r.avs_orphan.estimated(),
                ),
                GapSegment::new(
                    "LPP partner pension",
                    lpp_widow,
                    Pillar::Lpp,
                    r.lpp_widow.estimated(),
                ),
                GapSegment::new(
                    "LPP orphan pensions",
                    r.lpp_orphan.monthly * n,
                    Pillar::Lpp,
                    r.lpp_orphan.estimated(),
                ),
                GapSegment::new(
                    "3rd pillar",
                    r.p3_death.monthly,
                    Pillar::P3,
                    r.p3_death.estimated(),
                ),
            ]
        };

        let maladie = GapStack::new(target, base_segments());

        let avs_survivor_annual = (avs_widow + r.avs_orphan.monthly * n) * 12.0;
        let survivors = accident_survivors(income, avs_right, orphans, avs_survivor_annual, laa);
        let mut accident_segments = base_segments();
        accident_segments.push(GapSegment::new(
            "LAA spouse pension",
            survivors.spouse_annual / 12.0,
            Pillar::Laa,
            false,
        ));
        accident_segments.push(GapSegment::new(
            "LAA orphan pensions",
            survivors.orphan_annual / 12.0,
            Pillar::Laa,
            false,
        ));
        let accident = GapStack::new(target, accident_segments);

        let current = match ctx.cause_death {
            EventCause::Sickness => maladie.clone(),
            EventCause::Accident => accident.clone(),
        };

        DeathGaps {
            maladie,
            accident,
            current,
            capital: death_capital.map(|c| crate::num::amount(c)).filter(|c| *c > 0.0),
        }
    }
}

/// Monthly target: clamped percentage of the annual income, rounded CHF
pub fn monthly_target(pct: f64, annual_income: f64) -> f64 {
    round_chf(pct * annual_income / 1200.0)
}

/// Children counted for per-child amounts: eligibility by birthdate when any
/// birthdate is known, otherwise the declared count (no birthdate data at all)
pub fn covered_children(ctx: &EventContext, reference: NaiveDate) -> u32 {
    let cutoff = child_cutoff_months(ctx.extend_child_to_25);
    if ctx.children_birthdates.is_empty() {
        ctx.children_count
    } else {
        eligible_child_count(reference, &ctx.children_birthdates, cutoff)
    }
}

fn retirement_stack(target: f64, r: &ResolvedBenefits) -> GapStack {
    GapStack::new(
        target,
        vec![
            GapSegment::new(
                "AVS old-age pension",
                r.avs_old_age.monthly,
                Pillar::Avs,
                r.avs_old_age.estimated(),
            ),
            GapSegment::new(
                "LPP retirement pension",
                r.lpp_retirement.monthly,
                Pillar::Lpp,
                r.lpp_retirement.estimated(),
            ),
            GapSegment::new(
                "3rd pillar",
                r.p3_retirement.monthly,
                Pillar::P3,
                r.p3_retirement.estimated(),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{AvsInputs, LppInputs, MaritalStatus, ThirdPillarInputs};
    use proptest::prelude::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn engine() -> GapEngine {
        GapEngine::new(RegulatoryParams::default_2024())
    }

    fn sample_household() -> Household {
        let mut h = Household::new(95_000.0);
        h.targets = NeedTargets {
            invalidity_pct: 90.0,
            death_pct: 80.0,
            retirement_pct: 80.0,
        };
        h.benefits.avs = AvsInputs {
            invalidity_monthly: Some(2_100.0),
            widow_monthly: Some(1_680.0),
            child_monthly: Some(840.0),
            old_age_monthly: Some(2_300.0),
            ..Default::default()
        };
        h.benefits.lpp = LppInputs {
            invalidity_monthly: Some(2_000.0),
            widow_monthly: Some(1_200.0),
            orphan_monthly: Some(400.0),
            retirement_annual_from_cert: Some(24_000.0),
            ..Default::default()
        };
        h.benefits.third_pillar = ThirdPillarInputs {
            invalidity_monthly: Some(500.0),
            death_monthly: Some(500.0),
            retirement_monthly: Some(300.0),
        };
        h.ctx.survivor.marital_status = MaritalStatus::Married;
        h.ctx.survivor.has_child = true;
        h.ctx.children_count = 2;
        h
    }

    #[test]
    fn test_invalidity_target_monthly() {
        // income 95'000, 90% target: round(95'000 * 0.9 / 12) = 7'125
        let result = engine().compute(&sample_household(), reference());
        assert_eq!(result.targets_monthly.invalidity, 7_125.0);
        assert_eq!(result.invalidity.maladie.target, 7_125.0);
    }

    #[test]
    fn test_sickness_is_purely_additive() {
        let h = sample_household();
        let result = engine().compute(&h, reference());
        let stack = &result.invalidity.maladie;

        // AVS 2100 + AVS child 2*840 + LPP 2000 + LPP child 2*400 + P3 500
        let expected = 2_100.0 + 2.0 * 840.0 + 2_000.0 + 2.0 * 400.0 + 500.0;
        assert_eq!(stack.raw_covered(), expected);
        assert_eq!(stack.covered, expected.min(stack.target));
        assert_eq!(stack.gap, (stack.target - expected).max(0.0));
    }

    #[test]
    fn test_per_child_twenty_percent_default() {
        // children=2, lpp child undefined, lpp adult 2000: 400 each, 800 total
        let mut h = Household::new(95_000.0);
        h.benefits.lpp.invalidity_monthly = Some(2_000.0);
        h.ctx.children_count = 2;
        let result = engine().compute(&h, reference());
        let lpp_children: f64 = result
            .invalidity
            .maladie
            .segments
            .iter()
            .filter(|s| s.label == "LPP child pensions")
            .map(|s| s.value)
            .sum();
        assert_eq!(lpp_children, 800.0);
    }

    #[test]
    fn test_accident_stack_carries_coordinated_laa() {
        let mut h = sample_household();
        h.ctx.cause_invalidity = EventCause::Accident;
        let result = engine().compute(&h, reference());
        let accident = &result.invalidity.accident;

        let laa_value: f64 = accident
            .segments
            .iter()
            .filter(|s| s.source == Pillar::Laa)
            .map(|s| s.value)
            .sum();
        // insured = 95'000, cap 90% = 85'500/yr, AI = 25'200/yr,
        // nominal LAA = 76'000/yr -> payable = 60'300/yr
        assert!((laa_value - 60_300.0 / 12.0).abs() < 1e-6);
        assert_eq!(result.invalidity.current, result.invalidity.accident);
    }

    #[test]
    fn test_death_stacks_and_survivor_rights() {
        let result = engine().compute(&sample_household(), reference());
        let maladie = &result.death.maladie;
        // Married with child: both widow segments present
        assert!(maladie.segments.iter().any(|s| s.label == "AVS widow(er) pension"));
        assert!(maladie.segments.iter().any(|s| s.label == "LPP partner pension"));

        // Accident adds LAA survivor segments on top
        let accident = &result.death.accident;
        assert!(accident.segments.iter().any(|s| s.source == Pillar::Laa));
        assert!(accident.raw_covered() > maladie.raw_covered());
    }

    #[test]
    fn test_no_survivor_right_no_widow_segments() {
        let mut h = sample_household();
        h.ctx.survivor.marital_status = MaritalStatus::Single;
        h.ctx.survivor.has_child = false;
        let result = engine().compute(&h, reference());
        assert!(!result
            .death
            .maladie
            .segments
            .iter()
            .any(|s| s.label.contains("widow") || s.label.contains("partner")));
    }

    #[test]
    fn test_death_capital_passthrough() {
        let mut h = sample_household();
        h.benefits.lpp.death_capital = Some(150_000.0);
        let result = engine().compute(&h, reference());
        assert_eq!(result.death.capital, Some(150_000.0));

        let none = engine().compute(&sample_household(), reference());
        assert_eq!(none.death.capital, None);
    }

    #[test]
    fn test_retirement_stack() {
        let result = engine().compute(&sample_household(), reference());
        // AVS 2300 + LPP 24'000/12 + P3 300
        assert_eq!(result.retirement.raw_covered(), 2_300.0 + 2_000.0 + 300.0);
    }

    #[test]
    fn test_idempotence() {
        let h = sample_household();
        let e = engine();
        let a = e.compute(&h, reference());
        let b = e.compute(&h, reference());
        assert_eq!(a, b);
    }

    #[test]
    fn test_children_counted_by_birthdate_when_known() {
        let mut h = sample_household();
        // One eligible child, one aged out, one unknown
        h.ctx.children_birthdates = vec![
            NaiveDate::from_ymd_opt(2015, 3, 1),
            NaiveDate::from_ymd_opt(2000, 3, 1),
            None,
        ];
        assert_eq!(covered_children(&h.ctx, reference()), 1);

        // Education extension keeps a 20-year-old counted
        h.ctx.children_birthdates = vec![NaiveDate::from_ymd_opt(2006, 3, 1)];
        h.ctx.extend_child_to_25 = true;
        assert_eq!(covered_children(&h.ctx, reference()), 1);
        h.ctx.extend_child_to_25 = false;
        assert_eq!(covered_children(&h.ctx, reference()), 0);
    }

    #[test]
    fn test_degenerate_household_is_total() {
        let h = Household::new(0.0);
        let result = engine().compute(&h, reference());
        assert_eq!(result.targets_monthly.invalidity, 0.0);
        assert_eq!(result.invalidity.maladie.gap, 0.0);
        assert!(result.retirement.covered.is_finite());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_gap_algebra_holds(
            income in 0.0f64..500_000.0,
            target_pct in 0.0f64..150.0,
            avs in proptest::option::of(0.0f64..6_000.0),
            lpp in proptest::option::of(0.0f64..8_000.0),
            p3 in proptest::option::of(0.0f64..3_000.0),
            children in 0u32..5,
            degree in 0.0f64..150.0,
        ) {
            let mut h = Household::new(income);
            h.targets.invalidity_pct = target_pct;
            h.benefits.avs.invalidity_monthly = avs;
            h.benefits.lpp.invalidity_monthly = lpp;
            h.benefits.third_pillar.invalidity_monthly = p3;
            h.ctx.children_count = children;
            h.ctx.invalidity_degree_pct = degree;

            let result = engine().compute(&h, reference());
            for stack in [&result.invalidity.maladie, &result.invalidity.accident,
                          &result.death.maladie, &result.death.accident, &result.retirement] {
                let raw = stack.raw_covered();
                prop_assert!(stack.covered >= 0.0 && stack.gap >= 0.0);
                prop_assert!((stack.covered - raw.min(stack.target)).abs() < 1e-9);
                prop_assert!((stack.gap - (stack.target - raw).max(0.0)).abs() < 1e-9);
                prop_assert!(stack.covered.is_finite() && stack.gap.is_finite());
            }
        }

        #[test]
        fn prop_idempotent(
            income in 0.0f64..300_000.0,
            avs in proptest::option::of(0.0f64..6_000.0),
        ) {
            let mut h = Household::new(income);
            h.benefits.avs.invalidity_monthly = avs;
            let e = engine();
            prop_assert_eq!(e.compute(&h, reference()), e.compute(&h, reference()));
        }
    }
}
