//! Household input structures matching the advisory intake format
//!
//! Every numeric field that can come from a pension certificate or a form is
//! optional: absence is meaningful (it triggers the resolver fallback chain),
//! never an error. All of these are value objects, created fresh for each
//! computation and never mutated in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::num::clamp_pct;
use crate::params::LaaParams;

/// Legal ceilings applied to replacement-income targets
pub const INVALIDITY_TARGET_CEILING: f64 = 90.0;
pub const DEATH_TARGET_CEILING: f64 = 90.0;
pub const RETIREMENT_TARGET_CEILING: f64 = 100.0;

fn default_invalidity_degree() -> f64 {
    100.0
}

/// Annual income of the insured person, in CHF
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub annual: f64,
}

impl IncomeProfile {
    pub fn new(annual: f64) -> Self {
        Self { annual }
    }
}

/// Cause of a disability or death event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCause {
    Sickness,
    Accident,
}

impl Default for EventCause {
    fn default() -> Self {
        EventCause::Sickness
    }
}

/// Marital status of the insured person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    RegisteredPartnership,
    Cohabiting,
    Widowed,
}

impl MaritalStatus {
    /// Married or in a registered partnership (the two statuses that open the
    /// statutory survivor pensions)
    pub fn is_union(&self) -> bool {
        matches!(
            self,
            MaritalStatus::Married | MaritalStatus::RegisteredPartnership
        )
    }
}

impl Default for MaritalStatus {
    fn default() -> Self {
        MaritalStatus::Single
    }
}

/// Sex, used only to pick the reference retirement age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Default for Sex {
    fn default() -> Self {
        Sex::Male
    }
}

/// Family situation of the surviving spouse/partner at the event date
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurvivorContext {
    #[serde(default)]
    pub marital_status: MaritalStatus,

    /// Whether the survivor has at least one child
    #[serde(default)]
    pub has_child: bool,

    /// Age of the survivor at widowhood, in years
    #[serde(default)]
    pub age_at_widowhood: f64,

    /// Duration of the marriage / registered partnership, in years
    #[serde(default)]
    pub marriage_years: f64,

    /// Duration of cohabitation, in years (cohabiting couples)
    #[serde(default)]
    pub cohabitation_years: f64,

    /// Whether the partner was designated as beneficiary with the pension fund
    #[serde(default)]
    pub partner_designated: bool,
}

/// Optional career data activating the AVS career override
///
/// Any present field switches all AVS figures from caller-supplied values to a
/// scale-based estimate (échelle 44 lookup weighted by the career
/// coefficient).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvsCareer {
    /// First year of AVS contributions
    #[serde(default)]
    pub start_year: Option<i32>,

    /// Years with missing contributions
    #[serde(default)]
    pub missing_years: Option<f64>,

    /// Years with caregiving credits (bonification pour tâches d'assistance)
    #[serde(default)]
    pub caregiving_years: Option<f64>,
}

impl AvsCareer {
    pub fn is_empty(&self) -> bool {
        self.start_year.is_none()
            && self.missing_years.is_none()
            && self.caregiving_years.is_none()
    }
}

/// Event-side inputs: causes, disability degree, children, survivor situation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContext {
    /// Cause retained for the disability event
    #[serde(default)]
    pub cause_invalidity: EventCause,

    /// Cause retained for the death event
    #[serde(default)]
    pub cause_death: EventCause,

    /// Disability degree in percent, clamped into [40, 100]
    #[serde(default = "default_invalidity_degree")]
    pub invalidity_degree_pct: f64,

    /// Declared number of children
    #[serde(default)]
    pub children_count: u32,

    /// Birthdates, when known. A child with no birthdate is never counted as
    /// eligible; the declared count is only a fallback for per-child amounts
    /// when no birthdate at all is known.
    #[serde(default)]
    pub children_birthdates: Vec<Option<NaiveDate>>,

    /// Extend child eligibility to 25 while in education
    #[serde(default)]
    pub extend_child_to_25: bool,

    #[serde(default)]
    pub survivor: SurvivorContext,

    /// Career override parameters; any present field activates the override
    #[serde(default)]
    pub avs_career: Option<AvsCareer>,

    /// Birth date of the insured, needed for the retirement projection
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,

    #[serde(default)]
    pub sex: Sex,
}

impl Default for EventContext {
    fn default() -> Self {
        Self {
            cause_invalidity: EventCause::Sickness,
            cause_death: EventCause::Sickness,
            invalidity_degree_pct: 100.0,
            children_count: 0,
            children_birthdates: Vec::new(),
            extend_child_to_25: false,
            survivor: SurvivorContext::default(),
            avs_career: None,
            birth_date: None,
            sex: Sex::Male,
        }
    }
}

impl EventContext {
    /// Disability degree clamped into the legal [40, 100] band
    pub fn degree(&self) -> f64 {
        let d = crate::num::finite_or_zero(self.invalidity_degree_pct);
        d.clamp(40.0, 100.0)
    }

    /// Whether the career override is active
    pub fn career_override_active(&self) -> bool {
        let career_given = self.avs_career.as_ref().is_some_and(|c| !c.is_empty());
        let birthdates_given = self.children_birthdates.iter().any(|b| b.is_some());
        career_given || birthdates_given
    }
}

/// Target replacement-income percentages per life event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedTargets {
    pub invalidity_pct: f64,
    pub death_pct: f64,
    pub retirement_pct: f64,
}

impl Default for NeedTargets {
    fn default() -> Self {
        Self {
            invalidity_pct: 90.0,
            death_pct: 80.0,
            retirement_pct: 80.0,
        }
    }
}

impl NeedTargets {
    /// Percentages clamped to their legal ceilings
    pub fn clamped(&self) -> NeedTargets {
        NeedTargets {
            invalidity_pct: clamp_pct(self.invalidity_pct, INVALIDITY_TARGET_CEILING),
            death_pct: clamp_pct(self.death_pct, DEATH_TARGET_CEILING),
            retirement_pct: clamp_pct(self.retirement_pct, RETIREMENT_TARGET_CEILING),
        }
    }
}

/// AVS amounts as supplied by the caller (monthly, CHF)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvsInputs {
    #[serde(default)]
    pub invalidity_monthly: Option<f64>,

    #[serde(default)]
    pub invalidity_child_monthly: Option<f64>,

    #[serde(default)]
    pub widow_monthly: Option<f64>,

    #[serde(default)]
    pub child_monthly: Option<f64>,

    /// Server-projected old-age pension
    #[serde(default)]
    pub old_age_monthly: Option<f64>,
}

/// Inputs required by the LPP legal-minimum invalidity formula
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LppMinimumInputs {
    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub age_years: Option<u32>,

    #[serde(default)]
    pub sex: Option<Sex>,

    #[serde(default)]
    pub coordinated_salary: Option<f64>,

    #[serde(default)]
    pub current_assets: Option<f64>,
}

/// LPP amounts from the pension certificate (monthly unless noted)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LppInputs {
    #[serde(default)]
    pub invalidity_monthly: Option<f64>,

    #[serde(default)]
    pub invalidity_child_monthly: Option<f64>,

    #[serde(default)]
    pub widow_monthly: Option<f64>,

    #[serde(default)]
    pub orphan_monthly: Option<f64>,

    /// Lump-sum death capital, CHF
    #[serde(default)]
    pub death_capital: Option<f64>,

    /// Projected retirement pension from the certificate, CHF per year
    #[serde(default)]
    pub retirement_annual_from_cert: Option<f64>,

    /// Projected retirement capital at 65 from the certificate, CHF
    #[serde(default)]
    pub capital_at_65_from_cert: Option<f64>,

    /// Conversion rate from the certificate, percent
    #[serde(default)]
    pub min_conversion_rate_pct: Option<f64>,

    #[serde(default)]
    pub invalidity_min: LppMinimumInputs,
}

/// Third-pillar (private) coverage, monthly CHF
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPillarInputs {
    #[serde(default)]
    pub invalidity_monthly: Option<f64>,

    #[serde(default)]
    pub death_monthly: Option<f64>,

    #[serde(default)]
    pub retirement_monthly: Option<f64>,
}

/// Per-scheme entitlement data for one insured person
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitInputs {
    #[serde(default)]
    pub avs: AvsInputs,

    #[serde(default)]
    pub lpp: LppInputs,

    #[serde(default)]
    pub third_pillar: ThirdPillarInputs,

    /// Per-household LAA parameter override; the registry defaults apply when
    /// absent
    #[serde(default)]
    pub laa: Option<LaaParams>,
}

/// One full computation input: income, targets, entitlements and event context
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub income: IncomeProfile,

    #[serde(default)]
    pub targets: NeedTargets,

    #[serde(default)]
    pub benefits: BenefitInputs,

    #[serde(default)]
    pub ctx: EventContext,
}

impl Household {
    pub fn new(annual_income: f64) -> Self {
        Self {
            income: IncomeProfile::new(annual_income),
            targets: NeedTargets::default(),
            benefits: BenefitInputs::default(),
            ctx: EventContext::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_clamped() {
        let mut ctx = EventContext::default();
        ctx.invalidity_degree_pct = 20.0;
        assert_eq!(ctx.degree(), 40.0);
        ctx.invalidity_degree_pct = 130.0;
        assert_eq!(ctx.degree(), 100.0);
        ctx.invalidity_degree_pct = 70.0;
        assert_eq!(ctx.degree(), 70.0);
    }

    #[test]
    fn test_targets_clamped() {
        let targets = NeedTargets {
            invalidity_pct: 95.0,
            death_pct: 120.0,
            retirement_pct: 110.0,
        };
        let c = targets.clamped();
        assert_eq!(c.invalidity_pct, 90.0);
        assert_eq!(c.death_pct, 90.0);
        assert_eq!(c.retirement_pct, 100.0);
    }

    #[test]
    fn test_career_override_detection() {
        let mut ctx = EventContext::default();
        assert!(!ctx.career_override_active());

        ctx.avs_career = Some(AvsCareer::default());
        assert!(!ctx.career_override_active());

        ctx.avs_career = Some(AvsCareer {
            missing_years: Some(3.0),
            ..Default::default()
        });
        assert!(ctx.career_override_active());

        let mut ctx2 = EventContext::default();
        ctx2.children_birthdates = vec![NaiveDate::from_ymd_opt(2015, 6, 1)];
        assert!(ctx2.career_override_active());
    }

    #[test]
    fn test_union_statuses() {
        assert!(MaritalStatus::Married.is_union());
        assert!(MaritalStatus::RegisteredPartnership.is_union());
        assert!(!MaritalStatus::Cohabiting.is_union());
        assert!(!MaritalStatus::Divorced.is_union());
    }

    #[test]
    fn test_household_json_roundtrip() {
        let json = r#"{
            "income": { "annual": 95000.0 },
            "targets": { "invalidityPct": 90.0, "deathPct": 80.0, "retirementPct": 80.0 },
            "benefits": {
                "avs": { "invalidityMonthly": 2100.0, "widowMonthly": 1680.0, "childMonthly": 840.0 },
                "lpp": { "invalidityMonthly": 2000.0 }
            },
            "ctx": { "childrenCount": 2 }
        }"#;
        let h: Household = serde_json::from_str(json).expect("valid household JSON");
        assert_eq!(h.income.annual, 95000.0);
        assert_eq!(h.benefits.avs.invalidity_monthly, Some(2100.0));
        assert_eq!(h.benefits.lpp.invalidity_child_monthly, None);
        assert_eq!(h.ctx.children_count, 2);
    }
}
