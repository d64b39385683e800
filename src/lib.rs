//! Gap Engine - benefit coordination and coverage-gap computation for Swiss
//! three-pillar prevoyance
//!
//! This library provides:
//! - Per-scheme benefit resolution through priority-ordered fallback chains
//! - Eligibility predicates over marital/family state and a reference date
//! - Cross-scheme coordination (additive sickness, capped/prorated accident)
//! - Target/covered/gap stacks per life event (disability, death, retirement)
//! - Month-by-month timeline projection with age-indexed transitions

pub mod coordination;
pub mod eligibility;
pub mod gaps;
pub mod household;
pub mod num;
pub mod params;
pub mod resolve;
pub mod scenario;
pub mod timeline;

// Re-export commonly used types
pub use gaps::{GapEngine, GapSegment, GapStack, GapsResult, Pillar};
pub use household::{EventCause, Household, NeedTargets};
pub use params::RegulatoryParams;
pub use resolve::{BenefitSource, ResolvedBenefit};
pub use scenario::ScenarioRunner;
pub use timeline::{TimelineProjector, TimelineResult, TimelineTheme};
