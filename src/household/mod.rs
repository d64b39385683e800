//! Household input value objects and batch loading

mod data;
pub mod loader;

pub use data::{
    AvsCareer, AvsInputs, BenefitInputs, EventCause, EventContext, Household, IncomeProfile,
    LppInputs, LppMinimumInputs, MaritalStatus, NeedTargets, Sex, SurvivorContext,
    ThirdPillarInputs, DEATH_TARGET_CEILING, INVALIDITY_TARGET_CEILING, RETIREMENT_TARGET_CEILING,
};
pub use loader::{load_household, load_households};
