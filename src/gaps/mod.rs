//! Gap Aggregator: target/covered/gap stacks per life event

mod aggregator;
mod stack;

pub use aggregator::{
    covered_children, monthly_target, DeathGaps, EventGaps, GapEngine, GapsResult, TargetsMonthly,
};
pub use stack::{GapSegment, GapStack, Pillar};
