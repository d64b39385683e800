//! Scenario runner for efficient batch computations
//!
//! Pre-loads the regulatory registry once, then allows computing gaps for
//! many households without re-reading parameter files.

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::gaps::{GapEngine, GapsResult};
use crate::household::{EventCause, Household};
use crate::params::{ParamsError, RegulatoryParams};
use crate::timeline::{TimelineProjector, TimelineResult, TimelineTheme};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for household in &households {
///     let gaps = runner.run(household, reference);
/// }
/// ```
pub struct ScenarioRunner {
    params: RegulatoryParams,
}

impl ScenarioRunner {
    /// Runner with the compiled-in registry defaults
    pub fn new() -> Self {
        Self {
            params: RegulatoryParams::default_2024(),
        }
    }

    /// Runner loading parameter overrides from CSV files
    pub fn from_csv() -> Result<Self, ParamsError> {
        Ok(Self {
            params: RegulatoryParams::from_csv()?,
        })
    }

    /// Runner from a specific parameter directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, ParamsError> {
        Ok(Self {
            params: RegulatoryParams::from_csv_path(path)?,
        })
    }

    /// Runner with pre-built parameters
    pub fn with_params(params: RegulatoryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RegulatoryParams {
        &self.params
    }

    /// Compute the gap stacks for one household
    pub fn run(&self, household: &Household, reference: NaiveDate) -> GapsResult {
        GapEngine::new(self.params.clone()).compute(household, reference)
    }

    /// Compute gaps for many households sequentially
    pub fn run_batch(&self, households: &[Household], reference: NaiveDate) -> Vec<GapsResult> {
        let engine = GapEngine::new(self.params.clone());
        households
            .iter()
            .map(|h| engine.compute(h, reference))
            .collect()
    }

    /// Compute gaps for many households in parallel. Safe because the
    /// computation is pure and the registry is read-only.
    pub fn run_batch_par(&self, households: &[Household], reference: NaiveDate) -> Vec<GapsResult> {
        let engine = GapEngine::new(self.params.clone());
        households
            .par_iter()
            .map(|h| engine.compute(h, reference))
            .collect()
    }

    /// Project a monthly timeline for one household
    pub fn run_timeline(
        &self,
        household: &Household,
        theme: TimelineTheme,
        scenario: EventCause,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TimelineResult {
        TimelineProjector::new(&self.params, household).project(theme, scenario, start, end)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
