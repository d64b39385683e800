//! CSV-based registry overrides
//!
//! The registry ships with compiled-in defaults; deployments that track
//! regulatory vintages override them from CSV files in a parameter directory:
//!
//! - `avs_scale.csv`: year, minMonthly, maxMonthly, minDeterminingIncome,
//!   maxDeterminingIncome (one row per vintage)
//! - `laa_params.csv`: one row with the `LaaParams` columns

use std::fs::File;
use std::path::Path;

use thiserror::Error;

use super::laa::LaaParams;
use super::scale::{AvsScale, ScaleEntry};

/// Default path to the parameter directory
pub const DEFAULT_PARAMS_PATH: &str = "data/params";

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameter file: {0}")]
    Csv(#[from] csv::Error),

    #[error("parameter file {0} contains no rows")]
    Empty(&'static str),
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScaleRow {
    year: i32,
    min_monthly: f64,
    max_monthly: f64,
    min_determining_income: f64,
    max_determining_income: f64,
}

/// Load the AVS scale vintages from `avs_scale.csv`
pub fn load_avs_scale(dir: &Path) -> Result<AvsScale, ParamsError> {
    let file = File::open(dir.join("avs_scale.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let row: ScaleRow = result?;
        entries.push((
            row.year,
            ScaleEntry {
                min_monthly: row.min_monthly,
                max_monthly: row.max_monthly,
                min_determining_income: row.min_determining_income,
                max_determining_income: row.max_determining_income,
            },
        ));
    }

    if entries.is_empty() {
        return Err(ParamsError::Empty("avs_scale.csv"));
    }
    Ok(AvsScale::new(entries))
}

/// Load LAA parameters from `laa_params.csv` (first row wins)
pub fn load_laa_params(dir: &Path) -> Result<LaaParams, ParamsError> {
    let file = File::open(dir.join("laa_params.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    for result in reader.deserialize() {
        let params: LaaParams = result?;
        return Ok(params);
    }
    Err(ParamsError::Empty("laa_params.csv"))
}
