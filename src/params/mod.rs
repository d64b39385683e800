//! Read-only regulatory-parameter registry: LAA constants, AVS benefit scale
//! and LPP legal minima
//!
//! Loaded once (compiled-in defaults or CSV overrides) and treated as
//! immutable for a computation's lifetime. The engine never writes to it, so
//! concurrent callers can share one instance freely.

mod laa;
mod lpp;
mod scale;
pub mod loader;

pub use laa::LaaParams;
pub use lpp::{CreditBand, LppMinimumParams};
pub use scale::{AvsScale, ScaleEntry, FULL_CAREER_YEARS};
pub use loader::{ParamsError, DEFAULT_PARAMS_PATH};

use std::path::Path;

/// Derived AVS pension fractions (widow/widower and child/orphan pensions as
/// fractions of the base pension)
pub const AVS_WIDOW_FRACTION: f64 = 0.80;
pub const AVS_CHILD_FRACTION: f64 = 0.40;

/// Orphan/child pension as a fraction of the adult LPP invalidity pension,
/// the legal default when the certificate carries no child figure
pub const LPP_CHILD_FRACTION: f64 = 0.20;

/// Container for all regulatory parameters
#[derive(Debug, Clone)]
pub struct RegulatoryParams {
    pub laa: LaaParams,
    pub avs_scale: AvsScale,
    pub lpp: LppMinimumParams,
}

impl RegulatoryParams {
    /// Registry with the compiled-in 2024 vintage
    pub fn default_2024() -> Self {
        Self {
            laa: LaaParams::default(),
            avs_scale: AvsScale::default_2024(),
            lpp: LppMinimumParams::default(),
        }
    }

    /// Load overrides from CSV files in the default location (data/params/)
    pub fn from_csv() -> Result<Self, ParamsError> {
        Self::from_csv_path(Path::new(DEFAULT_PARAMS_PATH))
    }

    /// Load overrides from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, ParamsError> {
        Ok(Self {
            laa: loader::load_laa_params(path)?,
            avs_scale: loader::load_avs_scale(path)?,
            lpp: LppMinimumParams::default(),
        })
    }
}

impl Default for RegulatoryParams {
    fn default() -> Self {
        Self::default_2024()
    }
}
