//! Ordered-candidate fallback resolution
//!
//! Every benefit figure in the engine comes out of the same abstraction: an
//! ordered list of candidate sources, the first finite positive value wins.
//! The winning source is kept on the result so downstream segments can flag
//! estimated figures.

use serde::{Deserialize, Serialize};

use crate::num::finite_or_zero;

/// Which branch of a fallback chain produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BenefitSource {
    /// Figure read from a pension certificate
    Certificate,
    /// Caller-supplied figure used as-is
    Provided,
    /// Statutory-minimum formula
    LegalMinimum,
    /// Derived from a retirement capital and a conversion rate
    CapitalProxy,
    /// Recomputed from the AVS benefit scale (career override)
    ScaleEstimate,
    /// No source produced a value
    None,
}

impl BenefitSource {
    /// Whether a figure from this source is an estimate rather than a sourced
    /// entitlement
    pub fn is_estimated(&self) -> bool {
        matches!(
            self,
            BenefitSource::LegalMinimum | BenefitSource::CapitalProxy | BenefitSource::ScaleEstimate
        )
    }
}

/// A resolved monthly benefit amount and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBenefit {
    /// Monthly amount, CHF, always finite and >= 0
    pub monthly: f64,
    pub source: BenefitSource,
}

impl ResolvedBenefit {
    pub fn none() -> Self {
        Self {
            monthly: 0.0,
            source: BenefitSource::None,
        }
    }

    pub fn new(monthly: f64, source: BenefitSource) -> Self {
        Self {
            monthly: finite_or_zero(monthly).max(0.0),
            source,
        }
    }

    pub fn estimated(&self) -> bool {
        self.source.is_estimated()
    }

    /// Same source, amount scaled by a non-negative factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.monthly * factor, self.source)
    }
}

/// One candidate in a fallback chain
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub source: BenefitSource,
    pub value: Option<f64>,
}

impl Candidate {
    pub fn new(source: BenefitSource, value: Option<f64>) -> Self {
        Self { source, value }
    }
}

/// Resolve an ordered candidate list: the first finite, strictly positive
/// value wins; an exhausted chain resolves to zero
pub fn resolve_chain(label: &str, candidates: &[Candidate]) -> ResolvedBenefit {
    for candidate in candidates {
        if let Some(value) = candidate.value {
            let value = finite_or_zero(value);
            if value > 0.0 {
                log::debug!("{}: resolved {:.2}/month from {:?}", label, value, candidate.source);
                return ResolvedBenefit::new(value, candidate.source);
            }
        }
    }
    log::debug!("{}: no candidate fired, resolved to 0", label);
    ResolvedBenefit::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_positive_candidate_wins() {
        let resolved = resolve_chain(
            "test",
            &[
                Candidate::new(BenefitSource::Certificate, None),
                Candidate::new(BenefitSource::LegalMinimum, Some(0.0)),
                Candidate::new(BenefitSource::CapitalProxy, Some(1_700.0)),
                Candidate::new(BenefitSource::Provided, Some(9_999.0)),
            ],
        );
        assert_eq!(resolved.monthly, 1_700.0);
        assert_eq!(resolved.source, BenefitSource::CapitalProxy);
        assert!(resolved.estimated());
    }

    #[test]
    fn test_exhausted_chain_is_zero() {
        let resolved = resolve_chain(
            "test",
            &[
                Candidate::new(BenefitSource::Certificate, None),
                Candidate::new(BenefitSource::LegalMinimum, Some(-12.0)),
            ],
        );
        assert_eq!(resolved.monthly, 0.0);
        assert_eq!(resolved.source, BenefitSource::None);
        assert!(!resolved.estimated());
    }

    #[test]
    fn test_non_finite_candidate_skipped() {
        let resolved = resolve_chain(
            "test",
            &[
                Candidate::new(BenefitSource::Certificate, Some(f64::NAN)),
                Candidate::new(BenefitSource::LegalMinimum, Some(500.0)),
            ],
        );
        assert_eq!(resolved.source, BenefitSource::LegalMinimum);
        assert_eq!(resolved.monthly, 500.0);
    }

    #[test]
    fn test_certificate_is_sourced_not_estimated() {
        let resolved = resolve_chain(
            "test",
            &[Candidate::new(BenefitSource::Certificate, Some(2_000.0))],
        );
        assert!(!resolved.estimated());
    }
}
