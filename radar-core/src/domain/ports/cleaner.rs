// radar-core/src/domain/ports/cleaner.rs

use crate::domain::error::DomainError;
use crate::domain::quality::{QualityProfile, QualityReport};
use crate::domain::series::Observation;

/// Anything able to turn raw observations into a cleaned sequence plus a report.
pub trait Cleaner: Send + Sync {
    fn clean(
        &self,
        observations: &[Observation],
        profile: &QualityProfile,
    ) -> Result<(Vec<Observation>, QualityReport), DomainError>;
}
