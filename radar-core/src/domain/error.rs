// radar-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid series '{code}': {reason}")]
    #[diagnostic(
        code(radar::domain::series),
        help("A series needs a non-empty code and a recognized frequency.")
    )]
    InvalidSeries { code: String, reason: String },

    #[error("Invalid observation at index {index}: {reason}")]
    #[diagnostic(
        code(radar::domain::observation),
        help("The whole batch is rejected. Fix the source data or the normalization mapping.")
    )]
    InvalidObservation { index: usize, reason: String },

    #[error("Unknown frequency '{0}'")]
    #[diagnostic(
        code(radar::domain::frequency),
        help("Expected one of: daily, weekly, monthly, quarterly, annual.")
    )]
    UnknownFrequency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_a_diagnostic_code() {
        let errors = [
            DomainError::InvalidSeries {
                code: String::new(),
                reason: "empty code".into(),
            },
            DomainError::InvalidObservation {
                index: 3,
                reason: "value is NaN".into(),
            },
            DomainError::UnknownFrequency("hourly".into()),
        ];
        for err in &errors {
            // Exhaustive on purpose: a new variant must get a code here.
            let expected = match err {
                DomainError::InvalidSeries { .. } => "radar::domain::series",
                DomainError::InvalidObservation { .. } => "radar::domain::observation",
                DomainError::UnknownFrequency(_) => "radar::domain::frequency",
            };
            let code = err.code().map(|c| c.to_string());
            assert_eq!(code.as_deref(), Some(expected));
        }
    }
}
