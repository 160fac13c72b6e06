//! Crate-wide error type.
//!
//! Every error is fatal to the run that produced it. The sampler performs no
//! local recovery; callers retry a whole run with different inputs.

use thiserror::Error;

/// Boxed error returned by caller-supplied generators and filters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AbcError>;

#[derive(Error, Debug)]
pub enum AbcError {
    /// A distribution was constructed or updated with parameters outside its domain.
    #[error("invalid {family} parameter: {reason}")]
    InvalidParameter {
        family: &'static str,
        reason: String,
    },

    /// Two vectors that must be position-aligned have different lengths.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A single trial exhausted its retry cap without an acceptance.
    #[error("trial {trial} was not accepted after {attempts} attempts")]
    AcceptanceTimeout { trial: usize, attempts: u64 },

    #[error("generator failed")]
    Generator(#[source] BoxError),

    #[error("acceptance filter failed")]
    Filter(#[source] BoxError),

    /// The run was stopped between trials. `completed` trials had been accepted.
    #[error("run cancelled after {completed} completed trials")]
    Cancelled { completed: usize },

    #[error("invalid sampler configuration: {reason}")]
    InvalidConfig { reason: &'static str },

    #[cfg(feature = "csv")]
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "csv")]
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A delimited field could not be parsed as a number. `line` is 1-based.
    #[cfg(feature = "csv")]
    #[error("line {line}: cannot parse {field:?} as a number")]
    Parse { line: usize, field: String },
}

impl AbcError {
    pub(crate) fn invalid(family: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            family,
            reason: reason.into(),
        }
    }

    /// Fails with [`AbcError::DimensionMismatch`] unless `found == expected`.
    pub(crate) fn check_dims(expected: usize, found: usize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, found })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn check_dims_reports_both_lengths() {
        assert!(AbcError::check_dims(3, 3).is_ok());
        let err = AbcError::check_dims(3, 2).unwrap_err();
        assert!(matches!(
            err,
            AbcError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        ));
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, found 2");
    }

    #[test]
    fn generator_error_keeps_source() {
        let err = AbcError::Generator("simulator exploded".into());
        assert_eq!(err.to_string(), "generator failed");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("simulator exploded".to_string())
        );
    }
}
