//! User-facing session errors.
//!
//! These are the only messages that cross the session boundary to the
//! presentation layer. Gateway-internal diagnostics never leak here; they
//! go to the log and are collapsed into one of these categories.

use thiserror::Error;

use crate::ports::EstimatorError;

/// Categorized, user-safe session failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The gateway signalled it could not produce a result for these
    /// parameters (explicit absence).
    #[error("The estimator encountered an issue. Please check your project parameters.")]
    InvalidParameters,

    /// Any other gateway failure (network, malformed response, ...).
    #[error("A server error occurred. Please try again later.")]
    ServiceUnavailable,

    /// No API credential configured; no network call was attempted.
    #[error("No API key is configured. Add a credential to enable estimates.")]
    MissingCredential,

    /// A submission arrived while another estimate was in flight.
    #[error("An estimate is already in progress.")]
    EstimateInFlight,
}

impl From<&EstimatorError> for SessionError {
    fn from(err: &EstimatorError) -> Self {
        match err {
            EstimatorError::EmptyResponse => SessionError::InvalidParameters,
            EstimatorError::MissingCredential => SessionError::MissingCredential,
            _ => SessionError::ServiceUnavailable,
        }
    }
}
