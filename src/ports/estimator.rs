//! Estimator port - interface to the generative estimation gateway.
//!
//! The gateway is a black box with unbounded latency and non-deterministic
//! content: repeated calls with identical parameters may return different
//! budgets, and no idempotence is assumed. Implementations translate
//! between the provider API and the domain's `BudgetResult`, enforcing the
//! response contract (see [`BudgetResult::validate_structure`]) before a
//! result crosses this boundary.
//!
//! [`BudgetResult::validate_structure`]: crate::domain::budget::BudgetResult::validate_structure

use async_trait::async_trait;

use crate::domain::budget::BudgetResult;
use crate::domain::project::ProjectParams;

/// Port for the external estimation service.
#[async_trait]
pub trait Estimator: Send + Sync {
    /// Produces a structured budget for the given parameters.
    ///
    /// Returns a structurally valid [`BudgetResult`] (every category has
    /// at least one item, identifiers unique within their scope) or an
    /// [`EstimatorError`]. Explicit "no result" from the gateway is
    /// [`EstimatorError::EmptyResponse`], not an empty budget.
    async fn estimate(&self, params: &ProjectParams) -> Result<BudgetResult, EstimatorError>;
}

/// Estimation gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimatorError {
    /// No credential configured; the call was short-circuited locally.
    #[error("no API credential configured")]
    MissingCredential,

    /// The gateway explicitly returned no result.
    #[error("gateway returned no result")]
    EmptyResponse,

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable (5xx).
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The decoded response violates the budget contract.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// The request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl EstimatorError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a schema violation error.
    pub fn schema_violation(message: impl Into<String>) -> Self {
        Self::SchemaViolation(message.into())
    }

    /// Returns true if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EstimatorError::RateLimited { .. }
                | EstimatorError::Unavailable { .. }
                | EstimatorError::Network(_)
                | EstimatorError::Timeout { .. }
        )
    }
}
