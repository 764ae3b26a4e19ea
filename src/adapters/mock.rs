//! Mock estimator for testing.
//!
//! Configurable implementation of the Estimator port so the session core
//! can be exercised without calling the real gateway: queued outcomes,
//! optional simulated latency, and call recording for verification.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::budget::BudgetResult;
use crate::domain::project::ProjectParams;
use crate::ports::{Estimator, EstimatorError};

/// One scripted gateway outcome, consumed in queue order.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this budget.
    Success(BudgetResult),
    /// The gateway's explicit absence signal.
    Absent,
    /// Fail with this error.
    Error(EstimatorError),
}

/// Scriptable estimator for tests.
///
/// An exhausted queue yields `EmptyResponse`, so a manager under test
/// never hangs on a missing script entry.
#[derive(Debug, Clone, Default)]
pub struct MockEstimator {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<ProjectParams>>>,
}

impl MockEstimator {
    /// Creates a mock with an empty outcome queue and no delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an outcome.
    pub fn with_outcome(self, outcome: MockOutcome) -> Self {
        self.outcomes
            .lock()
            .expect("mock outcome lock poisoned")
            .push_back(outcome);
        self
    }

    /// Sets a simulated latency applied to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Handle to the recorded calls, for verification.
    pub fn call_log(&self) -> Arc<Mutex<Vec<ProjectParams>>> {
        Arc::clone(&self.calls)
    }

    /// Number of estimate calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call lock poisoned").len()
    }
}

#[async_trait]
impl Estimator for MockEstimator {
    async fn estimate(&self, params: &ProjectParams) -> Result<BudgetResult, EstimatorError> {
        self.calls
            .lock()
            .expect("mock call lock poisoned")
            .push(params.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let outcome = self
            .outcomes
            .lock()
            .expect("mock outcome lock poisoned")
            .pop_front();
        match outcome {
            Some(MockOutcome::Success(result)) => Ok(result),
            Some(MockOutcome::Absent) | None => Err(EstimatorError::EmptyResponse),
            Some(MockOutcome::Error(err)) => Err(err),
        }
    }
}
