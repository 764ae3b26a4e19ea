//! SessionManager - the session state manager.
//!
//! Owns the current snapshot, the bounded undo history, the loading phase
//! and the synthetic progress value, and mediates every mutation. The
//! presentation layer holds no state of its own: it subscribes to the
//! published [`SessionView`] and dispatches intents (submit, toggle,
//! undo) back to the manager.
//!
//! Concurrency model: all state lives behind one mutex that is never held
//! across an await. The only suspension point is the estimator call, and
//! at most one call is outstanding at a time - a submit that arrives while
//! another estimate is pending is rejected, never queued. The progress
//! ticker is a repeating task that is cancelled on every exit from
//! `Pending` and when the manager is dropped.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::budget::BudgetResult;
use crate::domain::foundation::StateMachine;
use crate::domain::project::ProjectParams;
use crate::ports::Estimator;

use super::{
    EstimationProgress, SessionError, SessionPhase, SessionSnapshot, UndoHistory, PROGRESS_TICK,
};

/// Read-only view of session state published to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub params: ProjectParams,
    pub result: Option<BudgetResult>,
    /// Present while `Pending` (synthetic, capped at 98) and on `Ready`
    /// (exactly 100 for the final render); absent otherwise, so a failed
    /// estimate discontinues the indicator instead of freezing it.
    pub progress: Option<f64>,
    pub error: Option<SessionError>,
    pub can_undo: bool,
}

struct Inner {
    phase: SessionPhase,
    current: SessionSnapshot,
    history: UndoHistory,
    progress: EstimationProgress,
    error: Option<SessionError>,
}

impl Inner {
    fn view(&self) -> SessionView {
        let progress = match self.phase {
            SessionPhase::Pending | SessionPhase::Ready => Some(self.progress.value()),
            SessionPhase::Idle | SessionPhase::Failed => None,
        };
        SessionView {
            phase: self.phase,
            params: self.current.params.clone(),
            result: self.current.result.clone(),
            progress,
            error: self.error.clone(),
            can_undo: !self.history.is_empty(),
        }
    }
}

/// The session state manager.
pub struct SessionManager {
    estimator: Arc<dyn Estimator>,
    inner: Arc<Mutex<Inner>>,
    view_tx: watch::Sender<SessionView>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl SessionManager {
    /// Creates a manager at session start: default params, no result,
    /// empty history, `Idle` phase.
    pub fn new(estimator: Arc<dyn Estimator>) -> Self {
        Self::with_params(estimator, ProjectParams::default())
    }

    /// Creates a manager with specific starting parameters.
    pub fn with_params(estimator: Arc<dyn Estimator>, params: ProjectParams) -> Self {
        let inner = Inner {
            phase: SessionPhase::Idle,
            current: SessionSnapshot::initial(params),
            history: UndoHistory::new(),
            progress: EstimationProgress::default(),
            error: None,
        };
        let (view_tx, _) = watch::channel(inner.view());
        Self {
            estimator,
            inner: Arc::new(Mutex::new(inner)),
            view_tx,
            ticker: Mutex::new(None),
        }
    }

    /// Current state, cloned.
    pub fn view(&self) -> SessionView {
        self.lock_inner().view()
    }

    /// Subscribes to state changes. Receivers see the latest view after
    /// every mutation and every progress tick.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view_tx.subscribe()
    }

    /// The displayed grand total of the current result, derived fresh.
    pub fn displayed_total(&self) -> Option<f64> {
        self.lock_inner()
            .current
            .result
            .as_ref()
            .map(BudgetResult::displayed_total)
    }

    /// Submits parameters for estimation.
    ///
    /// Rejects structurally invalid params and re-entrant submissions
    /// while an estimate is pending. Invokes the estimator exactly once.
    /// On success the pre-submission snapshot is pushed onto the history
    /// and the session becomes `Ready`; on failure the prior snapshot is
    /// preserved, no history entry is created, and the session becomes
    /// `Failed` with a categorized user-facing error.
    pub async fn submit(&self, params: ProjectParams) -> Result<(), SessionError> {
        if let Err(err) = params.validate() {
            tracing::warn!(error = %err, "rejected submission with invalid parameters");
            return Err(SessionError::InvalidParameters);
        }

        {
            let mut inner = self.lock_inner();
            if !inner.phase.can_transition_to(&SessionPhase::Pending) {
                tracing::warn!(phase = ?inner.phase, "rejected re-entrant submission");
                return Err(SessionError::EstimateInFlight);
            }
            inner.phase = SessionPhase::Pending;
            inner.error = None;
            inner.progress = EstimationProgress::start();
            self.publish(&inner);
        }
        self.start_ticker();
        tracing::info!(project = %params.name, "estimation started");

        let outcome = self.estimator.estimate(&params).await;

        self.stop_ticker();
        let mut inner = self.lock_inner();
        match outcome {
            Ok(result) => {
                let previous = std::mem::replace(
                    &mut inner.current,
                    SessionSnapshot::with_result(params, result),
                );
                inner.history.push(previous);
                inner.phase = SessionPhase::Ready;
                inner.progress.finish();
                self.publish(&inner);
                tracing::info!(
                    total = inner.current.result.as_ref().map(|r| r.displayed_total()),
                    "estimation succeeded"
                );
                Ok(())
            }
            Err(err) => {
                let session_err = SessionError::from(&err);
                tracing::warn!(error = %err, "estimation failed");
                inner.phase = SessionPhase::Failed;
                inner.error = Some(session_err.clone());
                self.publish(&inner);
                Err(session_err)
            }
        }
    }

    /// Flips the `included` flag of one line item.
    ///
    /// No-op unless the session is `Ready` and both ids resolve; pushes
    /// the pre-mutation snapshot onto the history before mutating.
    /// Returns whether anything changed.
    pub fn toggle_line_item(&self, category_id: &str, item_id: &str) -> bool {
        let mut inner = self.lock_inner();
        if inner.phase != SessionPhase::Ready {
            return false;
        }
        let known = inner
            .current
            .result
            .as_ref()
            .is_some_and(|result| result.find_item(category_id, item_id).is_some());
        if !known {
            tracing::debug!(category_id, item_id, "ignored toggle for unknown line item");
            return false;
        }

        let before = inner.current.clone();
        inner.history.push(before);
        if let Some(result) = inner.current.result.as_mut() {
            result.toggle_item(category_id, item_id);
        }
        self.publish(&inner);
        tracing::debug!(category_id, item_id, "line item toggled");
        true
    }

    /// Restores the most recent pre-mutation snapshot.
    ///
    /// Strictly LIFO, no redo. No-op on empty history and while an
    /// estimate is pending. Returns whether a snapshot was restored.
    pub fn undo(&self) -> bool {
        let mut inner = self.lock_inner();
        if inner.phase == SessionPhase::Pending {
            return false;
        }
        let Some(snapshot) = inner.history.pop() else {
            return false;
        };
        inner.phase = if snapshot.result.is_some() {
            SessionPhase::Ready
        } else {
            SessionPhase::Idle
        };
        inner.current = snapshot;
        self.publish(&inner);
        tracing::debug!(remaining = inner.history.len(), "undo applied");
        true
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("session state lock poisoned")
    }

    fn publish(&self, inner: &Inner) {
        // Send fails only when every receiver is gone; state is still
        // readable through view().
        let _ = self.view_tx.send(inner.view());
    }

    fn start_ticker(&self) {
        let inner = Arc::clone(&self.inner);
        let view_tx = self.view_tx.clone();
        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(PROGRESS_TICK);
            // interval's first tick completes immediately; progress must
            // sit at 0 for the first cadence period.
            tick.tick().await;
            loop {
                tick.tick().await;
                let view = {
                    let mut guard = inner.lock().expect("session state lock poisoned");
                    if guard.phase != SessionPhase::Pending {
                        break;
                    }
                    guard.progress.advance();
                    guard.view()
                };
                let _ = view_tx.send(view);
            }
        });

        let mut ticker = self.ticker.lock().expect("ticker lock poisoned");
        if let Some(previous) = ticker.replace(handle) {
            previous.abort();
        }
    }

    fn stop_ticker(&self) {
        if let Some(handle) = self.ticker.lock().expect("ticker lock poisoned").take() {
            handle.abort();
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockEstimator, MockOutcome};
    use crate::domain::budget::{BudgetCategory, LineItem};
    use crate::ports::EstimatorError;

    fn shell_budget() -> BudgetResult {
        BudgetResult {
            total_cost: 80_000.0,
            site_cost_per_sq_ft: 12.0,
            shell_cost_per_sq_ft: 210.0,
            cost_index: Some(1.0),
            categories: vec![BudgetCategory {
                id: "shell".to_string(),
                name: "Shell Construction".to_string(),
                amount: 80_000.0,
                percentage: 100.0,
                items: vec![
                    LineItem {
                        id: "framing".to_string(),
                        name: "Framing".to_string(),
                        amount: 50_000.0,
                        included: true,
                    },
                    LineItem {
                        id: "roof".to_string(),
                        name: "Roofing".to_string(),
                        amount: 30_000.0,
                        included: true,
                    },
                ],
            }],
            expert_advice: "Healthy budget.".to_string(),
            recommended_scopes: vec![],
            risk_factors: vec![],
            timeline_weeks: 26.0,
            needed_files: None,
        }
    }

    fn structure_params() -> ProjectParams {
        ProjectParams {
            include_structure: true,
            proposed_building_sqft: 4_000.0,
            ..Default::default()
        }
    }

    fn manager_with(outcomes: Vec<MockOutcome>) -> SessionManager {
        let mut mock = MockEstimator::new();
        for outcome in outcomes {
            mock = mock.with_outcome(outcome);
        }
        SessionManager::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn successful_submit_transitions_to_ready() {
        let manager = manager_with(vec![MockOutcome::Success(shell_budget())]);
        manager.submit(structure_params()).await.unwrap();

        let view = manager.view();
        assert_eq!(view.phase, SessionPhase::Ready);
        assert_eq!(view.progress, Some(100.0));
        assert!(view.error.is_none());
        assert!(view.can_undo);
        assert_eq!(manager.displayed_total(), Some(80_000.0));
    }

    #[tokio::test]
    async fn failed_submit_preserves_prior_snapshot() {
        let manager = manager_with(vec![MockOutcome::Error(EstimatorError::network("down"))]);
        let before = manager.view();
        let err = manager.submit(structure_params()).await.unwrap_err();

        assert_eq!(err, SessionError::ServiceUnavailable);
        let view = manager.view();
        assert_eq!(view.phase, SessionPhase::Failed);
        assert_eq!(view.params, before.params);
        assert_eq!(view.result, before.result);
        assert_eq!(view.progress, None);
        assert!(!view.can_undo);
    }

    #[tokio::test]
    async fn absent_result_maps_to_invalid_parameters() {
        let manager = manager_with(vec![MockOutcome::Absent]);
        let err = manager.submit(structure_params()).await.unwrap_err();

        assert_eq!(err, SessionError::InvalidParameters);
        let view = manager.view();
        assert_eq!(view.phase, SessionPhase::Failed);
        assert!(view.result.is_none());
        assert!(!view.can_undo);
    }

    #[tokio::test]
    async fn invalid_areas_are_rejected_before_the_gateway() {
        let mock = MockEstimator::new().with_outcome(MockOutcome::Success(shell_budget()));
        let calls = mock.call_log();
        let manager = SessionManager::new(Arc::new(mock));

        let params = ProjectParams {
            proposed_building_sqft: -10.0,
            ..Default::default()
        };
        let err = manager.submit(params).await.unwrap_err();

        assert_eq!(err, SessionError::InvalidParameters);
        assert_eq!(manager.view().phase, SessionPhase::Idle);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_pushes_history_and_flips_exactly_one_item() {
        let manager = manager_with(vec![MockOutcome::Success(shell_budget())]);
        manager.submit(structure_params()).await.unwrap();

        assert!(manager.toggle_line_item("shell", "roof"));
        assert_eq!(manager.displayed_total(), Some(50_000.0));

        let view = manager.view();
        let roof = view
            .result
            .as_ref()
            .and_then(|r| r.find_item("shell", "roof"))
            .unwrap();
        assert!(!roof.included);
        let framing = view
            .result
            .as_ref()
            .and_then(|r| r.find_item("shell", "framing"))
            .unwrap();
        assert!(framing.included);
    }

    #[tokio::test]
    async fn toggle_with_unknown_ids_is_a_noop() {
        let manager = manager_with(vec![MockOutcome::Success(shell_budget())]);
        manager.submit(structure_params()).await.unwrap();
        let before = manager.view();

        assert!(!manager.toggle_line_item("shell", "pool"));
        assert!(!manager.toggle_line_item("landscaping", "roof"));

        let after = manager.view();
        assert_eq!(after.result, before.result);
        assert_eq!(after.can_undo, before.can_undo);
    }

    #[tokio::test]
    async fn toggle_before_ready_is_a_noop() {
        let manager = manager_with(vec![]);
        assert!(!manager.toggle_line_item("shell", "roof"));
    }

    #[tokio::test]
    async fn undo_restores_pre_toggle_snapshot() {
        let manager = manager_with(vec![MockOutcome::Success(shell_budget())]);
        manager.submit(structure_params()).await.unwrap();

        manager.toggle_line_item("shell", "roof");
        assert_eq!(manager.displayed_total(), Some(50_000.0));

        assert!(manager.undo());
        assert_eq!(manager.displayed_total(), Some(80_000.0));
        let view = manager.view();
        let roof = view
            .result
            .as_ref()
            .and_then(|r| r.find_item("shell", "roof"))
            .unwrap();
        assert!(roof.included);
    }

    #[tokio::test]
    async fn undo_past_first_submit_returns_to_idle() {
        let manager = manager_with(vec![MockOutcome::Success(shell_budget())]);
        manager.submit(structure_params()).await.unwrap();

        assert!(manager.undo());
        let view = manager.view();
        assert_eq!(view.phase, SessionPhase::Idle);
        assert!(view.result.is_none());
        assert!(!view.can_undo);
    }

    #[tokio::test]
    async fn undo_on_empty_history_is_a_noop() {
        let manager = manager_with(vec![]);
        let before = manager.view();
        assert!(!manager.undo());
        assert_eq!(manager.view(), before);
    }

    #[tokio::test]
    async fn observers_receive_published_views() {
        let manager = manager_with(vec![MockOutcome::Success(shell_budget())]);
        let mut rx = manager.subscribe();

        manager.submit(structure_params()).await.unwrap();
        rx.changed().await.unwrap();
        let view = rx.borrow().clone();
        assert_eq!(view.phase, SessionPhase::Ready);
        assert_eq!(view.progress, Some(100.0));
    }
}
