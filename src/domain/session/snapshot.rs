//! SessionSnapshot - the unit of undo history.

use serde::{Deserialize, Serialize};

use crate::domain::budget::BudgetResult;
use crate::domain::project::ProjectParams;

/// One (params, result-or-absent) pair representing session state at a
/// point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub params: ProjectParams,
    pub result: Option<BudgetResult>,
}

impl SessionSnapshot {
    /// Creates a snapshot with no result (session start).
    pub fn initial(params: ProjectParams) -> Self {
        Self {
            params,
            result: None,
        }
    }

    /// Creates a snapshot pairing params with a fresh result.
    pub fn with_result(params: ProjectParams, result: BudgetResult) -> Self {
        Self {
            params,
            result: Some(result),
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::initial(ProjectParams::default())
    }
}
