use thiserror::Error;

use crate::domain::types::DayRecord;

/// Failures surfaced by the planner. Solver infeasibility and timeouts are
/// not here: the routing collaborator returns `Option` and both collapse to
/// `None`, recovered by the greedy fallback.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// The external deadline passed mid-horizon. Carries the days that were
    /// fully planned before the cut; never a partial day.
    #[error("planning deadline exceeded after {} completed day(s)", completed.len())]
    DeadlineExceeded { completed: Vec<DayRecord> },

    #[error("internal planning failure: {0}")]
    Internal(String),
}
