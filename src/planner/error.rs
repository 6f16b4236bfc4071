//! Planner error types
//!
//! All failures surface once, at the facade boundary. An infeasible roster is
//! not an error: the planner returns a plan with `is_feasible = false` and an
//! empty event list instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    /// Internal replay invariant violated; a programming error, not bad input
    #[error("schedule inconsistent: {0}")]
    ScheduleInconsistent(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
