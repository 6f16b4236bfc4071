use crate::planner::projection::PlayerProjection;
use serde::{Deserialize, Serialize};

/// One scheduled substitution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionEvent {
    pub time_minutes: f64,

    /// Player coming off
    pub field_player_id: String,

    /// Player coming on
    pub bench_player_id: String,
}

/// Which search strategy produced the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStrategy {
    /// Per-round exhaustive swap-set search
    Optimal,
    /// At least one round exceeded the enumeration cap and used the greedy path
    GreedyFallback,
}

/// Complete substitution schedule for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionPlan {
    /// Events in ascending time order
    pub events: Vec<SubstitutionEvent>,

    /// One projection per roster player, in input order
    pub projections: Vec<PlayerProjection>,

    /// Fielded player ids after each round, in round order
    pub round_snapshots: Vec<Vec<String>>,

    pub target_minutes_per_player: f64,

    /// False when no positionally compatible substitution exists at all;
    /// the plan then describes the no-substitution match
    pub is_feasible: bool,

    pub solver: SolverStrategy,

    /// Informational notes; never block the result
    pub warnings: Vec<String>,
}

impl SubstitutionPlan {
    pub fn substitution_count(&self) -> usize {
        self.events.len()
    }

    /// Get the projection for one player
    pub fn projection_for(&self, player_id: &str) -> Option<&PlayerProjection> {
        self.projections.iter().find(|p| p.player_id == player_id)
    }
}
