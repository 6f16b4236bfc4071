use crate::planner::error::{PlanError, Result};
use serde::{Deserialize, Serialize};

/// Scheduling parameters for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Match length in minutes
    pub total_match_minutes: f64,

    /// Maximum simultaneous substitutions per stoppage
    pub max_subs_per_window: usize,

    /// Minutes between substitution windows
    pub window_length_minutes: f64,

    /// Minimum time a player just brought on must stay on the field
    pub min_on_minutes: f64,

    /// Minimum rest before a just-benched player may return
    pub min_rest_minutes: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            total_match_minutes: 60.0,
            max_subs_per_window: 2,
            window_length_minutes: 10.0,
            min_on_minutes: 0.0,
            min_rest_minutes: 0.0,
        }
    }
}

impl PlanConfig {
    /// Default windows and cooldowns for a match of the given length
    pub fn with_game_minutes(minutes: f64) -> Self {
        Self {
            total_match_minutes: minutes,
            ..Self::default()
        }
    }

    /// Validate config values
    pub fn validate(&self) -> Result<()> {
        if !self.total_match_minutes.is_finite() || self.total_match_minutes <= 0.0 {
            return Err(PlanError::InvalidConfig(
                "total match minutes must be positive".to_string(),
            ));
        }
        if !self.window_length_minutes.is_finite() || self.window_length_minutes <= 0.0 {
            return Err(PlanError::InvalidConfig(
                "window length must be positive".to_string(),
            ));
        }
        if self.max_subs_per_window == 0 {
            return Err(PlanError::InvalidConfig(
                "max substitutions per window must be at least 1".to_string(),
            ));
        }
        if !self.min_on_minutes.is_finite() || self.min_on_minutes < 0.0 {
            return Err(PlanError::InvalidConfig(
                "minimum on-field minutes must not be negative".to_string(),
            ));
        }
        if !self.min_rest_minutes.is_finite() || self.min_rest_minutes < 0.0 {
            return Err(PlanError::InvalidConfig(
                "minimum rest minutes must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
