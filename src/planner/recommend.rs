use crate::planner::config::PlanConfig;
use crate::planner::engine::build_schedule;
use crate::planner::error::Result;
use crate::team::Player;
use log::debug;
use serde::{Deserialize, Serialize};

/// Metrics of one tried substitutions-per-window value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationOutcome {
    pub max_subs_per_window: usize,

    /// Population variance of projected minutes across the roster
    pub variance: f64,

    pub min_projected_minutes: f64,
    pub max_projected_minutes: f64,
    pub substitution_count: usize,
    pub is_recommended: bool,
}

/// All per-window trials plus the recommended value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiCombinationResult {
    pub combinations: Vec<CombinationOutcome>,

    /// Zero when the roster has no bench and nothing could be tried
    pub recommended_k: usize,

    pub target_minutes_per_player: f64,
}

/// Run the full scheduler once per window size `k` in `1..=bench` and pick
/// the `k` with the most even projected minutes. Ties keep the smaller `k`.
pub(crate) fn analyze_combinations(
    players: &[Player],
    game_minutes: f64,
) -> Result<MultiCombinationResult> {
    let player_count = players.len();
    let field_count = players.iter().filter(|p| p.is_on_field).count();
    let bench_size = player_count - field_count;
    let target_minutes_per_player = if player_count == 0 {
        0.0
    } else {
        game_minutes * field_count as f64 / player_count as f64
    };

    let mut combinations: Vec<CombinationOutcome> = Vec::with_capacity(bench_size);
    let mut best: Option<usize> = None;

    for k in 1..=bench_size {
        let config = PlanConfig {
            max_subs_per_window: k,
            ..PlanConfig::with_game_minutes(game_minutes)
        };
        let plan = build_schedule(players, &config)?;

        let mean = plan
            .projections
            .iter()
            .map(|p| p.projected_minutes)
            .sum::<f64>()
            / player_count as f64;
        let variance = plan
            .projections
            .iter()
            .map(|p| (p.projected_minutes - mean).powi(2))
            .sum::<f64>()
            / player_count as f64;
        let min_projected = plan
            .projections
            .iter()
            .map(|p| p.projected_minutes)
            .fold(f64::INFINITY, f64::min);
        let max_projected = plan
            .projections
            .iter()
            .map(|p| p.projected_minutes)
            .fold(f64::NEG_INFINITY, f64::max);

        debug!(
            "k={}: variance {:.4}, spread {:.1}..{:.1}, {} event(s)",
            k,
            variance,
            min_projected,
            max_projected,
            plan.events.len()
        );

        combinations.push(CombinationOutcome {
            max_subs_per_window: k,
            variance,
            min_projected_minutes: min_projected,
            max_projected_minutes: max_projected,
            substitution_count: plan.events.len(),
            is_recommended: false,
        });

        // Strict improvement only, so equal-variance ties keep the smaller k
        let beats_best = match best {
            Some(index) => variance + 1e-9 < combinations[index].variance,
            None => true,
        };
        if beats_best {
            best = Some(combinations.len() - 1);
        }
    }

    let recommended_k = match best {
        Some(index) => {
            combinations[index].is_recommended = true;
            combinations[index].max_subs_per_window
        }
        None => 0,
    };

    Ok(MultiCombinationResult {
        combinations,
        recommended_k,
        target_minutes_per_player,
    })
}
