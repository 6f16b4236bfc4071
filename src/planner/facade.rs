use crate::planner::config::PlanConfig;
use crate::planner::engine::build_schedule;
use crate::planner::error::{PlanError, Result};
use crate::planner::plan::SubstitutionPlan;
use crate::planner::recommend::{analyze_combinations, MultiCombinationResult};
use crate::planner::verify::plans_match;
use crate::team::Player;
use std::collections::HashSet;

/// Compute a full substitution schedule for one match
pub fn plan_one(players: &[Player], config: &PlanConfig) -> Result<SubstitutionPlan> {
    config.validate()?;
    validate_roster(players)?;
    build_schedule(players, config)
}

/// Try every substitutions-per-window value the bench supports and
/// recommend the one with the most even projected minutes
pub fn recommend(players: &[Player], game_minutes: f64) -> Result<MultiCombinationResult> {
    if !game_minutes.is_finite() || game_minutes <= 0.0 {
        return Err(PlanError::InvalidConfig(
            "game minutes must be positive".to_string(),
        ));
    }
    validate_roster(players)?;
    analyze_combinations(players, game_minutes)
}

/// Check a previewed plan against a regenerated one
pub fn verify(left: &SubstitutionPlan, right: &SubstitutionPlan) -> bool {
    plans_match(left, right)
}

fn validate_roster(players: &[Player]) -> Result<()> {
    if players.is_empty() {
        return Err(PlanError::InvalidConfig("roster is empty".to_string()));
    }
    if !players.iter().any(|p| p.is_on_field) {
        return Err(PlanError::InvalidRoster(
            "no players start on the field".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(players.len());
    for player in players {
        if !seen.insert(player.id.as_str()) {
            return Err(PlanError::InvalidRoster(format!(
                "duplicate player id '{}'",
                player.id
            )));
        }
        if player.allowed_positions.is_empty() {
            return Err(PlanError::InvalidRoster(format!(
                "player '{}' has no allowed positions",
                player.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Role;

    fn make_player(id: &str, role: Role, on_field: bool) -> Player {
        let mut player = Player::new(id.to_string(), id.to_uppercase(), role);
        player.is_on_field = on_field;
        player
    }

    #[test]
    fn test_empty_roster_is_invalid_config() {
        let result = plan_one(&[], &PlanConfig::default());
        assert!(matches!(result, Err(PlanError::InvalidConfig(_))));
    }

    #[test]
    fn test_all_bench_roster_is_invalid() {
        let players = vec![make_player("a", Role::Defender, false)];
        assert!(matches!(
            plan_one(&players, &PlanConfig::default()),
            Err(PlanError::InvalidRoster(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_are_invalid() {
        let players = vec![
            make_player("a", Role::Defender, true),
            make_player("a", Role::Forward, false),
        ];
        assert!(matches!(
            plan_one(&players, &PlanConfig::default()),
            Err(PlanError::InvalidRoster(_))
        ));
    }

    #[test]
    fn test_empty_allowed_positions_are_invalid() {
        let mut stray = make_player("b", Role::Forward, false);
        stray.allowed_positions.clear();
        let players = vec![make_player("a", Role::Defender, true), stray];
        assert!(matches!(
            plan_one(&players, &PlanConfig::default()),
            Err(PlanError::InvalidRoster(_))
        ));
    }

    #[test]
    fn test_bad_config_is_rejected_before_scheduling() {
        let players = vec![make_player("a", Role::Defender, true)];
        let mut config = PlanConfig::default();
        config.window_length_minutes = 0.0;
        assert!(matches!(
            plan_one(&players, &config),
            Err(PlanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_recommend_rejects_non_positive_minutes() {
        let players = vec![make_player("a", Role::Defender, true)];
        assert!(recommend(&players, 0.0).is_err());
        assert!(recommend(&players, f64::NAN).is_err());
    }

    #[test]
    fn test_happy_path_returns_plan_and_recommendation() {
        let players = vec![
            make_player("a", Role::Midfielder, true),
            make_player("b", Role::Midfielder, false),
        ];
        let plan = plan_one(&players, &PlanConfig::with_game_minutes(40.0)).unwrap();
        assert!(plan.is_feasible);
        assert!(verify(&plan, &plan));

        let result = recommend(&players, 40.0).unwrap();
        assert_eq!(result.combinations.len(), 1);
        assert_eq!(result.recommended_k, 1);
    }
}
