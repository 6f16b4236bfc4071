use crate::planner::config::PlanConfig;
use crate::planner::error::Result;
use crate::planner::plan::{SolverStrategy, SubstitutionEvent, SubstitutionPlan};
use crate::planner::projection::{replay_events, PlayerProjection};
use crate::planner::quota::RotationFrame;
use crate::planner::round::choose_swaps;
use crate::planner::state::{RotationState, Squad};
use crate::team::{Player, PositionRequirement};
use log::debug;

const TIME_EPS: f64 = 1e-9;

/// Build the substitution schedule for one match.
///
/// Walks every substitution round, accruing elapsed minutes and applying the
/// round solver's swap set, then attempts one late balancing swap and derives
/// the final projections by replaying the event list from kickoff. Inputs are
/// assumed validated by the facade.
pub(crate) fn build_schedule(players: &[Player], config: &PlanConfig) -> Result<SubstitutionPlan> {
    let squad = Squad::new(players)?;
    let frame = RotationFrame::compute(players, config);
    let requirement = PositionRequirement::from_roles(
        players.iter().filter(|p| p.is_on_field).map(|p| p.role),
    );
    let mut state = RotationState::new(&squad);
    let starting_on_field = state.on_field.clone();

    let mut events: Vec<SubstitutionEvent> = Vec::new();
    let mut round_snapshots: Vec<Vec<String>> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut solver = SolverStrategy::Optimal;

    let rotation_possible = frame.bench_size > 0 && frame.rounds > 0;
    let is_feasible = !rotation_possible || any_legal_swap_exists(&squad, &state);
    debug!(
        "{} round(s), {:.2}m per interval, {} bench seat(s) across {} interval(s)",
        frame.rounds, frame.interval_minutes, frame.bench_slots_total, frame.intervals
    );

    if rotation_possible && is_feasible {
        let mut last_time = 0.0;
        for round in 1..=frame.rounds {
            let now = frame.round_time(round, config);
            state.accrue(now - last_time);

            let decision = choose_swaps(&squad, &state, &requirement, &frame, config, now);
            if decision.used_fallback {
                solver = SolverStrategy::GreedyFallback;
            }

            let mut benched = vec![false; squad.len()];
            for swap in &decision.swaps {
                events.push(SubstitutionEvent {
                    time_minutes: now,
                    field_player_id: squad.id(swap.off).to_string(),
                    bench_player_id: squad.id(swap.on).to_string(),
                });
                state.apply_swap(swap.off, swap.on, now);
                benched[swap.off] = true;
            }
            // A cooldown only ever spans the one following round
            for (index, was_benched) in benched.iter().enumerate() {
                if !was_benched {
                    state.cooldown[index] = false;
                }
            }

            debug!(
                "round {} at {:.1}m: {} swap(s)",
                round,
                now,
                decision.swaps.len()
            );
            round_snapshots.push(state.fielded_ids(&squad));
            last_time = now;
        }
        state.accrue(config.total_match_minutes - last_time);

        if apply_balancing_swap(&squad, &state, &frame, config, &mut events) {
            debug!("late balancing swap applied");
        }

        let halfway = config.total_match_minutes / 2.0;
        if !events.iter().any(|event| event.time_minutes > halfway) {
            warnings.push("no substitutions scheduled in the second half".to_string());
        }
    } else {
        state.accrue(config.total_match_minutes);
        if !is_feasible {
            warnings.push(
                "no bench player can cover any substitutable slot; keeping the starting lineup"
                    .to_string(),
            );
        }
    }

    // The replay both computes the projections and re-checks every event
    // against the pitch/bench invariants.
    let totals = replay_events(&squad, &starting_on_field, &events, config.total_match_minutes)?;
    debug!(
        "{} substitution(s); {} player(s) end on the pitch",
        events.len(),
        totals.final_on_field.iter().filter(|&&fielded| fielded).count()
    );

    let projections: Vec<PlayerProjection> = (0..squad.len())
        .map(|index| {
            let player = squad.player(index);
            PlayerProjection {
                player_id: player.id.clone(),
                player_name: player.name.clone(),
                projected_minutes: totals.on_minutes[index],
                target_minutes: frame.target_minutes,
                deviation: totals.on_minutes[index] - frame.target_minutes,
                target_bench_count: frame.quotas[index],
                actual_bench_count: totals.bench_events[index],
                off_field_minutes: totals.off_minutes[index],
                stretches: totals.stretches[index].clone(),
            }
        })
        .collect();

    Ok(SubstitutionPlan {
        events,
        projections,
        round_snapshots,
        target_minutes_per_player: frame.target_minutes,
        is_feasible,
        solver,
        warnings,
    })
}

/// Whether any single substitution is positionally possible at kickoff
fn any_legal_swap_exists(squad: &Squad, state: &RotationState) -> bool {
    (0..squad.len()).any(|field| {
        state.on_field[field]
            && !squad.player(field).is_locked
            && (0..squad.len()).any(|bench| {
                !state.on_field[bench]
                    && squad.player(bench).can_fill(state.slot_role[field])
            })
    })
}

/// Try the single late balancing swap.
///
/// When one player ended more than half an interval over target and another
/// more than half an interval under, trade the final interval between them.
/// The swap is inserted at `G - interval` and must leave the event list
/// replayable: quota headroom, positional fit, cooldown and rest spacing,
/// and no later event naming either player.
fn apply_balancing_swap(
    squad: &Squad,
    state: &RotationState,
    frame: &RotationFrame,
    config: &PlanConfig,
    events: &mut Vec<SubstitutionEvent>,
) -> bool {
    let tolerance = frame.interval_minutes / 2.0;
    let swap_time = config.total_match_minutes - frame.interval_minutes;
    if swap_time <= TIME_EPS {
        return false;
    }

    let named_at_or_after = |index: usize| {
        let id = squad.id(index);
        events.iter().any(|event| {
            event.time_minutes >= swap_time - TIME_EPS
                && (event.field_player_id == id || event.bench_player_id == id)
        })
    };

    let mut over_candidates: Vec<usize> = (0..squad.len())
        .filter(|&index| {
            state.on_field[index]
                && !squad.player(index).is_locked
                && state.bench_count[index] < frame.quotas[index]
                && state.minutes_played[index] - frame.target_minutes > tolerance
                && swap_time - state.last_on_time[index] >= config.min_on_minutes - TIME_EPS
                && !named_at_or_after(index)
        })
        .collect();
    over_candidates.sort_by(|&a, &b| {
        state.minutes_played[b]
            .total_cmp(&state.minutes_played[a])
            .then_with(|| squad.id(a).cmp(squad.id(b)))
    });

    let mut under_candidates: Vec<usize> = (0..squad.len())
        .filter(|&index| {
            !state.on_field[index]
                && frame.target_minutes - state.minutes_played[index] > tolerance
                && swap_time - state.last_bench_time[index] >= config.min_rest_minutes - TIME_EPS
                && !named_at_or_after(index)
        })
        .collect();
    under_candidates.sort_by(|&a, &b| {
        state.minutes_played[a]
            .total_cmp(&state.minutes_played[b])
            .then_with(|| squad.id(a).cmp(squad.id(b)))
    });

    let (over, under) = match (over_candidates.first(), under_candidates.first()) {
        (Some(&over), Some(&under)) => (over, under),
        _ => return false,
    };
    if !squad.player(under).can_fill(state.slot_role[over]) {
        return false;
    }

    let position = events
        .iter()
        .position(|event| event.time_minutes > swap_time + TIME_EPS)
        .unwrap_or(events.len());
    events.insert(
        position,
        SubstitutionEvent {
            time_minutes: swap_time,
            field_player_id: squad.id(over).to_string(),
            bench_player_id: squad.id(under).to_string(),
        },
    );
    true
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
    fn test_no_bench_yields_empty_plan() {
        let players = vec![
            make_player("a", Role::Goalkeeper, true),
            make_player("b", Role::Defender, true),
        ];
        let config = PlanConfig::with_game_minutes(50.0);
        let plan = build_schedule(&players, &config).unwrap();

        assert!(plan.events.is_empty());
        assert!(plan.is_feasible);
        assert!(plan.round_snapshots.is_empty());
        for projection in &plan.projections {
            assert!((projection.projected_minutes - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_window_longer_than_match_yields_empty_plan() {
        let players = vec![
            make_player("a", Role::Defender, true),
            make_player("b", Role::Defender, false),
        ];
        let config = PlanConfig {
            total_match_minutes: 30.0,
            window_length_minutes: 45.0,
            ..PlanConfig::default()
        };
        let plan = build_schedule(&players, &config).unwrap();
        assert!(plan.events.is_empty());
        assert!((plan.projections[0].projected_minutes - 30.0).abs() < 1e-9);
        assert!((plan.projections[1].projected_minutes - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_incompatible_bench_marks_plan_infeasible() {
        let players = vec![
            make_player("gk1", Role::Goalkeeper, true),
            make_player("st1", Role::Forward, false),
        ];
        let config = PlanConfig::with_game_minutes(40.0);
        let plan = build_schedule(&players, &config).unwrap();

        assert!(!plan.is_feasible);
        assert!(plan.events.is_empty());
        assert!(!plan.warnings.is_empty());
        assert!((plan.projections[0].projected_minutes - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_locked_starters_make_rotation_infeasible() {
        let mut locked = make_player("a", Role::Defender, true);
        locked.is_locked = true;
        let players = vec![locked, make_player("b", Role::Defender, false)];
        let config = PlanConfig::with_game_minutes(40.0);
        let plan = build_schedule(&players, &config).unwrap();
        assert!(!plan.is_feasible);
        assert!(plan.events.is_empty());
    }

    #[test]
    fn test_two_player_rotation_shares_minutes() {
        let players = vec![
            make_player("a", Role::Midfielder, true),
            make_player("b", Role::Midfielder, false),
        ];
        let config = PlanConfig {
            total_match_minutes: 40.0,
            max_subs_per_window: 1,
            window_length_minutes: 10.0,
            ..PlanConfig::default()
        };
        let plan = build_schedule(&players, &config).unwrap();

        assert!(plan.is_feasible);
        assert!(!plan.events.is_empty());
        let total: f64 = plan
            .projections
            .iter()
            .map(|p| p.projected_minutes)
            .sum();
        assert!((total - 40.0).abs() < 1e-6);
        for projection in &plan.projections {
            assert!((projection.target_minutes - 20.0).abs() < 1e-9);
            assert!(projection.actual_bench_count <= projection.target_bench_count);
        }
    }

    #[test]
    fn test_snapshots_follow_rounds() {
        let players = vec![
            make_player("a", Role::Midfielder, true),
            make_player("b", Role::Midfielder, false),
        ];
        let config = PlanConfig {
            total_match_minutes: 30.0,
            max_subs_per_window: 1,
            window_length_minutes: 10.0,
            ..PlanConfig::default()
        };
        let plan = build_schedule(&players, &config).unwrap();
        assert_eq!(plan.round_snapshots.len(), 3);
        for snapshot in &plan.round_snapshots {
            assert_eq!(snapshot.len(), 1);
        }
    }

    #[test]
    fn test_balancing_swap_trades_final_interval() {
        let players = vec![
            make_player("a", Role::Defender, true),
            make_player("b", Role::Forward, true),
            make_player("c", Role::Defender, false),
        ];
        let config = PlanConfig {
            total_match_minutes: 40.0,
            max_subs_per_window: 1,
            window_length_minutes: 10.0,
            ..PlanConfig::default()
        };
        let squad = Squad::new(&players).unwrap();
        let frame = RotationFrame::compute(&players, &config);
        let mut state = RotationState::new(&squad);
        // Pretend the rounds never found a swap: starters played the full match
        state.accrue(40.0);

        let mut events = Vec::new();
        assert!(apply_balancing_swap(&squad, &state, &frame, &config, &mut events));
        assert_eq!(events.len(), 1);
        // interval = 40 / 5 = 8: the swap lands at 32 and trades 8 minutes
        assert!((events[0].time_minutes - 32.0).abs() < 1e-9);
        assert_eq!(events[0].field_player_id, "a");
        assert_eq!(events[0].bench_player_id, "c");
    }

    #[test]
    fn test_balancing_swap_respects_positions() {
        let players = vec![
            make_player("gk1", Role::Goalkeeper, true),
            make_player("st1", Role::Forward, false),
        ];
        let config = PlanConfig {
            total_match_minutes: 40.0,
            window_length_minutes: 10.0,
            ..PlanConfig::default()
        };
        let squad = Squad::new(&players).unwrap();
        let frame = RotationFrame::compute(&players, &config);
        let mut state = RotationState::new(&squad);
        state.accrue(40.0);

        let mut events = Vec::new();
        assert!(!apply_balancing_swap(&squad, &state, &frame, &config, &mut events));
        assert!(events.is_empty());
    }
}
