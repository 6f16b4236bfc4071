use crate::planner::config::PlanConfig;
use crate::planner::quota::RotationFrame;
use crate::planner::state::{RotationState, Squad};
use crate::team::{is_legal_lineup, PositionRequirement};
use log::debug;

const TIME_EPS: f64 = 1e-9;
const SCORE_EPS: f64 = 1e-9;

/// Upper bound on (off-subset, on-subset) evaluations per round; beyond it
/// the round falls back to the greedy strategy
pub(crate) const MAX_ROUND_EVALUATIONS: usize = 100_000;

/// One chosen substitution, as squad indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Swap {
    pub off: usize,
    pub on: usize,
}

pub(crate) struct RoundDecision {
    pub swaps: Vec<Swap>,
    pub used_fallback: bool,
}

/// Choose the swap set for one round.
///
/// Enumerates, for every `k` up to the per-window cap, each `k`-subset of
/// off-candidates paired with the best positionally compatible `k`-subset of
/// on-candidates, and scores the post-swap world by the summed absolute
/// deviation from target minutes assuming no further swaps. Ties go to the
/// larger swap set, then to the lexicographically smallest set of off-ids,
/// so re-running on the same input yields the same schedule.
pub(crate) fn choose_swaps(
    squad: &Squad,
    state: &RotationState,
    requirement: &PositionRequirement,
    frame: &RotationFrame,
    config: &PlanConfig,
    now: f64,
) -> RoundDecision {
    let off_pool = off_candidates(squad, state, frame, config, now);
    let on_pool = on_candidates(squad, state, config, now);
    let max_subs = config
        .max_subs_per_window
        .min(off_pool.len())
        .min(on_pool.len());

    let mut best_score = deviation_score(squad, state, frame, config, now, &[], &[]);
    let mut best_k = 0usize;
    let mut best_off_ids: Vec<String> = Vec::new();
    let mut best_swaps: Vec<Swap> = Vec::new();
    let mut evaluations = 0usize;

    for k in 1..=max_subs {
        let mut off_cursor = CombinationCursor::new(off_pool.len(), k);
        while let Some(off_positions) = off_cursor.advance() {
            let off_subset: Vec<usize> = off_positions.iter().map(|&p| off_pool[p]).collect();

            // On-subsets are tried in quality order (most underplayed, then
            // longest rested); the first one that pairs up is this
            // off-subset's candidate.
            let mut on_cursor = CombinationCursor::new(on_pool.len(), k);
            while let Some(on_positions) = on_cursor.advance() {
                evaluations += 1;
                if evaluations > MAX_ROUND_EVALUATIONS {
                    debug!(
                        "round at {:.1}m exceeded {} evaluations, using greedy swaps",
                        now, MAX_ROUND_EVALUATIONS
                    );
                    return RoundDecision {
                        swaps: greedy_swaps(squad, state, requirement, frame, config, now),
                        used_fallback: true,
                    };
                }

                let on_subset: Vec<usize> = on_positions.iter().map(|&p| on_pool[p]).collect();
                let swaps = match pair_up(squad, state, &off_subset, &on_subset) {
                    Some(swaps) => swaps,
                    None => continue,
                };
                debug_assert!(post_swap_is_legal(state, requirement, &swaps));

                let score = deviation_score(squad, state, frame, config, now, &off_subset, &on_subset);
                let off_ids: Vec<String> = off_subset
                    .iter()
                    .map(|&index| squad.id(index).to_string())
                    .collect();
                let improves = score + SCORE_EPS < best_score;
                let tied = (score - best_score).abs() <= SCORE_EPS;
                if improves || (tied && (k > best_k || (k == best_k && off_ids < best_off_ids))) {
                    best_score = score;
                    best_k = k;
                    best_off_ids = off_ids;
                    best_swaps = swaps;
                }
                break;
            }
        }
    }

    RoundDecision {
        swaps: best_swaps,
        used_fallback: false,
    }
}

/// Greedy swap selection: bench the most overplayed, field the most
/// underplayed compatible cover. Baseline strategy and enumeration-cap
/// fallback.
pub(crate) fn greedy_swaps(
    squad: &Squad,
    state: &RotationState,
    requirement: &PositionRequirement,
    frame: &RotationFrame,
    config: &PlanConfig,
    now: f64,
) -> Vec<Swap> {
    let target_so_far = frame.target_at(now);
    let mut off_pool = off_candidates(squad, state, frame, config, now);
    off_pool.sort_by(|&a, &b| {
        state
            .fairness_error(b, target_so_far)
            .total_cmp(&state.fairness_error(a, target_so_far))
            .then(state.last_bench_time[a].total_cmp(&state.last_bench_time[b]))
            .then_with(|| squad.id(a).cmp(squad.id(b)))
    });
    let on_pool = on_candidates(squad, state, config, now);
    let max_subs = config
        .max_subs_per_window
        .min(off_pool.len())
        .min(on_pool.len());

    let mut used_on = vec![false; on_pool.len()];
    let mut swaps: Vec<Swap> = Vec::new();
    for &off in &off_pool {
        if swaps.len() == max_subs {
            break;
        }
        let slot = state.slot_role[off];
        for (position, &on) in on_pool.iter().enumerate() {
            if used_on[position] || !squad.player(on).can_fill(slot) {
                continue;
            }
            let mut candidate = swaps.clone();
            candidate.push(Swap { off, on });
            if post_swap_is_legal(state, requirement, &candidate) {
                swaps = candidate;
                used_on[position] = true;
                break;
            }
        }
    }
    swaps
}

/// Fielded players who may come off this round, sorted by id
fn off_candidates(
    squad: &Squad,
    state: &RotationState,
    frame: &RotationFrame,
    config: &PlanConfig,
    now: f64,
) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..squad.len())
        .filter(|&index| {
            state.on_field[index]
                && !squad.player(index).is_locked
                && state.bench_count[index] < frame.quotas[index]
                && !state.cooldown[index]
                && now - state.last_on_time[index] >= config.min_on_minutes - TIME_EPS
        })
        .collect();
    candidates.sort_by(|&a, &b| squad.id(a).cmp(squad.id(b)));
    candidates
}

/// Benched players who may come on this round, most underplayed first
fn on_candidates(
    squad: &Squad,
    state: &RotationState,
    config: &PlanConfig,
    now: f64,
) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..squad.len())
        .filter(|&index| {
            !state.on_field[index]
                && now - state.last_bench_time[index] >= config.min_rest_minutes - TIME_EPS
        })
        .collect();
    candidates.sort_by(|&a, &b| {
        state.minutes_played[a]
            .total_cmp(&state.minutes_played[b])
            .then(state.last_bench_time[a].total_cmp(&state.last_bench_time[b]))
            .then_with(|| squad.id(a).cmp(squad.id(b)))
    });
    candidates
}

/// Summed |projected - target| over the whole roster, assuming the given
/// swap happens now and nothing changes afterwards
fn deviation_score(
    squad: &Squad,
    state: &RotationState,
    frame: &RotationFrame,
    config: &PlanConfig,
    now: f64,
    off_subset: &[usize],
    on_subset: &[usize],
) -> f64 {
    let remaining = config.total_match_minutes - now;
    let mut score = 0.0;
    for index in 0..squad.len() {
        let fielded_after = if off_subset.contains(&index) {
            false
        } else if on_subset.contains(&index) {
            true
        } else {
            state.on_field[index]
        };
        let projected =
            state.minutes_played[index] + if fielded_after { remaining } else { 0.0 };
        score += (projected - frame.target_minutes).abs();
    }
    score
}

/// Assign each on-candidate to a vacated slot they may fill.
///
/// Backtracks over on-candidates in their given order, so the returned
/// pairing is deterministic for a fixed input order.
fn pair_up(
    squad: &Squad,
    state: &RotationState,
    off_subset: &[usize],
    on_subset: &[usize],
) -> Option<Vec<Swap>> {
    let mut used = vec![false; on_subset.len()];
    let mut picks: Vec<usize> = Vec::with_capacity(off_subset.len());
    if assign_slot(squad, state, off_subset, on_subset, 0, &mut used, &mut picks) {
        Some(
            off_subset
                .iter()
                .zip(picks)
                .map(|(&off, on)| Swap { off, on })
                .collect(),
        )
    } else {
        None
    }
}

fn assign_slot(
    squad: &Squad,
    state: &RotationState,
    off_subset: &[usize],
    on_subset: &[usize],
    slot: usize,
    used: &mut [bool],
    picks: &mut Vec<usize>,
) -> bool {
    if slot == off_subset.len() {
        return true;
    }
    let slot_role = state.slot_role[off_subset[slot]];
    for (position, &on_index) in on_subset.iter().enumerate() {
        if used[position] || !squad.player(on_index).can_fill(slot_role) {
            continue;
        }
        used[position] = true;
        picks.push(on_index);
        if assign_slot(squad, state, off_subset, on_subset, slot + 1, used, picks) {
            return true;
        }
        picks.pop();
        used[position] = false;
    }
    false
}

/// Role counts on the pitch after the swap set must match the requirement
fn post_swap_is_legal(
    state: &RotationState,
    requirement: &PositionRequirement,
    swaps: &[Swap],
) -> bool {
    let mut roles = Vec::with_capacity(requirement.total());
    for index in 0..state.on_field.len() {
        if state.on_field[index] && !swaps.iter().any(|swap| swap.off == index) {
            roles.push(state.slot_role[index]);
        }
    }
    for swap in swaps {
        // The incoming player inherits the vacated slot
        roles.push(state.slot_role[swap.off]);
    }
    is_legal_lineup(roles, requirement)
}

/// Lexicographic k-subset cursor over positions `0..n`
struct CombinationCursor {
    positions: Vec<usize>,
    n: usize,
    exhausted: bool,
    fresh: bool,
}

impl CombinationCursor {
    fn new(n: usize, k: usize) -> Self {
        Self {
            positions: (0..k).collect(),
            n,
            exhausted: k > n,
            fresh: true,
        }
    }

    fn advance(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }
        if self.fresh {
            self.fresh = false;
            return Some(&self.positions);
        }
        let k = self.positions.len();
        let mut index = k;
        while index > 0 {
            index -= 1;
            if self.positions[index] != index + self.n - k {
                self.positions[index] += 1;
                for next in index + 1..k {
                    self.positions[next] = self.positions[next - 1] + 1;
                }
                return Some(&self.positions);
            }
        }
        self.exhausted = true;
        None
    }
}
