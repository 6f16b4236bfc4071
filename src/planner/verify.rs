use crate::planner::plan::SubstitutionPlan;

/// Tolerance for timestamp and target comparisons between two computations
const VERIFY_TOLERANCE: f64 = 1e-4;

/// Check that two independently computed plans describe the same schedule.
///
/// Compares the per-player target, the event count and every event in order
/// (timestamp within tolerance, both player ids exact). Pure check; neither
/// plan is touched.
pub(crate) fn plans_match(left: &SubstitutionPlan, right: &SubstitutionPlan) -> bool {
    if (left.target_minutes_per_player - right.target_minutes_per_player).abs()
        > VERIFY_TOLERANCE
    {
        return false;
    }
    if left.events.len() != right.events.len() {
        return false;
    }
    left.events.iter().zip(right.events.iter()).all(|(a, b)| {
        (a.time_minutes - b.time_minutes).abs() <= VERIFY_TOLERANCE
            && a.field_player_id == b.field_player_id
            && a.bench_player_id == b.bench_player_id
    })
}
