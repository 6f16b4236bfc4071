use crate::planner::error::{PlanError, Result};
use crate::planner::plan::SubstitutionEvent;
use crate::planner::state::Squad;
use serde::{Deserialize, Serialize};

const TIME_EPS: f64 = 1e-9;

/// One continuous on-field stretch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayStretch {
    pub start_minutes: f64,
    pub end_minutes: f64,
}

/// Per-player outcome of a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProjection {
    pub player_id: String,
    pub player_name: String,
    pub projected_minutes: f64,
    pub target_minutes: f64,
    pub deviation: f64,
    pub target_bench_count: usize,
    pub actual_bench_count: usize,
    pub off_field_minutes: f64,
    pub stretches: Vec<PlayStretch>,
}

/// Raw totals of an event replay, indexed in roster input order
pub(crate) struct ReplayTotals {
    pub on_minutes: Vec<f64>,
    pub off_minutes: Vec<f64>,
    pub bench_events: Vec<usize>,
    pub stretches: Vec<Vec<PlayStretch>>,
    pub final_on_field: Vec<bool>,
}

/// Replay an event list against the starting on-field set.
///
/// Walks the events in time order, accruing elapsed time to whoever is on
/// the pitch, then applies the swap. Every event must name a fielded player
/// coming off and a benched player coming on; a violation means the caller
/// produced a broken schedule and surfaces as `ScheduleInconsistent`.
pub(crate) fn replay_events(
    squad: &Squad,
    starting_on_field: &[bool],
    events: &[SubstitutionEvent],
    total_minutes: f64,
) -> Result<ReplayTotals> {
    let n = squad.len();
    let mut on_field = starting_on_field.to_vec();
    let mut on_minutes = vec![0.0; n];
    let mut off_minutes = vec![0.0; n];
    let mut bench_events = vec![0usize; n];
    let mut stretches: Vec<Vec<PlayStretch>> = vec![Vec::new(); n];
    let mut open_since: Vec<Option<f64>> = on_field
        .iter()
        .map(|&fielded| if fielded { Some(0.0) } else { None })
        .collect();
    let mut last_time = 0.0;

    for event in events {
        if event.time_minutes < last_time - TIME_EPS {
            return Err(PlanError::ScheduleInconsistent(format!(
                "event at {:.2} is out of order",
                event.time_minutes
            )));
        }
        if event.time_minutes <= 0.0 || event.time_minutes > total_minutes + TIME_EPS {
            return Err(PlanError::ScheduleInconsistent(format!(
                "event time {:.2} is outside the match",
                event.time_minutes
            )));
        }

        let off = squad.index_of(&event.field_player_id).ok_or_else(|| {
            PlanError::ScheduleInconsistent(format!(
                "unknown field player '{}'",
                event.field_player_id
            ))
        })?;
        let on = squad.index_of(&event.bench_player_id).ok_or_else(|| {
            PlanError::ScheduleInconsistent(format!(
                "unknown bench player '{}'",
                event.bench_player_id
            ))
        })?;

        accrue_segment(
            &on_field,
            event.time_minutes - last_time,
            &mut on_minutes,
            &mut off_minutes,
        );

        if !on_field[off] {
            return Err(PlanError::ScheduleInconsistent(format!(
                "'{}' comes off at {:.2} but is not on the pitch",
                event.field_player_id, event.time_minutes
            )));
        }
        if on_field[on] {
            return Err(PlanError::ScheduleInconsistent(format!(
                "'{}' comes on at {:.2} but is already on the pitch",
                event.bench_player_id, event.time_minutes
            )));
        }

        let started = open_since[off].take().ok_or_else(|| {
            PlanError::ScheduleInconsistent(format!(
                "no open stretch for '{}'",
                event.field_player_id
            ))
        })?;
        stretches[off].push(PlayStretch {
            start_minutes: started,
            end_minutes: event.time_minutes,
        });
        open_since[on] = Some(event.time_minutes);

        on_field[off] = false;
        on_field[on] = true;
        bench_events[off] += 1;
        last_time = event.time_minutes;
    }

    accrue_segment(
        &on_field,
        total_minutes - last_time,
        &mut on_minutes,
        &mut off_minutes,
    );
    for (index, open) in open_since.iter_mut().enumerate() {
        if let Some(started) = open.take() {
            stretches[index].push(PlayStretch {
                start_minutes: started,
                end_minutes: total_minutes,
            });
        }
    }

    Ok(ReplayTotals {
        on_minutes,
        off_minutes,
        bench_events,
        stretches,
        final_on_field: on_field,
    })
}

fn accrue_segment(
    on_field: &[bool],
    delta: f64,
    on_minutes: &mut [f64],
    off_minutes: &mut [f64],
) {
    if delta <= 0.0 {
        return;
    }
    for (index, fielded) in on_field.iter().enumerate() {
        if *fielded {
            on_minutes[index] += delta;
        } else {
            off_minutes[index] += delta;
        }
    }
}
