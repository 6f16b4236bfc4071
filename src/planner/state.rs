use crate::planner::error::{PlanError, Result};
use crate::team::{Player, Role};
use std::collections::HashMap;

/// Flat, index-addressed view of the roster snapshot.
///
/// All scheduling logic works on integer indices in roster input order;
/// string ids only cross the boundary in events and projections.
pub(crate) struct Squad {
    players: Vec<Player>,
    index_by_id: HashMap<String, usize>,
}

impl Squad {
    pub fn new(players: &[Player]) -> Result<Self> {
        let mut index_by_id = HashMap::with_capacity(players.len());
        for (index, player) in players.iter().enumerate() {
            if index_by_id.insert(player.id.clone(), index).is_some() {
                return Err(PlanError::InvalidRoster(format!(
                    "duplicate player id '{}'",
                    player.id
                )));
            }
        }
        Ok(Self {
            players: players.to_vec(),
            index_by_id,
        })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    pub fn id(&self, index: usize) -> &str {
        &self.players[index].id
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }
}

/// Mutable per-player bookkeeping for one scheduling run.
///
/// `slot_role` is the slot a fielded player currently occupies; a player
/// brought on inherits the slot of the player they replaced, so per-role
/// counts on the pitch never drift.
pub(crate) struct RotationState {
    pub on_field: Vec<bool>,
    pub slot_role: Vec<Role>,
    pub minutes_played: Vec<f64>,
    pub bench_count: Vec<usize>,
    pub last_bench_time: Vec<f64>,
    pub last_on_time: Vec<f64>,
    pub cooldown: Vec<bool>,
}

impl RotationState {
    pub fn new(squad: &Squad) -> Self {
        let n = squad.len();
        let on_field: Vec<bool> = (0..n).map(|i| squad.player(i).is_on_field).collect();
        // Starters count as brought on at kickoff
        let last_on_time = on_field
            .iter()
            .map(|&fielded| if fielded { 0.0 } else { f64::NEG_INFINITY })
            .collect();
        Self {
            slot_role: (0..n).map(|i| squad.player(i).role).collect(),
            minutes_played: vec![0.0; n],
            bench_count: vec![0; n],
            last_bench_time: vec![f64::NEG_INFINITY; n],
            last_on_time,
            cooldown: vec![false; n],
            on_field,
        }
    }

    /// Add elapsed time to every fielded player
    pub fn accrue(&mut self, delta_minutes: f64) {
        if delta_minutes <= 0.0 {
            return;
        }
        for (index, fielded) in self.on_field.iter().enumerate() {
            if *fielded {
                self.minutes_played[index] += delta_minutes;
            }
        }
    }

    /// Swap `off` to the bench and `on` into the vacated slot
    pub fn apply_swap(&mut self, off: usize, on: usize, now: f64) {
        self.slot_role[on] = self.slot_role[off];
        self.on_field[off] = false;
        self.on_field[on] = true;
        self.bench_count[off] += 1;
        self.last_bench_time[off] = now;
        self.last_bench_time[on] = now;
        self.last_on_time[on] = now;
        self.cooldown[off] = true;
    }

    /// Overplay (+) or underplay (-) relative to the fair share at `elapsed`
    pub fn fairness_error(&self, index: usize, target_so_far: f64) -> f64 {
        self.minutes_played[index] - target_so_far
    }

    /// Ids of the currently fielded players, in roster input order
    pub fn fielded_ids(&self, squad: &Squad) -> Vec<String> {
        self.on_field
            .iter()
            .enumerate()
            .filter(|(_, fielded)| **fielded)
            .map(|(index, _)| squad.id(index).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squad() -> Squad {
        let players = vec![
            Player::new("a".to_string(), "A".to_string(), Role::Defender).starting(),
            Player::new("b".to_string(), "B".to_string(), Role::Forward).starting(),
            Player::new("c".to_string(), "C".to_string(), Role::Defender),
        ];
        Squad::new(&players).unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let players = vec![
            Player::new("a".to_string(), "A".to_string(), Role::Defender),
            Player::new("a".to_string(), "A again".to_string(), Role::Forward),
        ];
        assert!(matches!(
            Squad::new(&players),
            Err(PlanError::InvalidRoster(_))
        ));
    }

    #[test]
    fn test_accrue_only_touches_fielded() {
        let squad = squad();
        let mut state = RotationState::new(&squad);
        state.accrue(10.0);
        assert_eq!(state.minutes_played, vec![10.0, 10.0, 0.0]);
    }

    #[test]
    fn test_swap_transfers_slot_and_marks_cooldown() {
        let squad = squad();
        let mut state = RotationState::new(&squad);
        state.accrue(10.0);
        state.apply_swap(1, 2, 10.0);

        assert!(!state.on_field[1]);
        assert!(state.on_field[2]);
        // "c" now occupies the forward slot even though their natural role is defender
        assert_eq!(state.slot_role[2], Role::Forward);
        assert_eq!(state.bench_count[1], 1);
        assert!(state.cooldown[1]);
        assert_eq!(state.last_bench_time[1], 10.0);
        assert_eq!(state.last_on_time[2], 10.0);
    }

    #[test]
    fn test_fielded_ids_follow_input_order() {
        let squad = squad();
        let mut state = RotationState::new(&squad);
        assert_eq!(state.fielded_ids(&squad), vec!["a", "b"]);
        state.apply_swap(0, 2, 5.0);
        assert_eq!(state.fielded_ids(&squad), vec!["b", "c"]);
    }
}
