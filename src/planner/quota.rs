use crate::planner::config::PlanConfig;
use crate::team::Player;

/// Fixed arithmetic of one scheduled match.
///
/// With `G` the match length, `F` fielded players, `N` roster size and `W`
/// the window length: `rounds = floor(G / W)` substitution opportunities
/// partition the match into `rounds + 1` equal intervals, and the
/// `intervals x bench` bench seats are shared across the roster as per-player
/// quotas. The division remainder goes to the first players in input order;
/// that is the only per-player bias in the whole planner.
#[derive(Debug, Clone)]
pub struct RotationFrame {
    pub player_count: usize,
    pub field_count: usize,
    pub bench_size: usize,
    pub target_minutes: f64,
    pub rounds: usize,
    pub intervals: usize,
    pub interval_minutes: f64,
    pub bench_slots_total: usize,
    /// Bench-appearance quota per player, in roster input order
    pub quotas: Vec<usize>,
}

impl RotationFrame {
    pub fn compute(players: &[Player], config: &PlanConfig) -> Self {
        let player_count = players.len();
        let field_count = players.iter().filter(|p| p.is_on_field).count();
        let bench_size = player_count - field_count;

        if player_count == 0 || field_count == 0 {
            // Degenerate snapshot; the facade rejects these, the frame stays inert
            return Self {
                player_count,
                field_count,
                bench_size,
                target_minutes: 0.0,
                rounds: 0,
                intervals: 1,
                interval_minutes: config.total_match_minutes,
                bench_slots_total: 0,
                quotas: vec![0; player_count],
            };
        }

        let target_minutes =
            config.total_match_minutes * field_count as f64 / player_count as f64;

        // Guard the floor against representation noise in G / W
        let rounds =
            ((config.total_match_minutes / config.window_length_minutes) + 1e-9).floor() as usize;
        let intervals = rounds + 1;
        let interval_minutes = config.total_match_minutes / intervals as f64;

        let bench_slots_total = intervals * bench_size;
        let floor_share = bench_slots_total / player_count;
        let extra = bench_slots_total - floor_share * player_count;
        let quotas = (0..player_count)
            .map(|i| if i < extra { floor_share + 1 } else { floor_share })
            .collect();

        Self {
            player_count,
            field_count,
            bench_size,
            target_minutes,
            rounds,
            intervals,
            interval_minutes,
            bench_slots_total,
            quotas,
        }
    }

    /// Absolute time of one substitution round, clamped to full time
    pub fn round_time(&self, round: usize, config: &PlanConfig) -> f64 {
        (round as f64 * config.window_length_minutes).min(config.total_match_minutes)
    }

    /// Fair share of minutes at an intermediate point of the match
    pub fn target_at(&self, elapsed_minutes: f64) -> f64 {
        elapsed_minutes * self.field_count as f64 / self.player_count as f64
    }
}
