use log::info;
use rotation_planner::planner::{plan_one, recommend, PlanConfig};
use rotation_planner::team::sample_roster;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let roster = sample_roster(7, 4);
    let config = PlanConfig {
        total_match_minutes: 40.0,
        max_subs_per_window: 2,
        window_length_minutes: 10.0,
        ..PlanConfig::default()
    };
    info!(
        "planning {} starters + {} bench over {:.0} minutes",
        7, 4, config.total_match_minutes
    );

    let plan = plan_one(&roster, &config)?;
    println!(
        "Schedule ({} substitutions, target {:.1} min/player):",
        plan.substitution_count(),
        plan.target_minutes_per_player
    );
    for event in &plan.events {
        let off = plan.projection_for(&event.field_player_id);
        let on = plan.projection_for(&event.bench_player_id);
        println!(
            "  {:>5.1}m  {} -> {}",
            event.time_minutes,
            off.map(|p| p.player_name.as_str()).unwrap_or("?"),
            on.map(|p| p.player_name.as_str()).unwrap_or("?"),
        );
    }

    println!("\nProjected minutes:");
    for projection in &plan.projections {
        println!(
            "  {:<14} {:>5.1} min ({:+.1} vs target, benched {}/{})",
            projection.player_name,
            projection.projected_minutes,
            projection.deviation,
            projection.actual_bench_count,
            projection.target_bench_count,
        );
    }
    for warning in &plan.warnings {
        println!("note: {}", warning);
    }

    let analysis = recommend(&roster, config.total_match_minutes)?;
    println!("\nPer-window analysis (recommended k = {}):", analysis.recommended_k);
    for combination in &analysis.combinations {
        println!(
            "  k={}  variance {:>7.2}  spread {:>5.1}..{:<5.1}  {} sub(s){}",
            combination.max_subs_per_window,
            combination.variance,
            combination.min_projected_minutes,
            combination.max_projected_minutes,
            combination.substitution_count,
            if combination.is_recommended { "  <- recommended" } else { "" },
        );
    }

    Ok(())
}
