use crate::team::{Player, Role};
use rand::Rng;
use uuid::Uuid;

/// Generate a sample roster for demos: `on_field` starters in a
/// keeper-plus-outfield shape and `bench` versatile substitutes
pub fn sample_roster(on_field: usize, bench: usize) -> Vec<Player> {
    let outfield = [Role::Defender, Role::Midfielder, Role::Forward];
    let mut roster = Vec::with_capacity(on_field + bench);

    for i in 0..on_field {
        let role = if i == 0 {
            Role::Goalkeeper
        } else {
            outfield[(i - 1) % outfield.len()]
        };
        let player = Player::new(Uuid::new_v4().to_string(), sample_name(), role).starting();
        roster.push(player);
    }

    for i in 0..bench {
        let role = outfield[i % outfield.len()];
        // Utility substitutes: any outfield slot
        let player = Player::new(Uuid::new_v4().to_string(), sample_name(), role)
            .covering(&outfield);
        roster.push(player);
    }

    roster
}

/// Generate a random name (simplified - returns "Player XXXX")
pub fn sample_name() -> String {
    let mut rng = rand::thread_rng();
    let number = rng.gen_range(1000..9999);
    format!("Player {}", number)
}
