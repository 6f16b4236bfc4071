use serde::{Deserialize, Serialize};

/// Playing role, which doubles as the slot a fielded player occupies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Goalkeeper,
        Role::Defender,
        Role::Midfielder,
        Role::Forward,
    ];

    /// Stable index into per-role count tables
    pub fn index(&self) -> usize {
        match self {
            Role::Goalkeeper => 0,
            Role::Defender => 1,
            Role::Midfielder => 2,
            Role::Forward => 3,
        }
    }

    /// Get role abbreviation
    pub fn short_name(&self) -> &str {
        match self {
            Role::Goalkeeper => "GK",
            Role::Defender => "DF",
            Role::Midfielder => "MF",
            Role::Forward => "FW",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Roster entry consumed by the planner; an immutable snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,

    /// The slot this player occupies at kickoff (for starters) or their
    /// natural role (for bench players)
    pub role: Role,

    pub is_on_field: bool,

    /// A locked player is never substituted off
    pub is_locked: bool,

    /// Slots this player may fill when brought on; never empty
    pub allowed_positions: Vec<Role>,
}

impl Player {
    /// Create a new player covering only their natural role
    pub fn new(id: String, name: String, role: Role) -> Self {
        Self {
            id,
            name,
            role,
            is_on_field: false,
            is_locked: false,
            allowed_positions: vec![role],
        }
    }

    /// Same player, placed on the field at kickoff
    pub fn starting(mut self) -> Self {
        self.is_on_field = true;
        self
    }

    /// Same player, with extra slots they are able to cover
    pub fn covering(mut self, positions: &[Role]) -> Self {
        for role in positions {
            if !self.allowed_positions.contains(role) {
                self.allowed_positions.push(*role);
            }
        }
        self
    }

    /// Whether this player may occupy the given slot
    pub fn can_fill(&self, slot: Role) -> bool {
        self.allowed_positions.contains(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_covers_own_role() {
        let player = Player::new("1".to_string(), "Alex".to_string(), Role::Defender);
        assert!(player.can_fill(Role::Defender));
        assert!(!player.can_fill(Role::Goalkeeper));
        assert!(!player.is_on_field);
        assert!(!player.is_locked);
    }

    #[test]
    fn test_covering_adds_without_duplicates() {
        let player = Player::new("1".to_string(), "Alex".to_string(), Role::Defender)
            .covering(&[Role::Defender, Role::Midfielder]);
        assert_eq!(player.allowed_positions.len(), 2);
        assert!(player.can_fill(Role::Midfielder));
    }

    #[test]
    fn test_role_round_trip_through_json() {
        let json = serde_json::to_string(&Role::Midfielder).unwrap();
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Midfielder);
    }
}
