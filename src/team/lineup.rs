use crate::team::Role;
use serde::{Deserialize, Serialize};

/// Required number of fielded players per role; fixed for the whole match
///
/// The requirement is derived from the starting on-field set and acts as a
/// contract: no substitution may change the per-role counts on the pitch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRequirement {
    counts: [usize; 4],
}

impl PositionRequirement {
    /// Derive the requirement from the slots a lineup occupies
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut counts = [0usize; 4];
        for role in roles {
            counts[role.index()] += 1;
        }
        Self { counts }
    }

    /// Required count for one role
    pub fn count(&self, role: Role) -> usize {
        self.counts[role.index()]
    }

    /// Total fielded players the requirement describes
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Get a compact human-readable summary, e.g. "1 GK / 2 DF / 3 MF / 1 FW"
    pub fn describe(&self) -> String {
        Role::ALL
            .iter()
            .map(|role| format!("{} {}", self.count(*role), role.short_name()))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Check whether a candidate on-field set forms a legal lineup.
///
/// `slot_roles` are the slots the candidates would occupy. The check is an
/// exact per-role count comparison; which player may fill which slot is the
/// swap selector's concern, not the lineup's.
pub fn is_legal_lineup(
    slot_roles: impl IntoIterator<Item = Role>,
    requirement: &PositionRequirement,
) -> bool {
    PositionRequirement::from_roles(slot_roles) == *requirement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_counts_roles() {
        let requirement = PositionRequirement::from_roles([
            Role::Goalkeeper,
            Role::Defender,
            Role::Defender,
            Role::Midfielder,
            Role::Forward,
        ]);
        assert_eq!(requirement.count(Role::Goalkeeper), 1);
        assert_eq!(requirement.count(Role::Defender), 2);
        assert_eq!(requirement.count(Role::Midfielder), 1);
        assert_eq!(requirement.count(Role::Forward), 1);
        assert_eq!(requirement.total(), 5);
    }

    #[test]
    fn test_same_counts_are_legal() {
        let requirement =
            PositionRequirement::from_roles([Role::Goalkeeper, Role::Defender, Role::Forward]);
        assert!(is_legal_lineup(
            [Role::Forward, Role::Goalkeeper, Role::Defender],
            &requirement
        ));
    }

    #[test]
    fn test_shifted_counts_are_not_legal() {
        let requirement =
            PositionRequirement::from_roles([Role::Goalkeeper, Role::Defender, Role::Forward]);
        // Same size, different shape
        assert!(!is_legal_lineup(
            [Role::Goalkeeper, Role::Defender, Role::Defender],
            &requirement
        ));
        // Different size
        assert!(!is_legal_lineup([Role::Goalkeeper, Role::Defender], &requirement));
    }

    #[test]
    fn test_describe_lists_all_roles() {
        let requirement = PositionRequirement::from_roles([Role::Goalkeeper, Role::Midfielder]);
        assert_eq!(requirement.describe(), "1 GK / 0 DF / 1 MF / 0 FW");
    }
}
