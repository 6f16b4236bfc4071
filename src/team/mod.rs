// Team module - Roster data models for the rotation planner

mod generator;
mod lineup;
mod player;

// Re-export all public types
pub use generator::{sample_name, sample_roster};
pub use lineup::{is_legal_lineup, PositionRequirement};
pub use player::{Player, Role};
