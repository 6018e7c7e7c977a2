//! Domain layer: pure game types, scoring, and view projection.

pub mod game;
pub mod projection;
pub mod scoring;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod tests_indices;
#[cfg(test)]
mod tests_projection;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use game::{Game, Placement, Role, Team, TeamId};
pub use projection::{Projector, RoleProjector};
pub use state::{GameState, GameStatus, NationalIndices, Phase};
