//! Role-based projection of game snapshots.
//!
//! A recipient never receives more than its role may observe: spectators see
//! no placements or remaining resources at all, players see only their own
//! team's, the host sees everything. Credentials are excluded at the type
//! level ([`GameSnapshot`] carries none).

use crate::domain::game::{Role, TeamId};
use crate::domain::snapshot::GameSnapshot;

/// Capability interface handed into broadcasts: derive the view a given
/// recipient is entitled to. Returning `None` skips the recipient.
pub trait Projector {
    fn project(
        &self,
        snapshot: &GameSnapshot,
        role: Role,
        team_id: Option<TeamId>,
    ) -> Option<GameSnapshot>;
}

/// The one production projector.
pub struct RoleProjector;

impl Projector for RoleProjector {
    fn project(
        &self,
        snapshot: &GameSnapshot,
        role: Role,
        team_id: Option<TeamId>,
    ) -> Option<GameSnapshot> {
        let mut view = snapshot.clone();

        match role {
            Role::Host => {}
            Role::Spectator => {
                for team in &mut view.teams {
                    team.resources = None;
                    team.placements = None;
                }
            }
            Role::Player => {
                for team in &mut view.teams {
                    if Some(team.id) != team_id {
                        team.resources = None;
                        team.placements = None;
                    }
                }
            }
        }

        Some(view)
    }
}
