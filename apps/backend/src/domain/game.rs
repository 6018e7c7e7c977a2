use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::regions::Region;
use crate::domain::state::{GameState, GameStatus};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

pub type TeamId = Uuid;

/// What a connection is allowed to see and do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Host,
    Player,
    Spectator,
}

/// One team's pending stake on a cell, kept on the team and mirrored onto the
/// board by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub cell_id: String,
    pub amount: u32,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    /// Fixed display position 0-4.
    pub index: u8,
    pub name: String,
    pub region: &'static Region,
    /// Credential a player presents when authenticating for this team.
    pub team_token: String,
    pub score: i64,
    pub resources: u32,
    pub placements: Vec<Placement>,
    pub has_submitted: bool,
    pub is_connected: bool,
}

/// One running game: five fixed teams plus the optional started state.
/// Only the game flow service mutates teams and state.
#[derive(Debug, Clone)]
pub struct Game {
    pub join_code: String,
    pub host_name: String,
    pub host_token: String,
    pub status: GameStatus,
    pub teams: Vec<Team>,
    pub state: Option<GameState>,
    pub created_at: OffsetDateTime,
}

impl Game {
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn require_team_mut(&mut self, id: TeamId) -> Result<&mut Team, DomainError> {
        self.team_mut(id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Team, format!("Team {id} not found")))
    }

    pub fn connected_team_count(&self) -> usize {
        self.teams.iter().filter(|t| t.is_connected).count()
    }

    pub fn require_state(&self) -> Result<&GameState, DomainError> {
        self.state.as_ref().ok_or_else(|| {
            DomainError::validation(ValidationKind::GameNotStarted, "Game not started")
        })
    }

    pub fn require_state_mut(&mut self) -> Result<&mut GameState, DomainError> {
        self.state.as_mut().ok_or_else(|| {
            DomainError::validation(ValidationKind::GameNotStarted, "Game not started")
        })
    }
}
