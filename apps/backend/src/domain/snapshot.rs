//! Immutable, serializable views of a game: the full snapshot broadcast as
//! `GAME_STATE`, and the once-per-turn / once-per-game result payloads.
//!
//! Credentials never appear in any of these types; redaction of placements
//! and resources per recipient happens in [`crate::domain::projection`].

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::regions::Region;
use crate::domain::game::{Game, Placement, TeamId};
use crate::domain::state::{GameState, GameStatus, IndexDelta, IndexKind, NationalIndices};

#[derive(Debug, Clone, Serialize)]
pub struct TeamView {
    pub id: TeamId,
    pub index: u8,
    pub name: String,
    pub region: &'static Region,
    pub score: i64,
    /// `None` once redacted for a recipient that may not see them.
    pub resources: Option<u32>,
    pub placements: Option<Vec<Placement>>,
    pub has_submitted: bool,
    pub is_connected: bool,
}

/// Full game view. Built unredacted from the canonical state; the projector
/// produces per-recipient copies.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub join_code: String,
    pub host_name: String,
    pub status: GameStatus,
    pub teams: Vec<TeamView>,
    pub state: Option<GameState>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Produce the unredacted snapshot of a game.
pub fn snapshot(game: &Game) -> GameSnapshot {
    GameSnapshot {
        join_code: game.join_code.clone(),
        host_name: game.host_name.clone(),
        status: game.status,
        teams: game
            .teams
            .iter()
            .map(|t| TeamView {
                id: t.id,
                index: t.index,
                name: t.name.clone(),
                region: t.region,
                score: t.score,
                resources: Some(t.resources),
                placements: Some(t.placements.clone()),
                has_submitted: t.has_submitted,
                is_connected: t.is_connected,
            })
            .collect(),
        state: game.state.clone(),
        created_at: game.created_at,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamPoints {
    pub team_id: TeamId,
    pub points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellResult {
    pub cell_id: String,
    pub team_scores: Vec<TeamPoints>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectContributionResult {
    pub team_id: TeamId,
    pub amount: u32,
    pub points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamScore {
    pub team_id: TeamId,
    pub turn_score: i64,
    pub total_score: i64,
}

/// Snapshot of one resolved turn, produced once and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResult {
    pub turn: u32,
    pub project_success: bool,
    pub project_contributions: Vec<ProjectContributionResult>,
    pub cell_results: Vec<CellResult>,
    pub index_changes: Vec<IndexDelta>,
    pub new_indices: NationalIndices,
    pub team_scores: Vec<TeamScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    Completed,
    IndexZero,
    HostEnded,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub team_id: Uuid,
    pub team_name: String,
    pub region: &'static str,
    pub score: i64,
}

/// Final payload broadcast as `GAME_OVER`.
#[derive(Debug, Clone, Serialize)]
pub struct GameOverResult {
    pub reason: GameOverReason,
    pub failed_index: Option<IndexKind>,
    pub final_rankings: Vec<RankingEntry>,
    pub total_turns_played: u32,
    pub final_indices: NationalIndices,
}
