use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::config::events::TurnEvent;
use crate::config::game::{INDEX_MAXIMUM, STARTING_INDEX_VALUE};
use crate::config::scoring::CellKind;
use crate::domain::game::TeamId;

/// Phases within a turn, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The turn's event is presented; no actions yet.
    Event,
    /// Teams place resources and submit.
    Action,
    /// Scores are computed; nobody may act.
    Resolution,
    /// The turn result is displayed.
    Result,
}

/// Overall lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    Playing,
    Paused,
    Finished,
}

/// The six national indices tracked over the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Economy,
    Society,
    Culture,
    Integration,
    Environment,
    Science,
}

impl IndexKind {
    pub const ALL: [IndexKind; 6] = [
        IndexKind::Economy,
        IndexKind::Society,
        IndexKind::Culture,
        IndexKind::Integration,
        IndexKind::Environment,
        IndexKind::Science,
    ];
}

/// A signed change to one national index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDelta {
    pub index: IndexKind,
    pub delta: i32,
}

/// Bounded national index counters. Any index reaching zero ends the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalIndices {
    pub economy: i32,
    pub society: i32,
    pub culture: i32,
    pub integration: i32,
    pub environment: i32,
    pub science: i32,
}

impl NationalIndices {
    pub fn starting() -> Self {
        Self {
            economy: STARTING_INDEX_VALUE,
            society: STARTING_INDEX_VALUE,
            culture: STARTING_INDEX_VALUE,
            integration: STARTING_INDEX_VALUE,
            environment: STARTING_INDEX_VALUE,
            science: STARTING_INDEX_VALUE,
        }
    }

    pub fn get(&self, kind: IndexKind) -> i32 {
        match kind {
            IndexKind::Economy => self.economy,
            IndexKind::Society => self.society,
            IndexKind::Culture => self.culture,
            IndexKind::Integration => self.integration,
            IndexKind::Environment => self.environment,
            IndexKind::Science => self.science,
        }
    }

    fn get_mut(&mut self, kind: IndexKind) -> &mut i32 {
        match kind {
            IndexKind::Economy => &mut self.economy,
            IndexKind::Society => &mut self.society,
            IndexKind::Culture => &mut self.culture,
            IndexKind::Integration => &mut self.integration,
            IndexKind::Environment => &mut self.environment,
            IndexKind::Science => &mut self.science,
        }
    }

    /// Apply a set of deltas, clamping every index to `[0, INDEX_MAXIMUM]`.
    pub fn apply(&mut self, deltas: &[IndexDelta]) {
        for d in deltas {
            let slot = self.get_mut(d.index);
            *slot = (*slot + d.delta).clamp(0, INDEX_MAXIMUM);
        }
    }

    pub fn any_depleted(&self) -> bool {
        IndexKind::ALL.iter().any(|&k| self.get(k) <= 0)
    }

    /// First index found at or below zero, in declaration order.
    pub fn first_depleted(&self) -> Option<IndexKind> {
        IndexKind::ALL.iter().copied().find(|&k| self.get(k) <= 0)
    }
}

/// One team's stake on a board cell for the current turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPlacement {
    pub team_id: TeamId,
    pub amount: u32,
}

/// A scoreable cell on the board. Cells are created once at game start and
/// their placements are cleared every turn.
#[derive(Debug, Clone, Serialize)]
pub struct BoardCell {
    pub id: String,
    pub position: (u8, u8),
    pub kind: CellKind,
    pub name: &'static str,
    pub indices: &'static [IndexKind],
    pub placements: Vec<CellPlacement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectOutcome {
    Pending,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContribution {
    pub team_id: TeamId,
    pub amount: u32,
}

/// Aggregate state of the turn's national project, rebuilt each turn from the
/// active event's thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStatus {
    pub total_contributed: u32,
    pub contributions: Vec<ProjectContribution>,
    pub min_total: u32,
    pub min_teams: usize,
    pub outcome: ProjectOutcome,
}

impl ProjectStatus {
    pub fn for_event(event: &TurnEvent) -> Self {
        Self {
            total_contributed: 0,
            contributions: Vec::new(),
            min_total: event.min_total,
            min_teams: event.min_teams,
            outcome: ProjectOutcome::Pending,
        }
    }
}

/// Per-game running state, present once the game has started.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub current_turn: u32,
    pub current_phase: Phase,
    #[serde(with = "time::serde::rfc3339")]
    pub phase_started_at: OffsetDateTime,
    /// Seconds until the phase timer fires.
    pub phase_time_limit: u64,
    pub is_paused: bool,
    pub national_indices: NationalIndices,
    pub current_event: Option<&'static TurnEvent>,
    pub project_status: Option<ProjectStatus>,
    pub board: Vec<BoardCell>,
}
