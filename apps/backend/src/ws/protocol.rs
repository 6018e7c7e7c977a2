//! Wire protocol for the game websocket, tag-discriminated on `type`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::game::{Role, TeamId};
use crate::domain::snapshot::{GameOverResult, GameSnapshot, TurnResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMsg {
    Auth {
        role: Role,
        token: String,
        #[serde(default)]
        team_id: Option<TeamId>,
    },
    PlaceResource {
        cell_id: String,
        amount: i64,
    },
    SubmitTurn,
    HostStart,
    HostPause,
    HostResume,
    HostSkip,
    HostEnd,
    /// Heartbeat acknowledgment; no payload.
    Pong,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMsg {
    Connected {
        client_id: Uuid,
    },
    AuthSuccess {
        role: Role,
    },
    AuthFailed {
        reason: String,
    },
    GameState {
        data: GameSnapshot,
    },
    TeamConnected {
        team_id: TeamId,
    },
    TeamDisconnected {
        team_id: TeamId,
    },
    TeamSubmitted {
        team_id: TeamId,
    },
    TurnResult {
        data: TurnResult,
    },
    GameOver {
        data: GameOverResult,
    },
    Error {
        code: &'static str,
        message: String,
    },
}
