//! Game directory: creation, lookup, and credential checks.
//!
//! Creation pre-builds the five fixed teams, one per region; teams are never
//! added or removed afterwards.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::game::{NUM_TEAMS, RESOURCES_PER_TURN};
use crate::config::regions::REGIONS;
use crate::domain::game::{Game, Team, TeamId};
use crate::domain::state::GameStatus;
use crate::store::registry::{GameRegistry, SharedGame};
use crate::utils::join_code::generate_join_code;

#[derive(Debug, Clone)]
pub struct CreatedGame {
    pub join_code: String,
    pub host_token: String,
}

/// Create a game with five pre-created teams and register it.
pub fn create_game(registry: &GameRegistry, host_name: String) -> CreatedGame {
    let join_code = loop {
        let code = generate_join_code();
        if !registry.contains(&code) {
            break code;
        }
    };
    let host_token = Uuid::new_v4().to_string();

    let teams: Vec<Team> = REGIONS
        .iter()
        .take(NUM_TEAMS)
        .enumerate()
        .map(|(i, region)| Team {
            id: Uuid::new_v4(),
            index: i as u8,
            name: format!("Đội {}", i + 1),
            region,
            team_token: Uuid::new_v4().to_string(),
            score: 0,
            resources: RESOURCES_PER_TURN,
            placements: Vec::new(),
            has_submitted: false,
            is_connected: false,
        })
        .collect();

    registry.insert(Game {
        join_code: join_code.clone(),
        host_name,
        host_token: host_token.clone(),
        status: GameStatus::Waiting,
        teams,
        state: None,
        created_at: OffsetDateTime::now_utc(),
    });

    CreatedGame {
        join_code,
        host_token,
    }
}

pub fn validate_host_token(game: &Game, token: &str) -> bool {
    !token.is_empty() && game.host_token == token
}

pub fn validate_team_token(game: &Game, team_id: TeamId, token: &str) -> bool {
    !token.is_empty()
        && game
            .team(team_id)
            .is_some_and(|team| team.team_token == token)
}

/// Convenience lookup used by HTTP handlers.
pub fn get_game(registry: &GameRegistry, code: &str) -> Option<SharedGame> {
    registry.get(code)
}
