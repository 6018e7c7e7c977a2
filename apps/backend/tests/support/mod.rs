// Not every test binary uses every helper.
#![allow(dead_code)]

pub mod logging;
pub mod ws;

use backend::domain::game::TeamId;
use backend::services::{game_flow, games};
use backend::state::app_state::AppState;

// Auto-initialize logging for this test binary
#[ctor::ctor]
fn init_test_logging() {
    logging::init();
}

/// Create a game, mark the first `connected` teams as connected, and return
/// the app state, the join code, and all five team ids.
pub fn setup_game(connected: usize) -> (AppState, String, Vec<TeamId>) {
    let state = AppState::new();
    let created = games::create_game(&state.games, "GM".to_string());
    let shared = state.games.get(&created.join_code).expect("game registered");

    let team_ids = {
        let mut game = shared.write();
        for team in game.teams.iter_mut().take(connected) {
            team.is_connected = true;
        }
        game.teams.iter().map(|t| t.id).collect()
    };

    (state, created.join_code, team_ids)
}

pub fn start_playing(state: &AppState, code: &str) {
    let shared = state.games.get(code).expect("game registered");
    let mut game = shared.write();
    game_flow::start_game(&mut game).expect("start game");
}
