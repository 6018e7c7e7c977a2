//! Session dispatcher: authenticates inbound messages against the hub,
//! invokes the game engine under the game's write lock, and fans results out.
//!
//! Locks are never held across sends; every handler collects what it needs to
//! broadcast while locked, releases, then delivers.

use tracing::info;
use uuid::Uuid;

use crate::domain::game::{Game, Role, TeamId};
use crate::domain::projection::{Projector, RoleProjector};
use crate::domain::snapshot::{snapshot, GameOverResult, GameSnapshot, TurnResult};
use crate::domain::state::{GameStatus, Phase};
use crate::errors::domain::DomainError;
use crate::services::{game_flow, games};
use crate::state::app_state::AppState;
use crate::ws::phase_timer;
use crate::ws::protocol::{ClientMsg, ServerMsg};

pub fn dispatch(state: &AppState, code: &str, conn_id: Uuid, msg: ClientMsg) {
    match msg {
        ClientMsg::Auth {
            role,
            token,
            team_id,
        } => handle_auth(state, code, conn_id, role, &token, team_id),
        ClientMsg::PlaceResource { cell_id, amount } => {
            handle_place_resource(state, code, conn_id, &cell_id, amount)
        }
        ClientMsg::SubmitTurn => handle_submit_turn(state, code, conn_id),
        ClientMsg::HostStart => handle_host_start(state, code, conn_id),
        ClientMsg::HostPause => handle_host_pause(state, code, conn_id),
        ClientMsg::HostResume => handle_host_resume(state, code, conn_id),
        ClientMsg::HostSkip => handle_host_skip(state, code, conn_id),
        ClientMsg::HostEnd => handle_host_end(state, code, conn_id),
        ClientMsg::Pong => {}
    }
}

fn send_domain_error(state: &AppState, code: &str, conn_id: Uuid, err: &DomainError) {
    state.hub.send_to(
        code,
        conn_id,
        ServerMsg::Error {
            code: err.code(),
            message: err.detail().to_string(),
        },
    );
}

/// Check the connection is authenticated with the expected role; reject with
/// an `ERROR` frame otherwise.
fn require_role(
    state: &AppState,
    code: &str,
    conn_id: Uuid,
    role: Role,
    action: &str,
) -> Option<crate::ws::hub::ConnectionInfo> {
    match state.hub.info(code, conn_id) {
        Some(info) if info.authenticated && info.role == Some(role) => Some(info),
        _ => {
            state.hub.send_to(
                code,
                conn_id,
                ServerMsg::Error {
                    code: "UNAUTHORIZED",
                    message: format!("Only the {action}"),
                },
            );
            None
        }
    }
}

fn handle_auth(
    state: &AppState,
    code: &str,
    conn_id: Uuid,
    role: Role,
    token: &str,
    team_id: Option<TeamId>,
) {
    let Some(shared) = state.games.get(code) else {
        state.hub.send_to(
            code,
            conn_id,
            ServerMsg::AuthFailed {
                reason: "Game not found".to_string(),
            },
        );
        return;
    };

    let valid = {
        let game = shared.read();
        match role {
            Role::Host => games::validate_host_token(&game, token),
            Role::Player => team_id.is_some_and(|id| games::validate_team_token(&game, id, token)),
            // Spectators only need the game to exist.
            Role::Spectator => true,
        }
    };
    if !valid {
        state.hub.send_to(
            code,
            conn_id,
            ServerMsg::AuthFailed {
                reason: "Invalid token".to_string(),
            },
        );
        return;
    }

    // Duplicate host/team connections are rejected here.
    if let Err(err) = state.hub.authenticate(code, conn_id, role, team_id) {
        state.hub.send_to(
            code,
            conn_id,
            ServerMsg::AuthFailed {
                reason: err.detail().to_string(),
            },
        );
        return;
    }

    if role == Role::Player {
        if let Some(team_id) = team_id {
            let mut game = shared.write();
            if let Some(team) = game.team_mut(team_id) {
                team.is_connected = true;
            }
        }
    }

    state
        .hub
        .send_to(code, conn_id, ServerMsg::AuthSuccess { role });

    // Current state, filtered for this recipient.
    let snap = {
        let game = shared.read();
        snapshot(&game)
    };
    if let Some(view) = RoleProjector.project(&snap, role, team_id) {
        state
            .hub
            .send_to(code, conn_id, ServerMsg::GameState { data: view });
    }

    if role == Role::Player {
        if let Some(team_id) = team_id {
            state
                .hub
                .broadcast(code, ServerMsg::TeamConnected { team_id }, Some(conn_id));
        }
    }

    info!(join_code = code, conn_id = %conn_id, ?role, "connection authenticated");
}

fn handle_place_resource(state: &AppState, code: &str, conn_id: Uuid, cell_id: &str, amount: i64) {
    let Some(info) = require_role(state, code, conn_id, Role::Player, "players can place resources")
    else {
        return;
    };
    let Some(team_id) = info.team_id else {
        return;
    };
    let Some(shared) = state.games.get(code) else {
        return;
    };

    let result = {
        let mut game = shared.write();
        game_flow::place_resource(&mut game, team_id, cell_id, amount)
    };
    match result {
        Ok(()) => broadcast_game_state(state, code),
        Err(err) => send_domain_error(state, code, conn_id, &err),
    }
}

fn handle_submit_turn(state: &AppState, code: &str, conn_id: Uuid) {
    let Some(info) = require_role(state, code, conn_id, Role::Player, "players can submit") else {
        return;
    };
    let Some(team_id) = info.team_id else {
        return;
    };
    let Some(shared) = state.games.get(code) else {
        return;
    };

    // Submit and, when this was the last connected team, advance in the same
    // lock span so the timer cannot apply the same transition concurrently.
    let result = {
        let mut game = shared.write();
        game_flow::submit_turn(&mut game, team_id).and_then(|()| {
            if game_flow::all_teams_submitted(&game) {
                advance_locked(&mut game).map(Some)
            } else {
                Ok(None)
            }
        })
    };

    match result {
        Ok(advanced) => {
            state
                .hub
                .broadcast(code, ServerMsg::TeamSubmitted { team_id }, None);
            if let Some(outcome) = advanced {
                emit_advance(state, code, outcome);
            }
        }
        Err(err) => send_domain_error(state, code, conn_id, &err),
    }
}

fn handle_host_start(state: &AppState, code: &str, conn_id: Uuid) {
    if require_role(state, code, conn_id, Role::Host, "host can start the game").is_none() {
        return;
    }
    let Some(shared) = state.games.get(code) else {
        return;
    };

    let started = {
        let mut game = shared.write();
        game_flow::start_game(&mut game).map(|()| {
            let timer = game
                .state
                .as_ref()
                .map(|s| (s.current_phase, s.current_turn, s.phase_time_limit));
            (snapshot(&game), timer)
        })
    };

    match started {
        Ok((snap, timer)) => {
            broadcast_snapshot(state, code, snap);
            if let Some((phase, turn, secs)) = timer {
                phase_timer::schedule(state.clone(), code.to_string(), phase, turn, secs);
            }
        }
        Err(err) => send_domain_error(state, code, conn_id, &err),
    }
}

fn handle_host_pause(state: &AppState, code: &str, conn_id: Uuid) {
    if require_role(state, code, conn_id, Role::Host, "host can pause the game").is_none() {
        return;
    }
    let Some(shared) = state.games.get(code) else {
        return;
    };
    {
        let mut game = shared.write();
        game_flow::pause_game(&mut game);
    }
    broadcast_game_state(state, code);
}

fn handle_host_resume(state: &AppState, code: &str, conn_id: Uuid) {
    if require_role(state, code, conn_id, Role::Host, "host can resume the game").is_none() {
        return;
    }
    let Some(shared) = state.games.get(code) else {
        return;
    };
    let timer = {
        let mut game = shared.write();
        game_flow::resume_game(&mut game);
        game.state
            .as_ref()
            .map(|s| (s.current_phase, s.current_turn, s.phase_time_limit))
    };
    broadcast_game_state(state, code);
    if let Some((phase, turn, secs)) = timer {
        phase_timer::schedule(state.clone(), code.to_string(), phase, turn, secs);
    }
}

fn handle_host_skip(state: &AppState, code: &str, conn_id: Uuid) {
    if require_role(state, code, conn_id, Role::Host, "host can skip the phase").is_none() {
        return;
    }
    let Some(shared) = state.games.get(code) else {
        return;
    };
    let result = {
        let mut game = shared.write();
        advance_locked(&mut game)
    };
    match result {
        Ok(outcome) => emit_advance(state, code, outcome),
        Err(err) => send_domain_error(state, code, conn_id, &err),
    }
}

fn handle_host_end(state: &AppState, code: &str, conn_id: Uuid) {
    if require_role(state, code, conn_id, Role::Host, "host can end the game").is_none() {
        return;
    }
    let Some(shared) = state.games.get(code) else {
        return;
    };
    let result = {
        let mut game = shared.write();
        game.status = GameStatus::Finished;
        game_flow::game_over_result(&game)
    };
    state
        .hub
        .broadcast(code, ServerMsg::GameOver { data: result }, None);
    info!(join_code = code, "game ended by host");
}

/// Release the connection's bindings and reflect a player drop on the game.
pub fn handle_disconnect(state: &AppState, code: &str, conn_id: Uuid) {
    let Some(info) = state.hub.disconnect(code, conn_id) else {
        return;
    };
    if let Some(team_id) = info.team_id {
        if let Some(shared) = state.games.get(code) {
            let mut game = shared.write();
            if let Some(team) = game.team_mut(team_id) {
                team.is_connected = false;
            }
        }
        state
            .hub
            .broadcast(code, ServerMsg::TeamDisconnected { team_id }, None);
    }
}

/// What a phase advance produced, collected under the lock for delivery
/// after it is released.
pub(crate) struct AdvanceOutcome {
    turn_result: Option<TurnResult>,
    game_over: Option<GameOverResult>,
    snapshot: Option<GameSnapshot>,
    timer: Option<(Phase, u32, u64)>,
}

/// Advance the phase with the game's write lock held. The sole path through
/// which phases move, shared by submissions, host skips, and the timer.
pub(crate) fn advance_locked(game: &mut Game) -> Result<AdvanceOutcome, DomainError> {
    let (_, turn_result) = game_flow::advance_phase(game)?;

    if game.status == GameStatus::Finished {
        return Ok(AdvanceOutcome {
            turn_result,
            game_over: Some(game_flow::game_over_result(game)),
            snapshot: None,
            timer: None,
        });
    }

    let timer = game
        .state
        .as_ref()
        .map(|s| (s.current_phase, s.current_turn, s.phase_time_limit));
    Ok(AdvanceOutcome {
        turn_result,
        game_over: None,
        snapshot: Some(snapshot(game)),
        timer,
    })
}

pub(crate) fn emit_advance(state: &AppState, code: &str, outcome: AdvanceOutcome) {
    if let Some(turn_result) = outcome.turn_result {
        state
            .hub
            .broadcast(code, ServerMsg::TurnResult { data: turn_result }, None);
    }
    if let Some(game_over) = outcome.game_over {
        state
            .hub
            .broadcast(code, ServerMsg::GameOver { data: game_over }, None);
        return;
    }
    if let Some(snap) = outcome.snapshot {
        broadcast_snapshot(state, code, snap);
    }
    if let Some((phase, turn, secs)) = outcome.timer {
        phase_timer::schedule(state.clone(), code.to_string(), phase, turn, secs);
    }
}

/// Push the current state to every authenticated connection, each through the
/// role projector.
pub(crate) fn broadcast_game_state(state: &AppState, code: &str) {
    let Some(shared) = state.games.get(code) else {
        return;
    };
    let snap = {
        let game = shared.read();
        snapshot(&game)
    };
    broadcast_snapshot(state, code, snap);
}

fn broadcast_snapshot(state: &AppState, code: &str, snap: GameSnapshot) {
    let projector = RoleProjector;
    state.hub.broadcast_with(code, None, |info| {
        let role = info.role?;
        projector
            .project(&snap, role, info.team_id)
            .map(|view| ServerMsg::GameState { data: view })
    });
}
