//! End-to-end dispatcher tests: auth, placement, submission, host controls,
//! and role-filtered state fan-out, driven through the same path the
//! websocket session actor uses.

mod support;

use backend::domain::game::{Role, TeamId};
use backend::services::games;
use backend::state::app_state::AppState;
use backend::ws::handlers::{dispatch, handle_disconnect};
use backend::ws::protocol::ClientMsg;
use uuid::Uuid;

use crate::support::ws::{flush, last_of, types, Recorder};

struct TestGame {
    state: AppState,
    code: String,
    host_token: String,
    team_ids: Vec<TeamId>,
    team_tokens: Vec<String>,
}

fn create_test_game() -> TestGame {
    let state = AppState::new();
    let created = games::create_game(&state.games, "GM".to_string());
    let shared = state.games.get(&created.join_code).expect("game");
    let (team_ids, team_tokens) = {
        let game = shared.read();
        (
            game.teams.iter().map(|t| t.id).collect(),
            game.teams.iter().map(|t| t.team_token.clone()).collect(),
        )
    };
    TestGame {
        state,
        code: created.join_code,
        host_token: created.host_token,
        team_ids,
        team_tokens,
    }
}

#[actix_rt::test]
async fn full_session_over_the_dispatcher() {
    let game = create_test_game();
    let TestGame {
        ref state,
        ref code,
        ..
    } = game;

    // Host connects and authenticates.
    let (host_addr, host_msgs) = Recorder::spawn();
    let host_conn = Uuid::new_v4();
    state.hub.connect(code, host_conn, host_addr.clone().recipient());
    dispatch(
        state,
        code,
        host_conn,
        ClientMsg::Auth {
            role: Role::Host,
            token: game.host_token.clone(),
            team_id: None,
        },
    );
    flush(&host_addr).await;
    assert_eq!(types(&host_msgs), vec!["AUTH_SUCCESS", "GAME_STATE"]);

    // Three players connect and authenticate with their team credentials.
    let mut player_addrs = Vec::new();
    let mut player_msgs = Vec::new();
    let mut player_conns = Vec::new();
    for i in 0..3 {
        let (addr, msgs) = Recorder::spawn();
        let conn = Uuid::new_v4();
        state.hub.connect(code, conn, addr.clone().recipient());
        dispatch(
            state,
            code,
            conn,
            ClientMsg::Auth {
                role: Role::Player,
                token: game.team_tokens[i].clone(),
                team_id: Some(game.team_ids[i]),
            },
        );
        player_addrs.push(addr);
        player_msgs.push(msgs);
        player_conns.push(conn);
    }
    for addr in &player_addrs {
        flush(addr).await;
    }
    assert!(types(&player_msgs[0]).contains(&"AUTH_SUCCESS".to_string()));

    // A second connection for team 0 is refused.
    let (dup_addr, dup_msgs) = Recorder::spawn();
    let dup_conn = Uuid::new_v4();
    state.hub.connect(code, dup_conn, dup_addr.clone().recipient());
    dispatch(
        state,
        code,
        dup_conn,
        ClientMsg::Auth {
            role: Role::Player,
            token: game.team_tokens[0].clone(),
            team_id: Some(game.team_ids[0]),
        },
    );
    flush(&dup_addr).await;
    let failed = last_of(&dup_msgs, "AUTH_FAILED").expect("duplicate rejected");
    assert_eq!(failed["reason"], "Team already connected");

    // Wrong token is refused before any binding is attempted.
    dispatch(
        state,
        code,
        dup_conn,
        ClientMsg::Auth {
            role: Role::Player,
            token: "bogus".to_string(),
            team_id: Some(game.team_ids[1]),
        },
    );
    flush(&dup_addr).await;
    let failed = last_of(&dup_msgs, "AUTH_FAILED").expect("bad token rejected");
    assert_eq!(failed["reason"], "Invalid token");

    // Host starts the game; everyone sees the EVENT phase.
    dispatch(state, code, host_conn, ClientMsg::HostStart);
    flush(&host_addr).await;
    let started = last_of(&host_msgs, "GAME_STATE").expect("state after start");
    assert_eq!(started["data"]["status"], "playing");
    assert_eq!(started["data"]["state"]["current_phase"], "event");

    // Host skips EVENT -> ACTION.
    dispatch(state, code, host_conn, ClientMsg::HostSkip);

    // Two teams act; the third never submits.
    dispatch(
        state,
        code,
        player_conns[0],
        ClientMsg::PlaceResource {
            cell_id: "cell-0-3".to_string(),
            amount: 5,
        },
    );
    dispatch(
        state,
        code,
        player_conns[1],
        ClientMsg::PlaceResource {
            cell_id: "project-center".to_string(),
            amount: 4,
        },
    );
    dispatch(state, code, player_conns[0], ClientMsg::SubmitTurn);
    dispatch(state, code, player_conns[1], ClientMsg::SubmitTurn);

    // Host skips ACTION -> RESOLUTION, which resolves the turn.
    dispatch(state, code, host_conn, ClientMsg::HostSkip);
    flush(&host_addr).await;
    for addr in &player_addrs {
        flush(addr).await;
    }

    let turn_result = last_of(&host_msgs, "TURN_RESULT").expect("turn result broadcast");
    assert_eq!(
        turn_result["data"]["team_scores"]
            .as_array()
            .expect("scores")
            .len(),
        5
    );
    assert_eq!(turn_result["data"]["project_success"], false);
    assert!(last_of(&player_msgs[2], "TURN_RESULT").is_some());
    assert!(types(&player_msgs[2]).contains(&"TEAM_SUBMITTED".to_string()));

    // Role filtering on the fan-out: player 2 sees its own resources but not
    // player 0's.
    let view = last_of(&player_msgs[2], "GAME_STATE").expect("player view");
    let teams = view["data"]["teams"].as_array().expect("teams");
    let entry = |id: TeamId| {
        teams
            .iter()
            .find(|t| t["id"] == id.to_string())
            .expect("team entry")
            .clone()
    };
    assert!(entry(game.team_ids[0])["resources"].is_null());
    assert_eq!(entry(game.team_ids[2])["resources"], 14);

    // The host view is unredacted.
    let view = last_of(&host_msgs, "GAME_STATE").expect("host view");
    let teams = view["data"]["teams"].as_array().expect("teams");
    assert!(teams.iter().all(|t| !t["resources"].is_null()));

    // Placement after resolution is a phase error, reported once.
    dispatch(
        state,
        code,
        player_conns[0],
        ClientMsg::PlaceResource {
            cell_id: "cell-0-3".to_string(),
            amount: 3,
        },
    );
    flush(&player_addrs[0]).await;
    let err = last_of(&player_msgs[0], "ERROR").expect("phase error");
    assert_eq!(err["code"], "PHASE_MISMATCH");

    // Host ends the game; the result classifies the reason.
    dispatch(state, code, host_conn, ClientMsg::HostEnd);
    flush(&host_addr).await;
    let over = last_of(&host_msgs, "GAME_OVER").expect("game over broadcast");
    assert_eq!(over["data"]["reason"], "host_ended");
    assert_eq!(
        over["data"]["final_rankings"]
            .as_array()
            .expect("rankings")
            .len(),
        5
    );
}

#[actix_rt::test]
async fn spectators_cannot_act_on_the_game() {
    let game = create_test_game();
    let TestGame {
        ref state,
        ref code,
        ..
    } = game;

    let (addr, msgs) = Recorder::spawn();
    let conn = Uuid::new_v4();
    state.hub.connect(code, conn, addr.clone().recipient());
    dispatch(
        state,
        code,
        conn,
        ClientMsg::Auth {
            role: Role::Spectator,
            token: String::new(),
            team_id: None,
        },
    );
    dispatch(
        state,
        code,
        conn,
        ClientMsg::PlaceResource {
            cell_id: "cell-0-1".to_string(),
            amount: 1,
        },
    );
    dispatch(state, code, conn, ClientMsg::HostStart);
    flush(&addr).await;

    assert!(types(&msgs).contains(&"AUTH_SUCCESS".to_string()));
    let errors: Vec<_> = types(&msgs)
        .into_iter()
        .filter(|t| t == "ERROR")
        .collect();
    assert_eq!(errors.len(), 2, "both actions rejected");
}

#[actix_rt::test]
async fn team_reconnects_with_the_same_credential() {
    let game = create_test_game();
    let TestGame {
        ref state,
        ref code,
        ..
    } = game;
    let shared = state.games.get(code).expect("game");

    let (addr, _msgs) = Recorder::spawn();
    let conn = Uuid::new_v4();
    state.hub.connect(code, conn, addr.clone().recipient());
    dispatch(
        state,
        code,
        conn,
        ClientMsg::Auth {
            role: Role::Player,
            token: game.team_tokens[0].clone(),
            team_id: Some(game.team_ids[0]),
        },
    );
    flush(&addr).await;
    assert!(shared.read().teams[0].is_connected);

    // Drop the connection: the binding is released and the team flagged off.
    handle_disconnect(state, code, conn);
    assert!(!shared.read().teams[0].is_connected);

    // Reconnect with the same token on a fresh connection.
    let (addr2, msgs2) = Recorder::spawn();
    let conn2 = Uuid::new_v4();
    state.hub.connect(code, conn2, addr2.clone().recipient());
    dispatch(
        state,
        code,
        conn2,
        ClientMsg::Auth {
            role: Role::Player,
            token: game.team_tokens[0].clone(),
            team_id: Some(game.team_ids[0]),
        },
    );
    flush(&addr2).await;
    assert!(types(&msgs2).contains(&"AUTH_SUCCESS".to_string()));
    assert!(shared.read().teams[0].is_connected);
}
