use crate::domain::game::{Game, Role};
use crate::domain::projection::{Projector, RoleProjector};
use crate::domain::snapshot::snapshot;
use crate::services::{game_flow, games};
use crate::store::registry::GameRegistry;

/// A started game with three connected teams and one placement by team 0.
fn sample_game() -> Game {
    let registry = GameRegistry::new();
    let created = games::create_game(&registry, "GM".to_string());
    let shared = registry.get(&created.join_code).expect("game exists");
    let mut game = shared.read().clone();

    for team in game.teams.iter_mut().take(3) {
        team.is_connected = true;
    }
    game_flow::start_game(&mut game).expect("start");
    game_flow::advance_phase(&mut game).expect("to action");

    let team0 = game.teams[0].id;
    game_flow::place_resource(&mut game, team0, "cell-0-1", 3).expect("place");
    game
}

#[test]
fn host_sees_everything_unredacted() {
    let game = sample_game();
    let snap = snapshot(&game);

    let view = RoleProjector
        .project(&snap, Role::Host, None)
        .expect("host view");
    for team in &view.teams {
        assert!(team.resources.is_some());
        assert!(team.placements.is_some());
    }
    assert_eq!(
        view.teams[0].placements.as_deref().map(|p| p.len()),
        Some(1)
    );
}

#[test]
fn player_sees_only_its_own_team() {
    let game = sample_game();
    let snap = snapshot(&game);
    let own_id = game.teams[0].id;

    let view = RoleProjector
        .project(&snap, Role::Player, Some(own_id))
        .expect("player view");

    for team in &view.teams {
        if team.id == own_id {
            assert!(team.resources.is_some());
            assert_eq!(team.placements.as_deref().map(|p| p.len()), Some(1));
        } else {
            assert!(team.resources.is_none());
            assert!(team.placements.is_none());
        }
    }
}

#[test]
fn spectator_sees_no_placements_or_resources() {
    let game = sample_game();
    let snap = snapshot(&game);

    let view = RoleProjector
        .project(&snap, Role::Spectator, None)
        .expect("spectator view");
    for team in &view.teams {
        assert!(team.resources.is_none());
        assert!(team.placements.is_none());
    }
}

#[test]
fn no_credential_ever_reaches_the_wire() {
    let game = sample_game();
    let snap = snapshot(&game);

    // Even the unredacted snapshot carries no tokens.
    let serialized = serde_json::to_string(&snap).expect("serialize");
    assert!(!serialized.contains(&game.host_token));
    for team in &game.teams {
        assert!(!serialized.contains(&team.team_token));
    }
}

#[test]
fn projection_does_not_mutate_the_source_snapshot() {
    let game = sample_game();
    let snap = snapshot(&game);

    let _ = RoleProjector.project(&snap, Role::Spectator, None);

    for team in &snap.teams {
        assert!(team.resources.is_some());
        assert!(team.placements.is_some());
    }
}
