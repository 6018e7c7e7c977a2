//! Game engine: phase state machine and turn lifecycle.
//!
//! All functions mutate one game under its caller-held lock. The phase
//! sequence is `EVENT -> ACTION -> RESOLUTION -> RESULT -> (EVENT | end)`;
//! `advance_phase` is the sole phase-mutating entry point, whether driven by
//! submissions, a host skip, or the phase timer.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::board;
use crate::config::events::event_for_turn;
use crate::config::game::{
    MAINTENANCE_COST_PER_INDEX, MAX_TURNS, MIN_TEAMS_TO_START, PHASE_ACTION_DURATION,
    PHASE_EVENT_DURATION, PHASE_RESOLUTION_DURATION, PHASE_RESULT_DURATION, RESOURCES_PER_TURN,
};
use crate::domain::game::{Game, Placement, TeamId};
use crate::domain::scoring;
use crate::domain::snapshot::{
    CellResult, GameOverReason, GameOverResult, ProjectContributionResult, RankingEntry,
    TeamPoints, TeamScore, TurnResult,
};
use crate::domain::state::{
    BoardCell, CellPlacement, GameState, GameStatus, IndexDelta, IndexKind, NationalIndices,
    Phase, ProjectContribution, ProjectOutcome, ProjectStatus,
};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

static MAINTENANCE_DELTAS: Lazy<Vec<IndexDelta>> = Lazy::new(|| {
    IndexKind::ALL
        .iter()
        .map(|&index| IndexDelta {
            index,
            delta: -MAINTENANCE_COST_PER_INDEX,
        })
        .collect()
});

/// Start a waiting game: build the board, load turn 1's event, reset teams.
pub fn start_game(game: &mut Game) -> Result<(), DomainError> {
    if game.connected_team_count() < MIN_TEAMS_TO_START {
        return Err(DomainError::validation(
            ValidationKind::InsufficientTeams,
            format!("Need at least {MIN_TEAMS_TO_START} connected teams to start"),
        ));
    }
    if game.status != GameStatus::Waiting {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyStarted,
            "Game already started",
        ));
    }

    // The four project positions collapse into the single project target and
    // are not materialized as board cells.
    let cells: Vec<BoardCell> = board::BOARD_CELLS
        .iter()
        .filter(|c| !board::is_project_position(c.position))
        .map(|c| BoardCell {
            id: board::cell_id(c.position),
            position: c.position,
            kind: c.kind,
            name: c.name,
            indices: c.indices,
            placements: Vec::new(),
        })
        .collect();

    let first_event = event_for_turn(1);

    game.state = Some(GameState {
        current_turn: 1,
        current_phase: Phase::Event,
        phase_started_at: OffsetDateTime::now_utc(),
        phase_time_limit: PHASE_EVENT_DURATION,
        is_paused: false,
        national_indices: NationalIndices::starting(),
        current_event: first_event,
        project_status: first_event.map(ProjectStatus::for_event),
        board: cells,
    });
    game.status = GameStatus::Playing;
    reset_teams_for_turn(game);

    info!(join_code = %game.join_code, "game started");
    Ok(())
}

/// Set a team's stake on a cell to `amount`, adjusting its resource counter
/// by the difference to the previous stake on that cell.
pub fn place_resource(
    game: &mut Game,
    team_id: TeamId,
    cell_id: &str,
    amount: i64,
) -> Result<(), DomainError> {
    let state = game.require_state()?;
    if state.current_phase != Phase::Action {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Resources can only be placed during the action phase",
        ));
    }
    let cell_known =
        cell_id == board::PROJECT_CELL_ID || state.board.iter().any(|c| c.id == cell_id);
    if !cell_known {
        return Err(DomainError::not_found(
            crate::errors::domain::NotFoundKind::Cell,
            format!("Unknown cell {cell_id}"),
        ));
    }

    let team = game.require_team_mut(team_id)?;
    if team.has_submitted {
        return Err(DomainError::validation(
            ValidationKind::AlreadySubmitted,
            "Turn already submitted",
        ));
    }

    let current_amount = team
        .placements
        .iter()
        .find(|p| p.cell_id == cell_id)
        .map(|p| p.amount as i64)
        .unwrap_or(0);
    let change = amount - current_amount;

    if change > team.resources as i64 {
        return Err(DomainError::validation(
            ValidationKind::InsufficientResources,
            "Not enough resources",
        ));
    }
    if amount < 0 {
        return Err(DomainError::validation(
            ValidationKind::NegativeAmount,
            "Amount cannot be negative",
        ));
    }

    team.resources = (team.resources as i64 - change) as u32;
    if let Some(pos) = team.placements.iter().position(|p| p.cell_id == cell_id) {
        if amount == 0 {
            team.placements.remove(pos);
        } else {
            team.placements[pos].amount = amount as u32;
        }
    } else if amount > 0 {
        team.placements.push(Placement {
            cell_id: cell_id.to_string(),
            amount: amount as u32,
        });
    }

    sync_placements_to_board(game);
    debug!(team = %team_id, cell = cell_id, amount, "placement updated");
    Ok(())
}

/// Re-derive every board cell's and the project's placement view from the
/// teams' current placements. A full resync keeps the board consistent with
/// team state however often placements are edited.
fn sync_placements_to_board(game: &mut Game) {
    let Game {
        ref teams,
        ref mut state,
        ..
    } = *game;
    let Some(state) = state.as_mut() else {
        return;
    };

    for cell in &mut state.board {
        cell.placements.clear();
    }
    if let Some(project) = state.project_status.as_mut() {
        project.total_contributed = 0;
        project.contributions.clear();
    }

    for team in teams {
        for placement in &team.placements {
            if placement.cell_id == board::PROJECT_CELL_ID {
                if let Some(project) = state.project_status.as_mut() {
                    project.total_contributed += placement.amount;
                    project.contributions.push(ProjectContribution {
                        team_id: team.id,
                        amount: placement.amount,
                    });
                }
            } else if let Some(cell) = state.board.iter_mut().find(|c| c.id == placement.cell_id) {
                cell.placements.push(CellPlacement {
                    team_id: team.id,
                    amount: placement.amount,
                });
            }
        }
    }
}

/// Mark a team as done for the turn. Safe to repeat.
pub fn submit_turn(game: &mut Game, team_id: TeamId) -> Result<(), DomainError> {
    let team = game.require_team_mut(team_id)?;
    team.has_submitted = true;
    Ok(())
}

/// True iff every currently connected team has submitted; disconnected teams
/// do not block progress.
pub fn all_teams_submitted(game: &Game) -> bool {
    game.teams
        .iter()
        .filter(|t| t.is_connected)
        .all(|t| t.has_submitted)
}

/// Advance to the next phase. Returns the new phase, plus the turn result
/// when leaving the action phase. Leaving the result phase applies upkeep,
/// checks for game over, and otherwise sets up the next turn.
pub fn advance_phase(game: &mut Game) -> Result<(Phase, Option<TurnResult>), DomainError> {
    let phase = game.require_state()?.current_phase;
    let mut result = None;

    match phase {
        Phase::Event => {
            let state = game.require_state_mut()?;
            state.current_phase = Phase::Action;
            state.phase_time_limit = PHASE_ACTION_DURATION;
        }
        Phase::Action => {
            // Nobody places after this point.
            for team in &mut game.teams {
                team.has_submitted = true;
            }
            {
                let state = game.require_state_mut()?;
                state.current_phase = Phase::Resolution;
                state.phase_time_limit = PHASE_RESOLUTION_DURATION;
            }
            result = Some(resolve_turn(game)?);
        }
        Phase::Resolution => {
            let state = game.require_state_mut()?;
            state.current_phase = Phase::Result;
            state.phase_time_limit = PHASE_RESULT_DURATION;
        }
        Phase::Result => {
            {
                let state = game.require_state_mut()?;
                state.national_indices.apply(&MAINTENANCE_DELTAS);
            }

            let (depleted, turn) = {
                let state = game.require_state()?;
                (state.national_indices.any_depleted(), state.current_turn)
            };
            if depleted || turn >= MAX_TURNS {
                game.status = GameStatus::Finished;
                info!(join_code = %game.join_code, turn, depleted, "game finished");
                return Ok((Phase::Result, None));
            }

            {
                let state = game.require_state_mut()?;
                state.current_turn += 1;
                state.current_phase = Phase::Event;
                state.phase_time_limit = PHASE_EVENT_DURATION;

                let next_event = event_for_turn(state.current_turn);
                state.current_event = next_event;
                state.project_status = next_event.map(ProjectStatus::for_event);

                for cell in &mut state.board {
                    cell.placements.clear();
                }
            }
            reset_teams_for_turn(game);
        }
    }

    let state = game.require_state_mut()?;
    state.phase_started_at = OffsetDateTime::now_utc();
    state.is_paused = false;
    Ok((state.current_phase, result))
}

fn reset_teams_for_turn(game: &mut Game) {
    for team in &mut game.teams {
        team.resources = RESOURCES_PER_TURN;
        team.placements.clear();
        team.has_submitted = false;
    }
}

/// Score every cell and the project, fold the results into team totals, and
/// produce the turn's immutable result snapshot.
fn resolve_turn(game: &mut Game) -> Result<TurnResult, DomainError> {
    let Game {
        ref mut teams,
        ref mut state,
        ..
    } = *game;
    let state = state.as_mut().ok_or_else(|| {
        DomainError::validation(ValidationKind::GameNotStarted, "Game not started")
    })?;

    let mut turn_totals: HashMap<TeamId, f64> = teams.iter().map(|t| (t.id, 0.0)).collect();
    let mut cell_results = Vec::with_capacity(state.board.len());

    for cell in &state.board {
        let scores = scoring::score_cell(cell);
        let team_scores = cell
            .placements
            .iter()
            .filter(|p| p.amount > 0)
            .map(|p| TeamPoints {
                team_id: p.team_id,
                points: scores.get(&p.team_id).copied().unwrap_or(0.0),
            })
            .collect();
        cell_results.push(CellResult {
            cell_id: cell.id.clone(),
            team_scores,
        });
        for (team_id, points) in &scores {
            if let Some(total) = turn_totals.get_mut(team_id) {
                *total += points;
            }
        }
    }

    let mut project_success = false;
    let mut project_contributions = Vec::new();
    let mut index_changes: Vec<IndexDelta> = Vec::new();
    let mut bonus_contributors: Vec<TeamId> = Vec::new();
    let mut bonus_points: i64 = 0;

    let project_result = state
        .project_status
        .as_ref()
        .zip(state.current_event)
        .map(|(project, event)| {
            (
                scoring::resolve_project(
                    &project.contributions,
                    project.min_total,
                    project.min_teams,
                ),
                event,
            )
        });

    if let Some((result, event)) = project_result {
        project_success = result.success;

        if let Some(project) = state.project_status.as_mut() {
            project.outcome = if result.success {
                ProjectOutcome::Success
            } else {
                ProjectOutcome::Failure
            };
            project_contributions = project
                .contributions
                .iter()
                .map(|c| ProjectContributionResult {
                    team_id: c.team_id,
                    amount: c.amount,
                    points: result.team_scores.get(&c.team_id).copied().unwrap_or(0.0),
                })
                .collect();
            if result.success {
                bonus_contributors = project
                    .contributions
                    .iter()
                    .filter(|c| c.amount > 0)
                    .map(|c| c.team_id)
                    .collect();
                bonus_points = event.bonus_points;
            }
        }

        for (team_id, points) in &result.team_scores {
            if let Some(total) = turn_totals.get_mut(team_id) {
                *total += points;
            }
        }

        index_changes = if result.success {
            event.success_reward.to_vec()
        } else {
            event.failure_penalty.to_vec()
        };
        state.national_indices.apply(&index_changes);
    }

    let mut team_scores = Vec::with_capacity(teams.len());
    for team in teams.iter_mut() {
        let mut turn_score = turn_totals.get(&team.id).copied().unwrap_or(0.0) as i64;
        // Flat success bonus, split evenly among contributing teams; the
        // integer-division remainder is dropped.
        if project_success && bonus_contributors.contains(&team.id) {
            turn_score += bonus_points / bonus_contributors.len() as i64;
        }
        team.score += turn_score;
        team_scores.push(TeamScore {
            team_id: team.id,
            turn_score,
            total_score: team.score,
        });
    }

    debug!(
        turn = state.current_turn,
        project_success, "turn resolved"
    );

    Ok(TurnResult {
        turn: state.current_turn,
        project_success,
        project_contributions,
        cell_results,
        index_changes,
        new_indices: state.national_indices,
        team_scores,
    })
}

/// Classify why the game ended and rank the teams by cumulative score,
/// keeping original team order on ties.
pub fn game_over_result(game: &Game) -> GameOverResult {
    let (failed_index, final_indices, turns) = match &game.state {
        Some(state) => (
            state.national_indices.first_depleted(),
            state.national_indices,
            state.current_turn,
        ),
        None => (None, NationalIndices::starting(), 0),
    };

    let reason = if failed_index.is_some() {
        GameOverReason::IndexZero
    } else if turns >= MAX_TURNS {
        GameOverReason::Completed
    } else {
        GameOverReason::HostEnded
    };

    let mut ranked: Vec<&crate::domain::game::Team> = game.teams.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    let final_rankings = ranked
        .iter()
        .enumerate()
        .map(|(i, team)| RankingEntry {
            rank: i + 1,
            team_id: team.id,
            team_name: team.name.clone(),
            region: team.region.name,
            score: team.score,
        })
        .collect();

    GameOverResult {
        reason,
        failed_index,
        final_rankings,
        total_turns_played: turns,
        final_indices,
    }
}

pub fn pause_game(game: &mut Game) {
    if let Some(state) = game.state.as_mut() {
        state.is_paused = true;
        game.status = GameStatus::Paused;
    }
}

/// Resume a paused game. The phase start is re-stamped so elapsed pause time
/// does not count against the phase.
pub fn resume_game(game: &mut Game) {
    if let Some(state) = game.state.as_mut() {
        state.is_paused = false;
        state.phase_started_at = OffsetDateTime::now_utc();
        game.status = GameStatus::Playing;
    }
}
