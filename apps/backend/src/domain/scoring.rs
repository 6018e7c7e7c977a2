//! Pure scoring over a placements snapshot. No mutable state; calling any
//! function twice on the same input yields identical results.

use std::collections::HashMap;

use crate::config::scoring::{CellKind, COOPERATION_MIN_TEAMS, PROJECT_BONUS_RATE};
use crate::domain::game::TeamId;
use crate::domain::state::{BoardCell, CellPlacement, ProjectContribution};

/// Points earned per team on a single cell.
pub fn score_cell(cell: &BoardCell) -> HashMap<TeamId, f64> {
    let placements: Vec<&CellPlacement> =
        cell.placements.iter().filter(|p| p.amount > 0).collect();

    if placements.is_empty() {
        return HashMap::new();
    }

    let multiplier = cell.kind.multiplier();

    match cell.kind {
        CellKind::Competitive => score_competitive(&placements, multiplier),
        CellKind::Synergy => score_synergy(&placements, multiplier),
        CellKind::Shared => score_shared(&placements, multiplier),
        CellKind::Cooperation => score_cooperation(&placements, multiplier),
        // Project placements never land on a board cell; they are resolved
        // through `resolve_project`.
        CellKind::Project => HashMap::new(),
    }
}

/// Winner takes all (split if tie).
fn score_competitive(placements: &[&CellPlacement], multiplier: f64) -> HashMap<TeamId, f64> {
    let max_amount = placements.iter().map(|p| p.amount).max().unwrap_or(0);
    let winners = placements.iter().filter(|p| p.amount == max_amount).count();
    let prize_per_winner = max_amount as f64 * multiplier / winners as f64;

    placements
        .iter()
        .map(|p| {
            let points = if p.amount == max_amount {
                prize_per_winner
            } else {
                0.0
            };
            (p.team_id, points)
        })
        .collect()
}

/// Every contributor scores its own amount, multiplied.
fn score_synergy(placements: &[&CellPlacement], multiplier: f64) -> HashMap<TeamId, f64> {
    placements
        .iter()
        .map(|p| (p.team_id, p.amount as f64 * multiplier))
        .collect()
}

/// The pool is the total, multiplied; each team takes its proportional share.
fn score_shared(placements: &[&CellPlacement], multiplier: f64) -> HashMap<TeamId, f64> {
    let total: u32 = placements.iter().map(|p| p.amount).sum();
    let pool = total as f64 * multiplier;

    placements
        .iter()
        .map(|p| {
            let points = if total > 0 {
                p.amount as f64 / total as f64 * pool
            } else {
                0.0
            };
            (p.team_id, points)
        })
        .collect()
}

/// Scores only when enough distinct teams join in.
fn score_cooperation(placements: &[&CellPlacement], multiplier: f64) -> HashMap<TeamId, f64> {
    if placements.len() < COOPERATION_MIN_TEAMS {
        return placements.iter().map(|p| (p.team_id, 0.0)).collect();
    }
    placements
        .iter()
        .map(|p| (p.team_id, p.amount as f64 * multiplier))
        .collect()
}

/// Outcome of the turn's national project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectResult {
    pub success: bool,
    pub total_contributed: u32,
    pub teams_contributed: usize,
    pub team_scores: HashMap<TeamId, f64>,
}

/// Resolve the project against the turn's thresholds. Success requires both
/// the total and the distinct-team minimums; meeting them exactly counts.
pub fn resolve_project(
    contributions: &[ProjectContribution],
    min_total: u32,
    min_teams: usize,
) -> ProjectResult {
    let total: u32 = contributions.iter().map(|c| c.amount).sum();
    let teams = contributions.iter().filter(|c| c.amount > 0).count();

    let success = total >= min_total && teams >= min_teams;

    let team_scores = contributions
        .iter()
        .map(|c| {
            let points = if success {
                c.amount as f64 * PROJECT_BONUS_RATE
            } else {
                0.0
            };
            (c.team_id, points)
        })
        .collect();

    ProjectResult {
        success,
        total_contributed: total,
        teams_contributed: teams,
        team_scores,
    }
}
