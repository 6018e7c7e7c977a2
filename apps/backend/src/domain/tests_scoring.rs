use uuid::Uuid;

use crate::config::scoring::CellKind;
use crate::domain::scoring::{resolve_project, score_cell};
use crate::domain::state::{BoardCell, CellPlacement, ProjectContribution};

fn cell(kind: CellKind, placements: &[(Uuid, u32)]) -> BoardCell {
    BoardCell {
        id: "cell-0-0".to_string(),
        position: (0, 0),
        kind,
        name: "test cell",
        indices: &[],
        placements: placements
            .iter()
            .map(|&(team_id, amount)| CellPlacement { team_id, amount })
            .collect(),
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn competitive_single_winner_takes_the_pool() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let scores = score_cell(&cell(CellKind::Competitive, &[(a, 5), (b, 3)]));

    // pool = 5 * 1.5, loser gets nothing
    assert_close(scores[&a], 7.5);
    assert_close(scores[&b], 0.0);
}

#[test]
fn competitive_tie_splits_the_pool_evenly() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let scores = score_cell(&cell(CellKind::Competitive, &[(a, 5), (b, 5), (c, 2)]));

    assert_close(scores[&a], 3.75);
    assert_close(scores[&b], 3.75);
    assert_close(scores[&c], 0.0);
}

#[test]
fn synergy_scores_each_team_independently() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let scores = score_cell(&cell(CellKind::Synergy, &[(a, 4), (b, 2)]));

    assert_close(scores[&a], 7.2);
    assert_close(scores[&b], 3.6);
}

#[test]
fn shared_splits_the_pool_proportionally() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let scores = score_cell(&cell(CellKind::Shared, &[(a, 6), (b, 2)]));

    // pool = 8 * 1.5 = 12, shares 6/8 and 2/8
    assert_close(scores[&a], 9.0);
    assert_close(scores[&b], 3.0);
}

#[test]
fn cooperation_below_threshold_scores_zero() {
    let a = Uuid::new_v4();
    let scores = score_cell(&cell(CellKind::Cooperation, &[(a, 5)]));

    assert_close(scores[&a], 0.0);
}

#[test]
fn cooperation_at_threshold_scores_everyone() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let scores = score_cell(&cell(CellKind::Cooperation, &[(a, 3), (b, 2)]));

    assert_close(scores[&a], 7.5);
    assert_close(scores[&b], 5.0);
}

#[test]
fn zero_amount_placements_are_ignored() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let scores = score_cell(&cell(CellKind::Competitive, &[(a, 0), (b, 0)]));
    assert!(scores.is_empty());

    // A zero placement also does not count as a cooperation participant.
    let scores = score_cell(&cell(CellKind::Cooperation, &[(a, 4), (b, 0)]));
    assert_close(scores[&a], 0.0);
}

#[test]
fn scoring_is_idempotent_over_a_snapshot() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let snapshot = cell(CellKind::Shared, &[(a, 6), (b, 2)]);

    let first = score_cell(&snapshot);
    let second = score_cell(&snapshot);
    assert_eq!(first, second);
}

fn contributions(entries: &[(Uuid, u32)]) -> Vec<ProjectContribution> {
    entries
        .iter()
        .map(|&(team_id, amount)| ProjectContribution { team_id, amount })
        .collect()
}

#[test]
fn project_succeeds_exactly_at_both_thresholds() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let result = resolve_project(&contributions(&[(a, 10), (b, 5), (c, 5)]), 20, 3);

    assert!(result.success);
    assert_eq!(result.total_contributed, 20);
    assert_eq!(result.teams_contributed, 3);
    assert_close(result.team_scores[&a], 10.0);
    assert_close(result.team_scores[&b], 5.0);
}

#[test]
fn project_fails_one_unit_below_total_threshold() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let result = resolve_project(&contributions(&[(a, 9), (b, 5), (c, 5)]), 20, 3);

    assert!(!result.success);
    assert_close(result.team_scores[&a], 0.0);
    assert_close(result.team_scores[&b], 0.0);
}

#[test]
fn project_fails_one_team_below_team_threshold() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let result = resolve_project(&contributions(&[(a, 15), (b, 10)]), 20, 3);

    assert!(!result.success);
    assert_eq!(result.teams_contributed, 2);
}

#[test]
fn project_ignores_zero_contributions_for_team_count() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let result = resolve_project(&contributions(&[(a, 15), (b, 10), (c, 0)]), 20, 3);

    assert!(!result.success, "zero contribution must not count as a team");
}
