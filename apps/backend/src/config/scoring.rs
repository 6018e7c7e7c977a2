//! Scoring multipliers per cell type.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Competitive,
    Synergy,
    Shared,
    Cooperation,
    Project,
}

impl CellKind {
    pub fn multiplier(self) -> f64 {
        match self {
            CellKind::Competitive => 1.5,
            CellKind::Synergy => 1.8,
            CellKind::Shared => 1.5,
            CellKind::Cooperation => 2.5,
            CellKind::Project => 1.0,
        }
    }
}

/// Distinct teams a cooperation cell needs before anyone scores on it.
pub const COOPERATION_MIN_TEAMS: usize = 2;

/// Points earned per resource point contributed to a successful project.
pub const PROJECT_BONUS_RATE: f64 = 1.0;
