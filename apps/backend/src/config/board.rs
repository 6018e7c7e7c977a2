//! Board layout: a 4x4 grid of named cells.
//!
//! The four center cells form the collective national project. They are not
//! materialized as board cells at game start; placements on them go to the
//! single [`PROJECT_CELL_ID`] target instead.

use crate::config::scoring::CellKind;
use crate::domain::state::IndexKind;

#[derive(Debug, Clone, Copy)]
pub struct CellConfig {
    pub position: (u8, u8),
    pub name: &'static str,
    pub kind: CellKind,
    pub indices: &'static [IndexKind],
}

pub static BOARD_CELLS: [CellConfig; 16] = [
    CellConfig {
        position: (0, 0),
        name: "Cửa khẩu Lạng Sơn",
        kind: CellKind::Cooperation,
        indices: &[IndexKind::Integration, IndexKind::Economy],
    },
    CellConfig {
        position: (0, 1),
        name: "Đại học Bách khoa",
        kind: CellKind::Synergy,
        indices: &[IndexKind::Science, IndexKind::Society],
    },
    CellConfig {
        position: (0, 2),
        name: "Viện Hàn lâm",
        kind: CellKind::Synergy,
        indices: &[IndexKind::Science, IndexKind::Culture],
    },
    CellConfig {
        position: (0, 3),
        name: "Khu CN Việt Trì",
        kind: CellKind::Competitive,
        indices: &[IndexKind::Economy, IndexKind::Environment],
    },
    CellConfig {
        position: (1, 0),
        name: "Đồng bằng sông Hồng",
        kind: CellKind::Shared,
        indices: &[IndexKind::Society, IndexKind::Environment],
    },
    CellConfig {
        position: (1, 1),
        name: "Dự án Quốc gia",
        kind: CellKind::Project,
        indices: &[],
    },
    CellConfig {
        position: (1, 2),
        name: "Dự án Quốc gia",
        kind: CellKind::Project,
        indices: &[],
    },
    CellConfig {
        position: (1, 3),
        name: "Cảng Đà Nẵng",
        kind: CellKind::Competitive,
        indices: &[IndexKind::Economy, IndexKind::Integration],
    },
    CellConfig {
        position: (2, 0),
        name: "Tây Nguyên",
        kind: CellKind::Synergy,
        indices: &[IndexKind::Environment, IndexKind::Economy],
    },
    CellConfig {
        position: (2, 1),
        name: "Dự án Quốc gia",
        kind: CellKind::Project,
        indices: &[],
    },
    CellConfig {
        position: (2, 2),
        name: "Dự án Quốc gia",
        kind: CellKind::Project,
        indices: &[],
    },
    CellConfig {
        position: (2, 3),
        name: "KCX Tân Thuận",
        kind: CellKind::Competitive,
        indices: &[IndexKind::Economy, IndexKind::Science],
    },
    CellConfig {
        position: (3, 0),
        name: "Đồng bằng Cửu Long",
        kind: CellKind::Shared,
        indices: &[IndexKind::Society, IndexKind::Economy],
    },
    CellConfig {
        position: (3, 1),
        name: "Khu đô thị Thủ Đức",
        kind: CellKind::Synergy,
        indices: &[IndexKind::Society, IndexKind::Science],
    },
    CellConfig {
        position: (3, 2),
        name: "Trung tâm Tài chính",
        kind: CellKind::Cooperation,
        indices: &[IndexKind::Economy, IndexKind::Integration],
    },
    CellConfig {
        position: (3, 3),
        name: "Cảng Sài Gòn",
        kind: CellKind::Competitive,
        indices: &[IndexKind::Economy, IndexKind::Integration],
    },
];

/// Placement target for the collapsed center cells.
pub const PROJECT_CELL_ID: &str = "project-center";

pub fn is_project_position(position: (u8, u8)) -> bool {
    matches!(position, (1, 1) | (1, 2) | (2, 1) | (2, 2))
}

pub fn cell_id(position: (u8, u8)) -> String {
    format!("cell-{}-{}", position.0, position.1)
}
