//! Per-turn event table: thresholds for the national project, index rewards
//! on success and penalties on failure.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::domain::state::{IndexDelta, IndexKind};

#[derive(Debug, Serialize)]
pub struct TurnEvent {
    pub turn: u32,
    pub year: u16,
    pub name: &'static str,
    pub project: &'static str,
    pub min_total: u32,
    pub min_teams: usize,
    /// Flat point reward split among contributors on success.
    pub bonus_points: i64,
    pub success_reward: &'static [IndexDelta],
    pub failure_penalty: &'static [IndexDelta],
}

macro_rules! delta {
    ($kind:ident, $value:expr) => {
        IndexDelta {
            index: IndexKind::$kind,
            delta: $value,
        }
    };
}

pub static TURN_EVENTS: [TurnEvent; 8] = [
    TurnEvent {
        turn: 1,
        year: 1986,
        name: "Khủng hoảng lạm phát 774%",
        project: "Nghị quyết Khoán 10",
        min_total: 20,
        min_teams: 3,
        bonus_points: 8,
        success_reward: &[delta!(Economy, 4), delta!(Society, 3)],
        failure_penalty: &[delta!(Economy, -4), delta!(Society, -3)],
    },
    TurnEvent {
        turn: 2,
        year: 1987,
        name: "Cấm vận quốc tế bóp nghẹt",
        project: "Luật Đầu tư Nước ngoài",
        min_total: 21,
        min_teams: 3,
        bonus_points: 10,
        success_reward: &[delta!(Integration, 5), delta!(Economy, 3)],
        failure_penalty: &[delta!(Integration, -4), delta!(Economy, -3)],
    },
    TurnEvent {
        turn: 3,
        year: 1991,
        name: "Liên Xô sụp đổ, viện trợ chấm dứt",
        project: "Tự lực cánh sinh",
        min_total: 22,
        min_teams: 3,
        bonus_points: 12,
        success_reward: &[delta!(Science, 4), delta!(Economy, 4)],
        failure_penalty: &[delta!(Economy, -4), delta!(Science, -3)],
    },
    TurnEvent {
        turn: 4,
        year: 1993,
        name: "Thiên tai lũ lụt miền Trung",
        project: "Cứu trợ quốc gia",
        min_total: 23,
        min_teams: 3,
        bonus_points: 12,
        success_reward: &[delta!(Environment, 5), delta!(Society, 3)],
        failure_penalty: &[delta!(Environment, -4), delta!(Society, -3)],
    },
    TurnEvent {
        turn: 5,
        year: 1994,
        name: "Áp lực mở cửa kinh tế",
        project: "Mỹ dỡ bỏ cấm vận",
        min_total: 24,
        min_teams: 3,
        bonus_points: 14,
        success_reward: &[delta!(Integration, 4), delta!(Economy, 4)],
        failure_penalty: &[delta!(Integration, -4), delta!(Economy, -3)],
    },
    TurnEvent {
        turn: 6,
        year: 1995,
        name: "Hội nhập khu vực",
        project: "Gia nhập ASEAN",
        min_total: 25,
        min_teams: 3,
        bonus_points: 14,
        success_reward: &[delta!(Integration, 5), delta!(Culture, 3)],
        failure_penalty: &[delta!(Integration, -5), delta!(Culture, -4)],
    },
    TurnEvent {
        turn: 7,
        year: 2000,
        name: "Cạnh tranh toàn cầu hóa",
        project: "Hiệp định Thương mại Việt-Mỹ",
        min_total: 26,
        min_teams: 3,
        bonus_points: 16,
        success_reward: &[delta!(Economy, 5), delta!(Science, 3)],
        failure_penalty: &[delta!(Economy, -5), delta!(Science, -4)],
    },
    TurnEvent {
        turn: 8,
        year: 2007,
        name: "Hội nhập sâu rộng",
        project: "Gia nhập WTO",
        min_total: 28,
        min_teams: 4,
        bonus_points: 20,
        success_reward: &[
            delta!(Economy, 3),
            delta!(Society, 3),
            delta!(Culture, 3),
            delta!(Integration, 3),
            delta!(Environment, 3),
            delta!(Science, 3),
        ],
        failure_penalty: &[
            delta!(Economy, -5),
            delta!(Society, -5),
            delta!(Culture, -5),
            delta!(Integration, -5),
            delta!(Environment, -5),
            delta!(Science, -5),
        ],
    },
];

static EVENTS_BY_TURN: Lazy<HashMap<u32, &'static TurnEvent>> =
    Lazy::new(|| TURN_EVENTS.iter().map(|e| (e.turn, e)).collect());

pub fn event_for_turn(turn: u32) -> Option<&'static TurnEvent> {
    EVENTS_BY_TURN.get(&turn).copied()
}
