//! Core game balance parameters.

use std::time::Duration;

/// Turns per game; reaching this in the RESULT phase ends the game.
pub const MAX_TURNS: u32 = 8;
/// Resource points granted to every team at the start of each turn.
pub const RESOURCES_PER_TURN: u32 = 14;
/// Fixed number of teams created with every game.
pub const NUM_TEAMS: usize = 5;
/// Connected teams required before the host may start.
pub const MIN_TEAMS_TO_START: usize = 3;

// Phase durations (seconds)
pub const PHASE_EVENT_DURATION: u64 = 15;
pub const PHASE_ACTION_DURATION: u64 = 60;
pub const PHASE_RESOLUTION_DURATION: u64 = 3;
pub const PHASE_RESULT_DURATION: u64 = 15;

// National index bounds
pub const INDEX_MAXIMUM: i32 = 30;
pub const STARTING_INDEX_VALUE: i32 = 10;
/// Flat upkeep subtracted from every index at the end of each turn.
pub const MAINTENANCE_COST_PER_INDEX: i32 = 1;

// Join codes
pub const JOIN_CODE_LENGTH: usize = 6;
pub const JOIN_CODE_CHARSET: &[u8] = b"0123456789";

// Websocket heartbeat
pub const WS_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
pub const WS_CONNECTION_TIMEOUT: Duration = Duration::from_secs(60);
