//! Phase timer: one delayed advance per phase entry.
//!
//! Fire-and-forget by design: there is no cancellation primitive. At fire
//! time the task re-reads the game and does nothing if the phase or turn has
//! already moved on (submissions or a host skip got there first), the game is
//! paused, or it is no longer playing. The staleness check runs under the
//! same write lock as the advance itself, so a timer and a manual advance
//! cannot both apply one transition.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::state::{GameStatus, Phase};
use crate::state::app_state::AppState;
use crate::ws::handlers;

pub fn schedule(state: AppState, code: String, phase: Phase, turn: u32, secs: u64) {
    tokio::spawn(async move {
        sleep(Duration::from_secs(secs)).await;

        let Some(shared) = state.games.get(&code) else {
            return;
        };

        let outcome = {
            let mut game = shared.write();
            {
                let Some(gs) = game.state.as_ref() else {
                    return;
                };
                if gs.current_phase != phase || gs.current_turn != turn {
                    debug!(join_code = %code, ?phase, turn, "phase timer stale, skipping");
                    return;
                }
                if gs.is_paused {
                    return;
                }
            }
            if game.status != GameStatus::Playing {
                return;
            }

            match handlers::advance_locked(&mut game) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(join_code = %code, error = %err, "timer-driven advance failed");
                    return;
                }
            }
        };

        handlers::emit_advance(&state, &code, outcome);
    });
}
