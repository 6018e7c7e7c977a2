//! Join code generation for games.
//!
//! Join codes are 6-digit numeric strings, short enough to read out loud to a
//! room of players. Uniqueness against running games is the caller's job.

use rand::Rng;

use crate::config::game::{JOIN_CODE_CHARSET, JOIN_CODE_LENGTH};

/// Generate a random join code.
pub fn generate_join_code() -> String {
    let mut rng = rand::thread_rng();

    let mut s = String::with_capacity(JOIN_CODE_LENGTH);
    for _ in 0..JOIN_CODE_LENGTH {
        let idx = rng.gen_range(0..JOIN_CODE_CHARSET.len());
        s.push(JOIN_CODE_CHARSET[idx] as char);
    }
    s
}
