//! In-memory registry of running games, keyed by join code.
//!
//! Each game sits behind its own `RwLock`; handlers take the lock for the
//! whole of a mutation and never hold it across an await point, so a game is
//! only ever mutated by one control flow at a time. Games are independent of
//! one another.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::domain::game::Game;

pub type SharedGame = Arc<RwLock<Game>>;

#[derive(Default)]
pub struct GameRegistry {
    games: DashMap<String, SharedGame>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
        }
    }

    /// Register a game under its join code, returning the shared handle.
    pub fn insert(&self, game: Game) -> SharedGame {
        let code = game.join_code.clone();
        let shared: SharedGame = Arc::new(RwLock::new(game));
        self.games.insert(code, shared.clone());
        shared
    }

    pub fn get(&self, code: &str) -> Option<SharedGame> {
        self.games
            .get(&code.to_uppercase())
            .map(|entry| entry.value().clone())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.games.contains_key(&code.to_uppercase())
    }

    pub fn remove(&self, code: &str) -> bool {
        self.games.remove(&code.to_uppercase()).is_some()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
