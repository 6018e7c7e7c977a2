use std::sync::Arc;

use crate::store::registry::GameRegistry;
use crate::ws::hub::WsHub;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Running games, keyed by join code
    pub games: Arc<GameRegistry>,
    /// Live websocket connections per game
    pub hub: Arc<WsHub>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            games: Arc::new(GameRegistry::new()),
            hub: Arc::new(WsHub::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
