//! Hex Drift Words: a real-time word game on a field of drifting hex tiles.
//!
//! The game core lives in [`game`]; [`websocket`] connects one session per
//! connection to a display client, and [`dictionary`] answers whether a
//! word exists.

pub mod config;
pub mod dictionary;
pub mod game;
pub mod models;
pub mod routes;
pub mod utils;
pub mod websocket;

use std::{sync::Arc, time::Instant};

use dashmap::DashMap;
use uuid::Uuid;

use config::Config;
use game::WordValidator;

/// Bookkeeping for a live game session
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub connected_at: Instant,
}

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub validator: Arc<WordValidator>,
    /// Live sessions keyed by connection id; each owns its own game
    pub sessions: DashMap<Uuid, SessionInfo>,
}
