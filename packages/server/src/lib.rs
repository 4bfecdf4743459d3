//! Realtime multiplayer click counter backend.
//!
//! Clients send `click` events over a WebSocket; the server persists the
//! cumulative scoreboard to a JSON file and broadcasts every update to all
//! connected clients.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
