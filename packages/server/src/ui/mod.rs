//! HTTP and WebSocket surface of the game server.

mod handler;
pub mod origin;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_app, run};
