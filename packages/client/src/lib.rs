//! Terminal client for the burgerclick realtime scoreboard.

pub mod error;
pub mod input;
pub mod render;
pub mod session;

// Re-export entry points
pub use session::{ClientArgs, run_client};
