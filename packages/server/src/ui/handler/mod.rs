//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{get_scores, health_check, metrics, reset_scores};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
