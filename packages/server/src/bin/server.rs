//! burgerclick realtime scoreboard server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin burgerclick-server -- --port 8000 --data-file clicks.json
//! ```

use burgerclick_server::ServerConfig;
use burgerclick_shared::logger::setup_logger;
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = burgerclick_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
