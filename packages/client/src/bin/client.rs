//! burgerclick terminal client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin burgerclick-client -- --name Alice
//! ```

use burgerclick_client::ClientArgs;
use burgerclick_shared::logger::setup_logger;
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    // Keep the prompt readable: only warnings unless RUST_LOG says otherwise
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    if let Err(e) = burgerclick_client::run_client(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
