//! Tracing subscriber setup shared by the server and the client.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `bin_name` (and the burgerclick crates
/// it links) log at `default_level` while everything else stays at `info`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let default_directives =
        format!("info,{crate_name}={default_level},burgerclick_server={default_level},tower_http={default_level}");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // Tests and embedders may have installed a subscriber already
    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
    {
        tracing::debug!("Keeping existing subscriber for {}: {}", bin_name, e);
        return;
    }
    tracing::debug!("Logger initialized for {}", bin_name);
}
