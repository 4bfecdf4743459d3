//! Command line and environment configuration of the server.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// burgerclick realtime scoreboard server
#[derive(Parser, Debug, Clone)]
#[command(name = "burgerclick-server", version, about = "burgerclick realtime scoreboard server")]
pub struct ServerConfig {
    /// Bind address
    #[arg(long, env = "BURGERCLICK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "BURGERCLICK_PORT", default_value_t = 8000)]
    pub port: u16,

    /// JSON document holding the persisted scoreboard
    #[arg(long, env = "BURGERCLICK_DATA_FILE", default_value = "clicks.json")]
    pub data_file: PathBuf,

    /// Comma separated origins allowed to open the realtime channel.
    /// Loopback origins are always allowed.
    #[arg(
        long,
        env = "BURGERCLICK_ALLOWED_ORIGINS",
        value_delimiter = ',',
        num_args = 0..
    )]
    pub allowed_origins: Vec<String>,

    /// Upper bound for writing one message to a socket, in milliseconds
    #[arg(long, env = "BURGERCLICK_SEND_TIMEOUT_MS", default_value_t = 5000)]
    pub send_timeout_ms: u64,

    /// Messages queued per connection before it is considered stalled.
    /// Every click queues two messages, so the minimum is 2.
    #[arg(
        long,
        env = "BURGERCLICK_OUTBOUND_CAPACITY",
        default_value_t = 64,
        value_parser = parse_capacity
    )]
    pub outbound_capacity: usize,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "BURGERCLICK_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

/// One `click` plus one `scores` message per click
const MIN_OUTBOUND_CAPACITY: usize = 2;

fn parse_capacity(raw: &str) -> Result<usize, String> {
    let capacity: usize = raw.parse().map_err(|e| format!("{e}"))?;
    if capacity < MIN_OUTBOUND_CAPACITY {
        return Err(format!("capacity must be at least {MIN_OUTBOUND_CAPACITY}"));
    }
    Ok(capacity)
}
