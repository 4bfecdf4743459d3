//! In-process game metrics rendered in the Prometheus text format.
//!
//! Exposed series:
//!
//! - `burgerclick_clicks_total{player}`: counter, survives resets
//! - `burgerclick_player_score{player}`: gauge, cleared on reset
//! - `burgerclick_active_connections`: gauge

use std::{
    collections::BTreeMap,
    fmt::Write,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::domain::{GameMetrics, PlayerName};

/// `Content-Type` of [`PrometheusMetrics::render`]
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Default)]
struct PlayerSeries {
    clicks_total: BTreeMap<String, u64>,
    score: BTreeMap<String, u64>,
}

/// Metrics registry shared by the use cases and the connection registry.
#[derive(Default)]
pub struct PrometheusMetrics {
    players: Mutex<PlayerSeries>,
    active_connections: AtomicUsize,
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::Relaxed)
    }

    pub fn clicks_total(&self, player: &str) -> u64 {
        self.with_players(|p| p.clicks_total.get(player).copied().unwrap_or(0))
    }

    pub fn score(&self, player: &str) -> Option<u64> {
        self.with_players(|p| p.score.get(player).copied())
    }

    fn with_players<T>(&self, f: impl FnOnce(&mut PlayerSeries) -> T) -> T {
        // a panic mid-update cannot leave the maps inconsistent
        let mut players = self.players.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut players)
    }

    /// Render every series in the text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();

        self.with_players(|p| {
            out.push_str("# HELP burgerclick_clicks_total Clicks counted per player.\n");
            out.push_str("# TYPE burgerclick_clicks_total counter\n");
            for (player, value) in &p.clicks_total {
                let _ = writeln!(
                    out,
                    "burgerclick_clicks_total{{player=\"{}\"}} {}",
                    escape_label(player),
                    value
                );
            }

            out.push_str("# HELP burgerclick_player_score Current score per player.\n");
            out.push_str("# TYPE burgerclick_player_score gauge\n");
            for (player, value) in &p.score {
                let _ = writeln!(
                    out,
                    "burgerclick_player_score{{player=\"{}\"}} {}",
                    escape_label(player),
                    value
                );
            }
        });

        out.push_str("# HELP burgerclick_active_connections Live realtime connections.\n");
        out.push_str("# TYPE burgerclick_active_connections gauge\n");
        let _ = writeln!(
            out,
            "burgerclick_active_connections {}",
            self.active_connections()
        );
        out
    }
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

impl GameMetrics for PrometheusMetrics {
    fn record_click(&self, name: &PlayerName, total: u64) {
        self.with_players(|p| {
            *p.clicks_total.entry(name.as_str().to_string()).or_insert(0) += 1;
            p.score.insert(name.as_str().to_string(), total);
        });
    }

    fn record_reset(&self) {
        self.with_players(|p| p.score.clear());
    }

    fn set_active_connections(&self, count: usize) {
        self.active_connections.store(count, Ordering::Relaxed);
    }
}
