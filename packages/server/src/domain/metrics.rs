//! Observability signals emitted by the game.

use super::PlayerName;

/// Sink for the game's counters and gauges.
///
/// The exposition format belongs to the implementation; the domain only
/// reports what happened.
pub trait GameMetrics: Send + Sync {
    /// A click for `name` was persisted and its total is now `total`.
    fn record_click(&self, name: &PlayerName, total: u64);

    /// The scoreboard was cleared.
    fn record_reset(&self);

    /// The number of live connections changed.
    fn set_active_connections(&self, count: usize);
}

/// Metrics sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl GameMetrics for NoopMetrics {
    fn record_click(&self, _name: &PlayerName, _total: u64) {}

    fn record_reset(&self) {}

    fn set_active_connections(&self, _count: usize) {}
}
