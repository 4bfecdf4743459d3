//! Server state and connection management.

use std::{sync::Arc, time::Duration};

use crate::{
    config::ServerConfig,
    domain::{ConnectionRepository, GameMetrics, ScoreRepository},
    infrastructure::{
        metrics::PrometheusMetrics,
        repository::{FileScoreRepository, InMemoryConnectionRepository},
    },
    ui::origin::OriginPolicy,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetScoresUseCase, RecordClickUseCase,
        ResetScoresUseCase, ScoreWriteLock, new_score_write_lock,
    },
};

/// Per-connection transport limits
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Outbound queue length before a peer counts as stalled
    pub outbound_capacity: usize,
    /// Bound on a single socket write
    pub send_timeout: Duration,
}

/// Shared application state
pub struct AppState {
    /// Persisted scoreboard（データアクセス層の抽象化）
    pub scores: Arc<dyn ScoreRepository>,
    /// Live realtime connections
    pub connections: Arc<dyn ConnectionRepository>,
    pub metrics: Arc<PrometheusMetrics>,
    /// Serializes every scoreboard mutation and its broadcasts
    pub write_lock: ScoreWriteLock,
    pub origin_policy: OriginPolicy,
    pub session: SessionSettings,
}

impl AppState {
    /// Wire the file store, the in-memory registry and the metrics together.
    pub fn new(config: &ServerConfig) -> Self {
        let metrics = Arc::new(PrometheusMetrics::new());
        Self {
            scores: Arc::new(FileScoreRepository::new(config.data_file.clone())),
            connections: Arc::new(InMemoryConnectionRepository::new(metrics.clone())),
            metrics,
            write_lock: new_score_write_lock(),
            origin_policy: OriginPolicy::new(&config.allowed_origins),
            session: SessionSettings {
                outbound_capacity: config.outbound_capacity,
                send_timeout: config.send_timeout(),
            },
        }
    }

    fn game_metrics(&self) -> Arc<dyn GameMetrics> {
        self.metrics.clone()
    }

    pub fn connect_client(&self) -> ConnectClientUseCase {
        ConnectClientUseCase::new(
            self.scores.clone(),
            self.connections.clone(),
            self.write_lock.clone(),
        )
    }

    pub fn disconnect_client(&self) -> DisconnectClientUseCase {
        DisconnectClientUseCase::new(self.connections.clone())
    }

    pub fn record_click(&self) -> RecordClickUseCase {
        RecordClickUseCase::new(
            self.scores.clone(),
            self.connections.clone(),
            self.game_metrics(),
            self.write_lock.clone(),
        )
    }

    pub fn reset_scores(&self) -> ResetScoresUseCase {
        ResetScoresUseCase::new(
            self.scores.clone(),
            self.connections.clone(),
            self.game_metrics(),
            self.write_lock.clone(),
        )
    }

    pub fn get_scores(&self) -> GetScoresUseCase {
        GetScoresUseCase::new(self.scores.clone())
    }
}
