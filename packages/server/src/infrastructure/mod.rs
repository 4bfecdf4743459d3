//! Infrastructure layer: storage, connection registry, wire DTOs and metrics.

pub mod dto;
pub mod metrics;
pub mod repository;
