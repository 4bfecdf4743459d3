//! インメモリ Repository 実装

mod connection;

pub use connection::InMemoryConnectionRepository;
