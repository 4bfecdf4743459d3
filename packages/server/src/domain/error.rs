//! Domain layer error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// PlayerName validation error
    #[error("PlayerName cannot be empty")]
    PlayerNameEmpty,

    /// PlayerName too long error
    #[error("PlayerName cannot exceed {max} characters (got {actual})")]
    PlayerNameTooLong { max: usize, actual: usize },

    /// PlayerName contains a character outside `[A-Za-z0-9 _-]`
    #[error("PlayerName contains invalid character {0:?}")]
    PlayerNameInvalidCharacter(char),
}

/// Errors raised by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The scoreboard could not be encoded
    #[error("failed to serialize scoreboard: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing the temporary snapshot failed
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Replacing the persisted snapshot failed
    #[error("failed to rename {from} to {to}: {source}")]
    FileRename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The connection is not (or no longer) registered
    #[error("connection not found: {0}")]
    ConnectionNotFound(String),

    /// The connection's outbound queue rejected the message
    #[error("connection {0} is not accepting messages")]
    ConnectionUnavailable(String),
}
