//! Process-level errors.

use crate::config::ConfigError;
use crate::feed::FeedError;
use crate::store::StoreError;

/// Errors that stop the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("feed client error: {0}")]
    Feed(#[from] FeedError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The refresh task died, most likely from a panic
    #[error("refresh task failed: {0}")]
    Refresh(#[from] tokio::task::JoinError),
}
