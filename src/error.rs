use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActivityError {
    /// A document reached the aggregator without a resolvable creation instant.
    #[error(
        "document has no resolvable creation time: {} (try --timestamp modified or --invalid-timestamps skip-and-count)",
        path.display()
    )]
    InvalidDocument { path: PathBuf },

    #[error("document store unavailable: {0}")]
    Store(#[from] anyhow::Error),
}

pub type ActivityResult<T> = Result<T, ActivityError>;
