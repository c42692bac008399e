use thiserror::Error;

/// Failures talking to the object storage API.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Transport-level failure from reqwest.
    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Storage API answered with a non-success status.
    #[error("Storage API returned {status}: {message}")]
    Api { status: u16, message: String },
}
