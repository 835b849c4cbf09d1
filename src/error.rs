use thiserror::Error;

/// Errors returned by [`ParcelStore`](crate::ParcelStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row exists for the requested parcel number.
    #[error("parcel {0} not found")]
    NotFound(i64),

    /// Failure reported by SQLite, passed through unchanged.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// True when the error is the not-found condition rather than a database failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
