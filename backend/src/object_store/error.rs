//! Error types for object storage operations

use thiserror::Error;

/// Result type for object storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can surface from the object storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// The blob does not exist in the bucket
    #[error("Blob {blob_name} not found in bucket {bucket}")]
    NotFound {
        /// Bucket that was searched
        bucket: String,
        /// Blob name that was not found
        blob_name: String,
    },

    /// Anything else raised while talking to the storage provider
    #[error("{0}")]
    Provider(String),
}

impl StorageError {
    /// Not-found error for a blob within a bucket
    pub fn not_found(bucket: impl Into<String>, blob_name: impl Into<String>) -> Self {
        Self::NotFound {
            bucket: bucket.into(),
            blob_name: blob_name.into(),
        }
    }
}
