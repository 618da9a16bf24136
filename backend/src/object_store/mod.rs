//! Narrow capability interface over the object storage provider

mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
mod s3;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use error::{StorageError, StorageResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

/// A bucket as reported by the provider
#[derive(Debug, Clone)]
pub struct BucketRecord {
    /// Bucket name
    pub name: String,
    /// Region the bucket lives in, empty when the provider omits it
    pub location: String,
}

/// Object metadata as reported by the provider
#[derive(Debug, Clone)]
pub struct ObjectRecord {
    /// Full object key within its bucket
    pub key: String,
    /// Size in bytes
    pub size: i64,
    /// Content-Type, when the provider reports one
    pub content_type: Option<String>,
    /// Last modification time, when the provider reports one
    pub updated: Option<DateTime<Utc>>,
}

/// The set of provider capabilities this service depends on.
///
/// Implemented by the real S3 client and by an in-memory double for tests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Lists all buckets visible to the configured identity, in provider order
    async fn list_buckets(&self) -> StorageResult<Vec<BucketRecord>>;

    /// Lists all objects under `prefix` in `bucket`
    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<ObjectRecord>>;

    /// Fetches current metadata for one object, `None` if it does not exist.
    ///
    /// Always a fresh round-trip to the provider, never cached.
    async fn head_object(&self, bucket: &str, key: &str) -> StorageResult<Option<ObjectRecord>>;

    /// Mints a SigV4 GET URL valid for `expires_in`.
    ///
    /// Does not check that the object exists.
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Deletes one object
    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()>;

    /// Public (unsigned) URL for an object, when one can be derived
    fn public_url(&self, bucket: &str, key: &str) -> Option<String>;
}
