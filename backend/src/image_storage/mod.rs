//! Image browsing facade over the object storage provider


use std::sync::Arc;
use std::time::Duration;

use schemars::JsonSchema;
use serde::Serialize;
use tracing::debug;

use crate::object_store::{ObjectRecord, ObjectStore, StorageError, StorageResult};

/// Lowercase name suffixes that qualify an object as an image
pub const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"];

/// Default signed URL lifetime in minutes
pub const DEFAULT_SIGNED_URL_EXPIRY_MINUTES: u64 = 60;

/// Bucket information
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,
    /// Region the bucket lives in
    pub location: String,
}

/// Image metadata from a bucket listing
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ImageInfo {
    /// Full object name within the bucket
    pub name: String,
    /// Size in bytes
    pub size: i64,
    /// Content-Type, when known
    pub content_type: Option<String>,
    /// Last modification time, RFC 3339
    pub updated: Option<String>,
    /// Unsigned public URL, when one can be derived
    pub public_url: Option<String>,
}

/// Image metadata plus a signed download URL
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ImageWithSignedUrl {
    /// Full object name within the bucket
    pub name: String,
    /// Size in bytes
    pub size: i64,
    /// Content-Type, when known
    pub content_type: Option<String>,
    /// Last modification time, RFC 3339
    pub updated: Option<String>,
    /// SigV4 GET URL for the object
    pub signed_url: String,
}

/// Per-blob failure entry in a batch deletion ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DeleteError {
    /// Blob that failed to delete
    pub blob_name: String,
    /// What went wrong
    pub error: String,
}

/// Outcome ledger of a batch deletion
#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
pub struct DeleteResult {
    /// Number of blobs deleted
    pub deleted: u64,
    /// Number of blobs that could not be deleted
    pub failed: u64,
    /// One entry per failed blob, in input order
    pub errors: Vec<DeleteError>,
}

/// Facade exposing the image browsing operations.
///
/// Holds no state beyond the provider handle; every operation is a
/// self-contained round-trip and safe to invoke concurrently.
pub struct ImageStorage {
    store: Arc<dyn ObjectStore>,
}

impl ImageStorage {
    /// Creates the facade around an object store
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Lists all buckets visible to the configured identity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Provider` if the provider call fails.
    pub async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        let buckets = self.store.list_buckets().await?;
        Ok(buckets
            .into_iter()
            .map(|bucket| BucketInfo {
                name: bucket.name,
                location: bucket.location,
            })
            .collect())
    }

    /// Lists all images in a bucket, optionally under a prefix.
    ///
    /// Objects survive only if their lowercased name ends with one of
    /// [`IMAGE_EXTENSIONS`]; the filter runs before any projection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Provider` if the provider call fails.
    pub async fn list_images(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<ImageInfo>> {
        let objects = self.store.list_objects(bucket, prefix).await?;

        let images: Vec<ImageInfo> = objects
            .into_iter()
            .filter(|object| is_image_name(&object.key))
            .map(|object| {
                let public_url = self.store.public_url(bucket, &object.key);
                ImageInfo {
                    name: object.key,
                    size: object.size,
                    content_type: object.content_type,
                    updated: object.updated.map(|t| t.to_rfc3339()),
                    public_url,
                }
            })
            .collect();

        debug!("Found {} images in {bucket}", images.len());
        Ok(images)
    }

    /// Fetches current metadata for one image and attaches a signed URL.
    ///
    /// Metadata is re-read from the provider on every call.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the blob does not exist and
    /// `StorageError::Provider` for any other provider failure.
    pub async fn get_image_with_signed_url(
        &self,
        bucket: &str,
        blob_name: &str,
        expiration_minutes: u64,
    ) -> StorageResult<ImageWithSignedUrl> {
        let Some(meta) = self.store.head_object(bucket, blob_name).await? else {
            return Err(StorageError::not_found(bucket, blob_name));
        };

        let signed_url = self
            .generate_signed_url(bucket, blob_name, expiration_minutes)
            .await?;

        Ok(project_signed(meta, signed_url))
    }

    /// Mints a SigV4 GET URL valid for `expiration_minutes` from now.
    ///
    /// No existence check: signing a URL for a blob that does not exist is
    /// legal and succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Provider` if presigning fails.
    pub async fn generate_signed_url(
        &self,
        bucket: &str,
        blob_name: &str,
        expiration_minutes: u64,
    ) -> StorageResult<String> {
        self.store
            .presign_get(
                bucket,
                blob_name,
                Duration::from_secs(expiration_minutes.saturating_mul(60)),
            )
            .await
    }

    /// Deletes one image after verifying it exists.
    ///
    /// A concurrent delete between the existence check and the delete call is
    /// a benign race, accepted rather than guarded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the blob does not exist and
    /// `StorageError::Provider` for any other provider failure.
    pub async fn delete_image(&self, bucket: &str, blob_name: &str) -> StorageResult<bool> {
        if self.store.head_object(bucket, blob_name).await?.is_none() {
            return Err(StorageError::not_found(bucket, blob_name));
        }

        self.store.delete_object(bucket, blob_name).await?;
        debug!("Deleted image: {blob_name}");
        Ok(true)
    }

    /// Deletes a batch of images sequentially, in input order.
    ///
    /// Each blob is handled in isolation: a missing blob or a provider error
    /// increments `failed` and appends a ledger entry, and processing always
    /// continues with the next blob. No transactionality, no rollback.
    pub async fn delete_images(&self, bucket: &str, blob_names: &[String]) -> DeleteResult {
        let mut result = DeleteResult::default();

        for blob_name in blob_names {
            match self.delete_one(bucket, blob_name).await {
                Ok(()) => result.deleted += 1,
                Err(error) => {
                    result.failed += 1;
                    result.errors.push(DeleteError {
                        blob_name: blob_name.clone(),
                        error,
                    });
                }
            }
        }

        debug!(
            "Batch delete in {bucket}: {} deleted, {} failed",
            result.deleted, result.failed
        );
        result
    }

    async fn delete_one(&self, bucket: &str, blob_name: &str) -> Result<(), String> {
        match self.store.head_object(bucket, blob_name).await {
            Ok(Some(_)) => self
                .store
                .delete_object(bucket, blob_name)
                .await
                .map_err(|e| e.to_string()),
            Ok(None) => Err("Blob not found".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

fn project_signed(meta: ObjectRecord, signed_url: String) -> ImageWithSignedUrl {
    ImageWithSignedUrl {
        name: meta.key,
        size: meta.size,
        content_type: meta.content_type,
        updated: meta.updated.map(|t| t.to_rfc3339()),
        signed_url,
    }
}

fn is_image_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
