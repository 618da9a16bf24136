//! S3-backed implementation of the object store capabilities

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::SdkError, operation::head_object::HeadObjectError, presigning::PresigningConfig,
    Client as S3Client,
};
use tracing::{debug, error};

use super::{BucketRecord, ObjectRecord, ObjectStore, StorageError, StorageResult};

/// Object store backed by a pre-configured S3 client
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
    region: Option<String>,
}

impl S3ObjectStore {
    /// Creates a new store around a shared S3 client.
    ///
    /// The client's resolved region is captured once so public URLs can be
    /// derived without further lookups.
    #[must_use]
    pub fn new(s3_client: Arc<S3Client>) -> Self {
        let region = s3_client.config().region().map(ToString::to_string);
        Self { s3_client, region }
    }
}

fn to_utc(timestamp: &aws_sdk_s3::primitives::DateTime) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_buckets(&self) -> StorageResult<Vec<BucketRecord>> {
        let output = self.s3_client.list_buckets().send().await.map_err(|e| {
            error!("Failed to list buckets: {e}");
            StorageError::Provider(e.to_string())
        })?;

        Ok(output
            .buckets()
            .iter()
            .map(|bucket| BucketRecord {
                name: bucket.name().unwrap_or_default().to_string(),
                location: bucket.bucket_region().unwrap_or_default().to_string(),
            })
            .collect())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<ObjectRecord>> {
        debug!("Listing objects in {bucket} under prefix {prefix:?}");

        let mut pages = self
            .s3_client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                error!("Failed to list objects in {bucket}: {e}");
                StorageError::Provider(e.to_string())
            })?;

            for object in page.contents() {
                objects.push(ObjectRecord {
                    key: object.key().unwrap_or_default().to_string(),
                    size: object.size().unwrap_or_default(),
                    // Listing entries never carry Content-Type; only HeadObject does
                    content_type: None,
                    updated: object.last_modified().and_then(to_utc),
                });
            }
        }

        Ok(objects)
    }

    async fn head_object(&self, bucket: &str, key: &str) -> StorageResult<Option<ObjectRecord>> {
        let result = self
            .s3_client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(head) => Ok(Some(ObjectRecord {
                key: key.to_string(),
                size: head.content_length().unwrap_or_default(),
                content_type: head.content_type().map(String::from),
                updated: head.last_modified().and_then(to_utc),
            })),
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
            {
                debug!("Object does not exist: {key}");
                Ok(None)
            }
            Err(e) => {
                error!("Failed to fetch metadata for {key} in {bucket}: {e}");
                Err(StorageError::Provider(e.to_string()))
            }
        }
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigned_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StorageError::Provider(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigned_config)
            .await
            .map_err(|e| {
                error!("Failed to presign GET for {key} in {bucket}: {e}");
                StorageError::Provider(e.to_string())
            })?;

        Ok(presigned.uri().to_string())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        self.s3_client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to delete {key} from {bucket}: {e}");
                StorageError::Provider(e.to_string())
            })?;

        debug!("Deleted object: {key}");
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> Option<String> {
        self.region
            .as_ref()
            .map(|region| format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"))
    }
}
