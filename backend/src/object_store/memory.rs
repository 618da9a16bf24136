//! In-memory object store used as a test double

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{BucketRecord, ObjectRecord, ObjectStore, StorageError, StorageResult};

/// In-memory [`ObjectStore`] with deterministic fake signed URLs.
///
/// Keys registered as outages fail metadata and delete calls the way a
/// provider outage would, so batch-deletion ledgers can be exercised.
#[derive(Default)]
pub struct MemoryObjectStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    buckets: BTreeMap<String, BTreeMap<String, ObjectRecord>>,
    locations: BTreeMap<String, String>,
    outages: HashSet<String>,
}

impl MemoryObjectStore {
    /// Adds an empty bucket with a location
    #[must_use]
    pub fn with_bucket(self, name: &str, location: &str) -> Self {
        {
            let mut inner = self.inner.lock().expect("lock poisoned");
            inner.buckets.entry(name.to_string()).or_default();
            inner
                .locations
                .insert(name.to_string(), location.to_string());
        }
        self
    }

    /// Stores an object, creating the bucket if needed
    pub fn put_object(&self, bucket: &str, record: ObjectRecord) {
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner
            .buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(record.key.clone(), record);
    }

    /// Makes metadata and delete calls for `key` fail with a provider error
    pub fn set_outage(&self, key: &str) {
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner.outages.insert(key.to_string());
    }

    /// Whether an object is currently stored
    #[must_use]
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        let inner = self.inner.lock().expect("lock poisoned");
        inner
            .buckets
            .get(bucket)
            .is_some_and(|objects| objects.contains_key(key))
    }

    fn check_outage(&self, key: &str) -> StorageResult<()> {
        let inner = self.inner.lock().expect("lock poisoned");
        if inner.outages.contains(key) {
            return Err(StorageError::Provider(
                "simulated provider outage".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list_buckets(&self) -> StorageResult<Vec<BucketRecord>> {
        let inner = self.inner.lock().expect("lock poisoned");
        Ok(inner
            .buckets
            .keys()
            .map(|name| BucketRecord {
                name: name.clone(),
                location: inner.locations.get(name).cloned().unwrap_or_default(),
            })
            .collect())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<ObjectRecord>> {
        let inner = self.inner.lock().expect("lock poisoned");
        let objects = inner
            .buckets
            .get(bucket)
            .ok_or_else(|| StorageError::Provider(format!("bucket {bucket} does not exist")))?;

        Ok(objects
            .values()
            .filter(|record| record.key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn head_object(&self, bucket: &str, key: &str) -> StorageResult<Option<ObjectRecord>> {
        self.check_outage(key)?;
        let inner = self.inner.lock().expect("lock poisoned");
        Ok(inner
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(format!(
            "https://{bucket}.s3.test.localhost/{key}?X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Expires={}",
            expires_in.as_secs()
        ))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        self.check_outage(key)?;
        let mut inner = self.inner.lock().expect("lock poisoned");
        if let Some(objects) = inner.buckets.get_mut(bucket) {
            objects.remove(key);
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> Option<String> {
        Some(format!("https://{bucket}.s3.test.localhost/{key}"))
    }
}
