use std::sync::Arc;

use axum::{Extension, Json};
use tracing::instrument;

use crate::{
    image_storage::{BucketInfo, ImageStorage},
    types::AppError,
};

/// Lists all buckets visible to the configured identity
#[instrument(skip(image_storage))]
pub async fn list_buckets(
    Extension(image_storage): Extension<Arc<ImageStorage>>,
) -> Result<Json<Vec<BucketInfo>>, AppError> {
    let buckets = image_storage
        .list_buckets()
        .await
        .map_err(|e| AppError::from_storage(e, "list buckets"))?;

    Ok(Json(buckets))
}
