use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    image_storage::{ImageInfo, ImageStorage, ImageWithSignedUrl},
    types::AppError,
};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListImagesQuery {
    /// Only include objects whose name starts with this prefix
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetImageQuery {
    /// Signed URL lifetime in minutes
    #[serde(default = "super::default_expiration_minutes")]
    pub expiration_minutes: u64,
}

/// Lists all images in a bucket, optionally filtered by prefix
#[instrument(skip(image_storage))]
pub async fn list_images(
    Extension(image_storage): Extension<Arc<ImageStorage>>,
    Path(bucket_name): Path<String>,
    Query(query): Query<ListImagesQuery>,
) -> Result<Json<Vec<ImageInfo>>, AppError> {
    let images = image_storage
        .list_images(&bucket_name, &query.prefix)
        .await
        .map_err(|e| AppError::from_storage(e, "list images"))?;

    Ok(Json(images))
}

/// Fetches one image's metadata together with a signed download URL.
///
/// The blob name is a wildcard segment, so names containing `/` resolve here.
#[instrument(skip(image_storage))]
pub async fn get_image(
    Extension(image_storage): Extension<Arc<ImageStorage>>,
    Path((bucket_name, blob_name)): Path<(String, String)>,
    Query(query): Query<GetImageQuery>,
) -> Result<Json<ImageWithSignedUrl>, AppError> {
    let image = image_storage
        .get_image_with_signed_url(&bucket_name, &blob_name, query.expiration_minutes)
        .await
        .map_err(|e| AppError::from_storage(e, "get image"))?;

    Ok(Json(image))
}
