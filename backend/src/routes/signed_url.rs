use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{image_storage::ImageStorage, types::AppError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SignedUrlRequest {
    /// Full object name to sign for
    pub blob_name: String,
    /// Signed URL lifetime in minutes
    #[serde(default = "super::default_expiration_minutes")]
    pub expiration_minutes: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SignedUrlResponse {
    /// SigV4 GET URL for the object
    pub signed_url: String,
}

/// Mints a signed download URL without checking that the object exists
#[instrument(skip(image_storage, payload))]
pub async fn create_signed_url(
    Extension(image_storage): Extension<Arc<ImageStorage>>,
    Path(bucket_name): Path<String>,
    Json(payload): Json<SignedUrlRequest>,
) -> Result<Json<SignedUrlResponse>, AppError> {
    let signed_url = image_storage
        .generate_signed_url(&bucket_name, &payload.blob_name, payload.expiration_minutes)
        .await
        .map_err(|e| AppError::from_storage(e, "generate signed URL"))?;

    Ok(Json(SignedUrlResponse { signed_url }))
}
