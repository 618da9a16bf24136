//! HTTP routes

mod buckets;
mod docs;
mod health;
mod images;
mod root;
mod signed_url;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/", get(root::handler))
        .api_route("/api/health", get(health::handler))
        .api_route("/api/buckets", get(buckets::list_buckets))
        .api_route("/api/images/{bucket_name}", get(images::list_images))
        .api_route(
            "/api/images/{bucket_name}/{*blob_name}",
            get(images::get_image),
        )
        .api_route(
            "/api/signed-url/{bucket_name}",
            post(signed_url::create_signed_url),
        )
}

pub(crate) fn default_expiration_minutes() -> u64 {
    crate::image_storage::DEFAULT_SIGNED_URL_EXPIRY_MINUTES
}
