use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

/// Service banner advertised at the root path
#[derive(Debug, Serialize, JsonSchema)]
pub struct ServiceInfo {
    message: String,
    version: String,
    endpoints: EndpointMap,
}

#[derive(Debug, Serialize, JsonSchema)]
struct EndpointMap {
    buckets: String,
    images: String,
    signed_url: String,
}

/// Root endpoint
pub async fn handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Bucket Viewer API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: EndpointMap {
            buckets: "/api/buckets".to_string(),
            images: "/api/images/{bucket_name}".to_string(),
            signed_url: "/api/signed-url/{bucket_name}".to_string(),
        },
    })
}
