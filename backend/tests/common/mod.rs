use std::sync::Arc;

use axum::{body::Body, Router};
use bucket_viewer::{
    image_storage::ImageStorage,
    object_store::{MemoryObjectStore, ObjectRecord},
    server,
    types::Environment,
};
use chrono::{TimeZone, Utc};
use http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Object record with a fixed modification time
pub fn record(key: &str, size: i64, content_type: Option<&str>) -> ObjectRecord {
    ObjectRecord {
        key: key.to_string(),
        size,
        content_type: content_type.map(String::from),
        updated: Some(Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()),
    }
}

/// Router over an in-memory store seeded with a mixed photos bucket
pub fn seeded_app() -> Router {
    let store = MemoryObjectStore::default()
        .with_bucket("photos", "us-east-1")
        .with_bucket("archive", "eu-west-1");

    store.put_object("photos", record("2024/07/cat.png", 2048, Some("image/png")));
    store.put_object("photos", record("2024/07/dog.jpg", 4096, Some("image/jpeg")));
    store.put_object("photos", record("Photo.JPG", 1024, Some("image/jpeg")));
    store.put_object("photos", record("banner.webp", 512, Some("image/webp")));
    store.put_object("photos", record("notes.txt", 64, Some("text/plain")));

    let image_storage = Arc::new(ImageStorage::new(Arc::new(store)));
    server::app(Environment::Development, image_storage)
}

/// Sends a GET request and returns status plus parsed JSON body
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    split(response).await
}

/// Sends a JSON POST request and returns status plus parsed JSON body
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    split(response).await
}

async fn split(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
