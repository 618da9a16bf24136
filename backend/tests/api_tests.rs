mod common;

use axum::body::Body;
use common::*;
use http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn root_banner_lists_functional_endpoints() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bucket Viewer API");
    assert!(body["version"].is_string());
    assert_eq!(body["endpoints"]["buckets"], "/api/buckets");
    assert_eq!(body["endpoints"]["images"], "/api/images/{bucket_name}");
    assert_eq!(
        body["endpoints"]["signed_url"],
        "/api/signed-url/{bucket_name}"
    );
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn list_buckets_returns_names_and_locations() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/buckets").await;

    assert_eq!(status, StatusCode::OK);
    let buckets = body.as_array().unwrap();
    assert_eq!(buckets.len(), 2);
    assert!(buckets
        .iter()
        .any(|b| b["name"] == "photos" && b["location"] == "us-east-1"));
    assert!(buckets
        .iter()
        .any(|b| b["name"] == "archive" && b["location"] == "eu-west-1"));
}

#[tokio::test]
async fn list_images_filters_out_non_images() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/images/photos").await;

    assert_eq!(status, StatusCode::OK);
    let images = body.as_array().unwrap();
    let names: Vec<&str> = images.iter().map(|i| i["name"].as_str().unwrap()).collect();

    assert_eq!(images.len(), 4);
    assert!(names.contains(&"2024/07/cat.png"));
    assert!(names.contains(&"2024/07/dog.jpg"));
    assert!(names.contains(&"Photo.JPG"));
    assert!(names.contains(&"banner.webp"));
    assert!(!names.contains(&"notes.txt"));

    let cat = images.iter().find(|i| i["name"] == "2024/07/cat.png").unwrap();
    assert_eq!(cat["size"], 2048);
    assert_eq!(cat["updated"], "2024-07-01T12:00:00+00:00");
    assert!(cat["public_url"].as_str().unwrap().ends_with("/2024/07/cat.png"));
}

#[tokio::test]
async fn list_images_respects_prefix_query() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/images/photos?prefix=2024/").await;

    assert_eq!(status, StatusCode::OK);
    let images = body.as_array().unwrap();
    assert_eq!(images.len(), 2);
}

#[tokio::test]
async fn list_images_empty_prefix_result_is_200_with_empty_list() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/images/archive?prefix=2024/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_images_unknown_bucket_is_500_with_detail() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/images/no-such-bucket").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to list images:"));
}

#[tokio::test]
async fn get_image_resolves_nested_blob_name() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/images/photos/2024/07/cat.png").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "2024/07/cat.png");
    assert_eq!(body["size"], 2048);
    assert_eq!(body["content_type"], "image/png");
    assert_eq!(body["updated"], "2024-07-01T12:00:00+00:00");
    // Default expiration is 60 minutes
    assert!(body["signed_url"]
        .as_str()
        .unwrap()
        .contains("X-Amz-Expires=3600"));
}

#[tokio::test]
async fn get_image_honors_expiration_minutes_query() {
    let app = seeded_app();

    let (status, body) =
        get_json(&app, "/api/images/photos/banner.webp?expiration_minutes=30").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["signed_url"]
        .as_str()
        .unwrap()
        .contains("X-Amz-Expires=1800"));
}

#[tokio::test]
async fn get_image_missing_blob_is_404_with_exact_detail() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/images/mybucket/missing.png").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"detail": "Blob missing.png not found in bucket mybucket"})
    );
}

#[tokio::test]
async fn signed_url_route_defaults_to_60_minutes() {
    let app = seeded_app();

    let (status, body) = post_json(
        &app,
        "/api/signed-url/photos",
        json!({"blob_name": "2024/07/cat.png"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["signed_url"]
        .as_str()
        .unwrap()
        .contains("X-Amz-Expires=3600"));
}

#[tokio::test]
async fn signed_url_route_signs_for_nonexistent_blob() {
    let app = seeded_app();

    let (status, body) = post_json(
        &app,
        "/api/signed-url/photos",
        json!({"blob_name": "not/yet/uploaded.png", "expiration_minutes": 15}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["signed_url"]
        .as_str()
        .unwrap()
        .contains("X-Amz-Expires=900"));
}

#[tokio::test]
async fn cors_preflight_allows_development_origin() {
    let app = seeded_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/buckets")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn openapi_schema_served_in_development() {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/buckets"].is_object());
}
