//! Router assembly and server startup

use std::sync::Arc;
use std::time::Duration;

use aide::openapi::OpenApi;
use axum::{http::HeaderValue, Extension, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{image_storage::ImageStorage, routes, types::Environment};

/// Assembles the application router with all layers and injected dependencies
pub fn app(environment: Environment, image_storage: Arc<ImageStorage>) -> Router {
    let mut openapi = OpenApi::default();

    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(image_storage))
        .layer(cors_layer(environment))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(environment: Environment, image_storage: Arc<ImageStorage>) -> anyhow::Result<()> {
    let router = app(environment, image_storage);

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8000), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Bucket Viewer API started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

fn cors_layer(environment: Environment) -> CorsLayer {
    let origins: Vec<HeaderValue> = environment
        .cors_allowed_origins()
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
