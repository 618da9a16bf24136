use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use tracing_subscriber::{fmt, EnvFilter};

use bucket_viewer::{
    image_storage::ImageStorage, object_store::S3ObjectStore, server, types::Environment,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON format for staging/production log aggregation, regular format for
    // development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    // Credential resolution happens inside the SDK; the configured overrides
    // must land in the ambient environment before the client is built
    environment.export_ambient_credentials();

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let image_storage = Arc::new(ImageStorage::new(Arc::new(S3ObjectStore::new(s3_client))));

    server::start(environment, image_storage).await
}
