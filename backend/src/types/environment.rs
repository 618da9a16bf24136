//! Environment configuration for different deployment stages

use std::env;
use std::path::Path;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(self) -> Option<&'static str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// Origins allowed to call the API from a browser.
    ///
    /// `CORS_ALLOWED_ORIGINS` is a comma-separated list; development falls
    /// back to the local frontend dev-server origins.
    #[must_use]
    pub fn cors_allowed_origins(self) -> Vec<String> {
        let configured = env::var("CORS_ALLOWED_ORIGINS").ok().map(|raw| {
            raw.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        });

        match self {
            Self::Production | Self::Staging => configured.unwrap_or_default(),
            Self::Development => configured.unwrap_or_else(|| {
                vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:5174".to_string(),
                    "http://localhost:3000".to_string(),
                ]
            }),
        }
    }

    /// Exports configured credential knobs into the ambient AWS environment.
    ///
    /// `S3_PROFILE` selects the provider identity; `S3_CREDENTIALS_FILE` is
    /// honored only when the file actually exists. With neither set, default
    /// ambient credential resolution applies. Must run before the client is
    /// constructed.
    pub fn export_ambient_credentials(self) {
        if let Ok(profile) = env::var("S3_PROFILE") {
            if !profile.is_empty() {
                env::set_var("AWS_PROFILE", profile);
            }
        }

        if let Ok(path) = env::var("S3_CREDENTIALS_FILE") {
            if Path::new(&path).exists() {
                env::set_var("AWS_SHARED_CREDENTIALS_FILE", path);
            }
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}
