//! Bucket Viewer API service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Image browsing facade over the object store
pub mod image_storage;

/// Object storage capability interface and implementations
pub mod object_store;

/// Route handlers
pub mod routes;

/// Router assembly and server startup
pub mod server;

/// Environment configuration and error handling
pub mod types;
