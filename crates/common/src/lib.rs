//! Lectern Common Library
//!
//! Shared code for the Lectern portfolio backend including:
//! - Database models and repository pattern
//! - Lazily-initialized shared connection handle
//! - Chunked blob storage for uploaded files
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod blobstore;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use blobstore::BlobStore;
pub use config::AppConfig;
pub use db::{Db, Repository};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default chunk size for the blob store (255 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 255 * 1024;
