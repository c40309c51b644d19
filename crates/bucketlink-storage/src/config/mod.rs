//! Bucket, credential and client configuration.

mod credentials;
mod storage_config;

pub use credentials::ServiceAccountCredentials;
pub use storage_config::{BucketReference, StorageConfig};
