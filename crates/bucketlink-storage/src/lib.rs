#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for storage client operations.
///
/// Use this target for logging client initialization and the upload,
/// download, link and delete operations.
pub const TRACING_TARGET_CLIENT: &str = "bucketlink_storage::client";

/// Tracing target for link signing and verification.
pub const TRACING_TARGET_SIGNER: &str = "bucketlink_storage::signer";

mod client;
mod config;
mod error;
mod signer;

#[doc(hidden)]
pub mod prelude;

pub use client::{SignedLink, StorageClient, TEMPORARY_LINK_TTL, UploadOutput};
pub use config::{BucketReference, ServiceAccountCredentials, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use signer::HmacSigner;
