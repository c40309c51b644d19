//! Prelude module for convenient imports.

pub use crate::client::{SignedLink, StorageClient, TEMPORARY_LINK_TTL, UploadOutput};
pub use crate::config::{BucketReference, ServiceAccountCredentials, StorageConfig};
pub use crate::error::{StorageError, StorageResult};
pub use crate::signer::HmacSigner;
