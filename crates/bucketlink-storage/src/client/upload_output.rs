//! Result type for [`StorageClient::upload`](super::StorageClient::upload).

use serde::{Deserialize, Serialize};

/// Result of a successful upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutput {
    /// Entity tag of the stored object, if the backend provides one.
    pub e_tag: Option<String>,
    /// Generation or version of the stored object, if the backend provides one.
    pub version: Option<String>,
}

impl From<object_store::PutResult> for UploadOutput {
    fn from(r: object_store::PutResult) -> Self {
        Self {
            e_tag: r.e_tag,
            version: r.version,
        }
    }
}
