//! Result type for [`StorageClient::temporary_link`](super::StorageClient::temporary_link).

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use url::Url;

/// A time-limited URL granting anonymous read access to one object.
///
/// Expiry is enforced by whoever serves the URL; the timestamps here are
/// informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedLink {
    url: Url,
    issued_at: Timestamp,
    expires_at: Timestamp,
}

impl SignedLink {
    pub(crate) fn new(url: Url, issued_at: Timestamp, expires_at: Timestamp) -> Self {
        Self {
            url,
            issued_at,
            expires_at,
        }
    }

    /// Returns the signed URL.
    #[inline]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the signed URL as a string.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// When the link was issued.
    #[inline]
    pub fn issued_at(&self) -> Timestamp {
        self.issued_at
    }

    /// When the link stops granting access.
    #[inline]
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Whether the link has expired as of `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    /// Consumes the link and returns the URL.
    pub fn into_url(self) -> Url {
        self.url
    }
}

impl fmt::Display for SignedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl From<SignedLink> for String {
    fn from(link: SignedLink) -> Self {
        link.url.into()
    }
}
