//! HMAC-signed links for stores without native URL signing.
//!
//! [`HmacSigner`] implements [`Signer`] so the in-memory store (and any other
//! store that cannot sign on its own) can still hand out time-limited links.
//! A link has the shape `{base_url}/{bucket}/{key}?expires={unix}&signature={hex}`,
//! where the signature is HMAC-SHA256 over `{METHOD}\n{url path}\n{expires}`.
//! Whoever serves the links checks them with [`HmacSigner::verify`].

use std::fmt;
use std::time::Duration;

use hmac::{Hmac, Mac};
use http::Method;
use jiff::Timestamp;
use object_store::path::Path;
use object_store::signer::Signer;
use sha2::Sha256;
use url::Url;

use crate::TRACING_TARGET_SIGNER;
use crate::error::{StorageError, StorageResult};

type HmacSha256 = Hmac<Sha256>;

const EXPIRES_PARAM: &str = "expires";
const SIGNATURE_PARAM: &str = "signature";
const STORE_NAME: &str = "HmacSigner";

/// Issues and verifies HMAC-SHA256 signed links for one bucket.
#[derive(Clone)]
pub struct HmacSigner {
    base_url: Url,
    bucket: String,
    secret: Vec<u8>,
}

impl HmacSigner {
    /// Creates a signer issuing links under `base_url` for `bucket`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Config`] if the base URL cannot carry a path,
    /// the bucket name is empty, or the secret is empty.
    pub fn new(
        base_url: Url,
        bucket: impl Into<String>,
        secret: impl AsRef<[u8]>,
    ) -> StorageResult<Self> {
        let bucket = bucket.into();

        if base_url.cannot_be_a_base() {
            return Err(StorageError::config(format!(
                "link base url '{base_url}' cannot carry a path"
            )));
        }

        if bucket.is_empty() {
            return Err(StorageError::config("bucket name cannot be empty"));
        }

        if secret.as_ref().is_empty() {
            return Err(StorageError::config("link signing secret cannot be empty"));
        }

        Ok(Self {
            base_url,
            bucket,
            secret: secret.as_ref().to_vec(),
        })
    }

    /// Returns the base URL links are issued under.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issues a link for `path` that expires at `expires_at`.
    pub fn sign_at(
        &self,
        method: &Method,
        path: &Path,
        expires_at: Timestamp,
    ) -> StorageResult<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|_| StorageError::signing("link base url cannot carry a path"))?
            .pop_if_empty()
            .push(&self.bucket)
            .extend(path.as_ref().split('/'));

        let expires = expires_at.as_second();
        let signature = hex::encode(self.mac(method, url.path(), expires).finalize().into_bytes());

        url.query_pairs_mut()
            .append_pair(EXPIRES_PARAM, &expires.to_string())
            .append_pair(SIGNATURE_PARAM, &signature);

        tracing::debug!(
            target: TRACING_TARGET_SIGNER,
            path = %path,
            method = %method,
            expires_at = %expires_at,
            "Issued signed link"
        );

        Ok(url)
    }

    /// Checks a link against the current time and returns the object path it
    /// grants access to.
    pub fn verify(&self, method: &Method, url: &Url) -> StorageResult<Path> {
        self.verify_at(method, url, Timestamp::now())
    }

    /// Checks a link as of `now` and returns the object path it grants access to.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Signing`] if the link was not issued by this
    /// signer or was altered, and [`StorageError::LinkExpired`] once `now` is
    /// past its expiry.
    pub fn verify_at(&self, method: &Method, url: &Url, now: Timestamp) -> StorageResult<Path> {
        if url.origin() != self.base_url.origin() {
            return Err(StorageError::signing("link was not issued by this signer"));
        }

        let mut expires = None;
        let mut signature = None;
        for (name, value) in url.query_pairs() {
            match name.as_ref() {
                EXPIRES_PARAM => expires = Some(value.into_owned()),
                SIGNATURE_PARAM => signature = Some(value.into_owned()),
                _ => {}
            }
        }

        let expires: i64 = expires
            .ok_or_else(|| StorageError::signing("link has no expiry"))?
            .parse()
            .map_err(|_| StorageError::signing("link expiry is not a unix timestamp"))?;
        let signature = signature
            .ok_or_else(|| StorageError::signing("link has no signature"))
            .and_then(|sig| {
                hex::decode(sig).map_err(|_| StorageError::signing("link signature is not hex"))
            })?;

        self.mac(method, url.path(), expires)
            .verify_slice(&signature)
            .map_err(|_| {
                tracing::warn!(
                    target: TRACING_TARGET_SIGNER,
                    path = url.path(),
                    "Rejected link with a bad signature"
                );
                StorageError::signing("link signature does not match")
            })?;

        let expired_at = Timestamp::from_second(expires)
            .map_err(|e| StorageError::signing(format!("link expiry out of range: {e}")))?;
        if now > expired_at {
            return Err(StorageError::LinkExpired { expired_at });
        }

        let prefix = self.bucket_prefix()?;
        let key = url
            .path()
            .strip_prefix(prefix.path())
            .ok_or_else(|| StorageError::signing("link does not point into the bucket"))?;

        Path::from_url_path(key)
            .map_err(|e| StorageError::signing(format!("link carries an invalid path: {e}")))
    }

    fn bucket_prefix(&self) -> StorageResult<Url> {
        let mut prefix = self.base_url.clone();
        prefix
            .path_segments_mut()
            .map_err(|_| StorageError::signing("link base url cannot carry a path"))?
            .pop_if_empty()
            .push(&self.bucket)
            .push("");
        Ok(prefix)
    }

    fn mac(&self, method: &Method, url_path: &str, expires: i64) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(method.as_str().as_bytes());
        mac.update(b"\n");
        mac.update(url_path.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        mac
    }
}

/// Returns `now + ttl`, rejecting overflow.
pub(crate) fn expiry_after(now: Timestamp, ttl: Duration) -> StorageResult<Timestamp> {
    i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|secs| now.as_second().checked_add(secs))
        .and_then(|secs| Timestamp::from_second(secs).ok())
        .ok_or_else(|| StorageError::signing(format!("link lifetime {ttl:?} is out of range")))
}

#[async_trait::async_trait]
impl Signer for HmacSigner {
    async fn signed_url(
        &self,
        method: Method,
        path: &Path,
        expires_in: Duration,
    ) -> object_store::Result<Url> {
        expiry_after(Timestamp::now(), expires_in)
            .and_then(|expires_at| self.sign_at(&method, path, expires_at))
            .map_err(|err| object_store::Error::Generic {
                store: STORE_NAME,
                source: Box::new(err),
            })
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("base_url", &self.base_url.as_str())
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}
