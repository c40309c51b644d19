//! Storage error types.

/// Result type for storage operations.
pub type StorageResult<T, E = StorageError> = Result<T, E>;

/// Errors that can occur while configuring the client or talking to the bucket.
///
/// Every operation of [`StorageClient`](crate::StorageClient) reports failures
/// through this one type, so callers can tell a missing object apart from a
/// transport failure without inspecting messages.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// Configuration is missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Credential material was rejected, locally or by the backend.
    #[error("authentication failed: {message}")]
    Auth {
        message: String,
        #[source]
        source: Option<object_store::Error>,
    },

    /// The object key cannot be used as a path within the bucket.
    #[error("invalid object path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// No object exists at the requested path.
    #[error("object not found: {path}")]
    NotFound { path: String },

    /// Network or transport failure reported by the backend.
    #[error("storage request failed: {0}")]
    Io(#[source] object_store::Error),

    /// The backend or local signer refused to issue or accept a link.
    #[error("link signing failed: {message}")]
    Signing {
        message: String,
        #[source]
        source: Option<object_store::Error>,
    },

    /// A signed link was presented after its expiry.
    #[error("link expired at {expired_at}")]
    LinkExpired { expired_at: jiff::Timestamp },
}

impl StorageError {
    /// Creates a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new authentication error without a backend source.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth {
            message: msg.into(),
            source: None,
        }
    }

    /// Creates a new invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a new signing error without a backend source.
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing {
            message: msg.into(),
            source: None,
        }
    }

    /// Maps a failure from the backend signer.
    ///
    /// A missing object stays [`StorageError::NotFound`]; anything else is a
    /// signing rejection.
    pub(crate) fn from_signer(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => Self::NotFound { path },
            err => Self::Signing {
                message: err.to_string(),
                source: Some(err),
            },
        }
    }

    /// Returns `true` if the requested object does not exist.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Attaches `path` to an [`InvalidPath`](Self::InvalidPath) that lacks one.
    pub(crate) fn with_path(self, path: &str) -> Self {
        match self {
            Self::InvalidPath { path: p, reason } if p.is_empty() => Self::InvalidPath {
                path: path.to_owned(),
                reason,
            },
            err => err,
        }
    }

    /// Whether the caller may retry the operation unchanged.
    ///
    /// Only transport failures qualify, and of those only the ones the backend
    /// did not answer with a definitive rejection.
    ///
    /// The GCS token exchange reports failures as generic errors, so a
    /// credential the backend rejects while fetching a token (revoked key,
    /// deleted account) surfaces as a retryable [`Io`](Self::Io), not as
    /// [`Auth`](Self::Auth). Only answers to object requests map to `Auth`.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Io(err) => !matches!(
                err,
                object_store::Error::AlreadyExists { .. }
                    | object_store::Error::Precondition { .. }
                    | object_store::Error::NotSupported { .. }
                    | object_store::Error::NotImplemented
            ),
            _ => false,
        }
    }
}

impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => Self::NotFound { path },
            object_store::Error::InvalidPath { source } => Self::InvalidPath {
                path: String::new(),
                reason: source.to_string(),
            },
            err @ (object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. }) => Self::Auth {
                message: err.to_string(),
                source: Some(err),
            },
            err => Self::Io(err),
        }
    }
}
