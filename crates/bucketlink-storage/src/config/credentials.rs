//! Service account credentials.
//!
//! The four values here are the ones found in a service account key file.
//! They are supplied individually (environment, secret store) rather than as
//! a key file path.

use std::fmt;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

const PEM_HEADER: &str = "-----BEGIN";
const PEM_FOOTER: &str = "PRIVATE KEY-----";

/// Service account identity used to authenticate against the bucket.
///
/// The private key is never serialized and is redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ServiceAccountCredentials {
    /// Numeric client identifier of the service account.
    #[cfg_attr(feature = "config", arg(long = "gcs-client-id", env = "GCS_CLIENT_ID"))]
    pub client_id: String,

    /// Service account email (`*.iam.gserviceaccount.com`).
    #[cfg_attr(
        feature = "config",
        arg(long = "gcs-client-email", env = "GCS_CLIENT_EMAIL")
    )]
    pub client_email: String,

    /// PEM-encoded PKCS#8 private key.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "gcs-private-key",
            env = "GCS_PRIVATE_KEY",
            hide_env_values = true,
            allow_hyphen_values = true
        )
    )]
    #[serde(skip_serializing)]
    pub private_key: String,

    /// Identifier of the private key.
    #[cfg_attr(
        feature = "config",
        arg(long = "gcs-private-key-id", env = "GCS_PRIVATE_KEY_ID")
    )]
    pub private_key_id: String,
}

impl ServiceAccountCredentials {
    /// Creates new service account credentials.
    pub fn new(
        client_id: impl Into<String>,
        client_email: impl Into<String>,
        private_key: impl Into<String>,
        private_key_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_email: client_email.into(),
            private_key: private_key.into(),
            private_key_id: private_key_id.into(),
        }
    }

    /// Returns the private key with escaped `\n` sequences expanded.
    ///
    /// Keys passed through environment variables usually arrive on one line.
    pub fn private_key_pem(&self) -> String {
        self.private_key.replace("\\n", "\n")
    }

    /// Returns a masked version of the client email for logging.
    ///
    /// Keeps the first 4 characters of the local part and the domain.
    pub fn client_email_masked(&self) -> String {
        match self.client_email.split_once('@') {
            Some((local, domain)) if local.chars().count() > 4 => {
                let prefix: String = local.chars().take(4).collect();
                format!("{prefix}***@{domain}")
            }
            Some((_, domain)) => format!("***@{domain}"),
            None => "*".repeat(self.client_email.len()),
        }
    }

    /// Checks that every field is present and the key looks like PEM.
    pub fn validate(&self) -> StorageResult<()> {
        let required = [
            ("client id", &self.client_id),
            ("client email", &self.client_email),
            ("private key", &self.private_key),
            ("private key id", &self.private_key_id),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(StorageError::config(format!("{name} cannot be empty")));
            }
        }

        if !self.client_email.contains('@') {
            return Err(StorageError::config(
                "client email must be a service account address",
            ));
        }

        let pem = self.private_key_pem();
        if !pem.contains(PEM_HEADER) || !pem.contains(PEM_FOOTER) {
            return Err(StorageError::auth("private key is not PEM encoded"));
        }

        Ok(())
    }

    /// Renders the credentials in the service account key file layout.
    pub(crate) fn to_key_json(&self, project_id: &str, base_url: Option<&str>) -> String {
        let mut key = serde_json::json!({
            "type": "service_account",
            "project_id": project_id,
            "client_id": self.client_id,
            "client_email": self.client_email,
            "private_key": self.private_key_pem(),
            "private_key_id": self.private_key_id,
        });

        if let Some(base_url) = base_url {
            key["gcs_base_url"] = serde_json::Value::from(base_url);
        }

        key.to_string()
    }
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_id", &self.client_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"[redacted]")
            .field("private_key_id", &self.private_key_id)
            .finish()
    }
}
