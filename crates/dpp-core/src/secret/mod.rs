//! Managed secret store access.
//!
//! This module provides the secret store seam:
//! - [`SecretStore`]: fetches a named secret's raw payload
//! - [`SecretStoreConnector`]: authenticates a [`SecretStore`] from [`AccessKeys`]
//! - [`SecretClient`]: wrapper that extracts key material and logs failures
//!
//! For an AWS Secrets Manager implementation, see the `dpp-aws` crate.

mod client;
mod payload;

use std::fmt;
use std::sync::Arc;

pub use client::SecretClient;
pub use payload::{SECRET_FIELD, SecretPayload};

use crate::error::{Error, Result};

/// Tracing target for secret store operations.
pub const TRACING_TARGET: &str = "dpp_core::secret";

/// Long-lived key pair used to authenticate against the secret store.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKeys {
    access_key_id: String,
    secret_access_key: String,
}

impl fmt::Debug for AccessKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKeys")
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

impl AccessKeys {
    /// Creates a key pair.
    ///
    /// # Errors
    ///
    /// Returns a credential error if either half is absent or empty; no
    /// connection is ever attempted with partial credentials.
    pub fn new(
        access_key_id: Option<impl Into<String>>,
        secret_access_key: Option<impl Into<String>>,
    ) -> Result<Self> {
        let access_key_id = access_key_id.map(Into::into).filter(|v| !v.is_empty());
        let secret_access_key = secret_access_key.map(Into::into).filter(|v| !v.is_empty());

        match (access_key_id, secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Ok(Self {
                access_key_id,
                secret_access_key,
            }),
            _ => {
                tracing::error!(
                    target: TRACING_TARGET,
                    "Access key and secret are required"
                );
                Err(Error::credential().with_message("Access key and secret are required"))
            }
        }
    }

    /// Returns the access key id.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns the secret access key.
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

/// Core trait for secret store implementations.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetches the raw payload of the named secret.
    async fn fetch(&self, secret_name: &str) -> Result<SecretPayload>;
}

/// Creates authenticated [`SecretStore`] handles from access keys.
pub trait SecretStoreConnector: Send + Sync {
    /// Authenticates against the secret store with `keys`.
    fn connect(&self, keys: AccessKeys) -> Result<Arc<dyn SecretStore>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_access_keys() {
        let keys = AccessKeys::new(Some("AKIA"), Some("secret")).unwrap();
        assert_eq!(keys.access_key_id(), "AKIA");
        assert_eq!(keys.secret_access_key(), "secret");
        assert!(!format!("{keys:?}").contains("secret\""));
    }

    #[test]
    fn test_missing_access_keys() {
        let cases = [
            AccessKeys::new(None::<String>, Some("secret")),
            AccessKeys::new(Some("AKIA"), None::<String>),
            AccessKeys::new(Some(""), Some("secret")),
            AccessKeys::new(None::<String>, None::<String>),
        ];

        for result in cases {
            assert_eq!(result.unwrap_err().kind, ErrorKind::Credential);
        }
    }
}
