//! Secret client wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{AccessKeys, SecretStore, SecretStoreConnector, TRACING_TARGET};
use crate::error::Result;

/// Authenticated secret store handle.
///
/// Wraps any [`SecretStore`] with structured logging and key material
/// extraction. Failures are logged and returned unchanged; nothing is retried.
#[derive(Clone)]
pub struct SecretClient {
    inner: Arc<dyn SecretStore>,
}

impl fmt::Debug for SecretClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretClient").finish_non_exhaustive()
    }
}

impl SecretClient {
    /// Authenticates through `connector` with the given key pair.
    pub fn connect(connector: &dyn SecretStoreConnector, keys: AccessKeys) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            access_key_id = keys.access_key_id(),
            "Connecting to secret store"
        );

        let inner = connector.connect(keys)?;
        Ok(Self { inner })
    }

    /// Wraps an already authenticated store.
    pub fn new<S>(store: S) -> Self
    where
        S: SecretStore + 'static,
    {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Fetches the named secret and returns its key material.
    pub async fn get(&self, secret_name: &str) -> Result<String> {
        let started_at = Instant::now();

        let result = match self.inner.fetch(secret_name).await {
            Ok(payload) => payload.into_key_material(),
            Err(error) => Err(error),
        };

        match &result {
            Ok(_) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    secret_name,
                    elapsed_ms = started_at.elapsed().as_millis(),
                    "Fetched secret"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    secret_name,
                    error = %error,
                    elapsed_ms = started_at.elapsed().as_millis(),
                    "Secret fetch failed"
                );
            }
        }

        result
    }
}
