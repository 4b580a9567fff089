//! In-memory collaborators for testing.
//!
//! These mocks record what they were asked for and return configured values,
//! which is enough to drive [`OptionsBroker`] without any network access.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! dpp-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! [`OptionsBroker`]: crate::OptionsBroker

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

use crate::credential::{CredentialIssuer, WarehouseCredential};
use crate::error::{Error, Result};
use crate::request::CredentialDuration;
use crate::secret::{AccessKeys, SecretPayload, SecretStore, SecretStoreConnector};
use crate::token::{IssuedToken, TokenIssuer, TokenRequest};

#[derive(Default)]
struct SecretState {
    secrets: HashMap<String, SecretPayload>,
    requested: Vec<String>,
    connections: Vec<String>,
}

/// Secret store backed by a map of secret names to payloads.
///
/// Also acts as its own [`SecretStoreConnector`]; connecting records the
/// access key id and returns a handle sharing the same secrets.
#[derive(Clone, Default)]
pub struct MockSecretStore {
    state: Arc<Mutex<SecretState>>,
}

impl MockSecretStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a secret.
    #[must_use]
    pub fn with_secret(self, name: impl Into<String>, payload: SecretPayload) -> Self {
        self.lock().secrets.insert(name.into(), payload);
        self
    }

    /// Secret names fetched so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.lock().requested.clone()
    }

    /// Access key ids used to connect so far, in order.
    pub fn connections(&self) -> Vec<String> {
        self.lock().connections.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SecretState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl SecretStore for MockSecretStore {
    async fn fetch(&self, secret_name: &str) -> Result<SecretPayload> {
        let mut state = self.lock();
        state.requested.push(secret_name.to_owned());
        state.secrets.get(secret_name).cloned().ok_or_else(|| {
            Error::secret_store().with_message(format!(
                "ResourceNotFoundException: secret {secret_name} not found"
            ))
        })
    }
}

impl SecretStoreConnector for MockSecretStore {
    fn connect(&self, keys: AccessKeys) -> Result<Arc<dyn SecretStore>> {
        self.lock().connections.push(keys.access_key_id().to_owned());
        Ok(Arc::new(self.clone()))
    }
}

/// Token issuer returning a fixed token, or a configured failure status.
#[derive(Default)]
pub struct MockTokenIssuer {
    token: String,
    expires_in: u64,
    failure: Mutex<Option<u16>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<TokenRequest>>,
}

impl MockTokenIssuer {
    /// Issues `token` with the given lifetime in seconds.
    pub fn new(token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            token: token.into(),
            expires_in,
            ..Default::default()
        }
    }

    /// Fails every request with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        let issuer = Self::default();
        issuer.fail_with(status);
        issuer
    }

    /// Makes subsequent requests fail with the given HTTP status.
    pub fn fail_with(&self, status: u16) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(status);
    }

    /// Number of token requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Token requests received, in order.
    pub fn requests(&self) -> Vec<TokenRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl TokenIssuer for MockTokenIssuer {
    async fn issue_token(&self, request: &TokenRequest) -> Result<IssuedToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(status) = *self.failure.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(Error::auth().with_message(format!("token endpoint returned HTTP {status}")));
        }

        Ok(IssuedToken {
            access_token: self.token.clone(),
            expires_in: self.expires_in,
        })
    }
}

/// A recorded credential exchange.
#[derive(Debug, Clone)]
pub struct ExchangeCall {
    /// Bearer token presented.
    pub token: String,
    /// Credential-issuing endpoint.
    pub credential_url: Url,
    /// Requested lifetime.
    pub duration: CredentialDuration,
}

/// Credential issuer returning a fixed username and password.
#[derive(Default)]
pub struct MockCredentialIssuer {
    credential: Option<WarehouseCredential>,
    calls: Mutex<Vec<ExchangeCall>>,
}

impl MockCredentialIssuer {
    /// Issues the given username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credential: Some(WarehouseCredential::new(username, password)),
            calls: Mutex::default(),
        }
    }

    /// Rejects every exchange.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Exchanges received, in order.
    pub fn calls(&self) -> Vec<ExchangeCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl CredentialIssuer for MockCredentialIssuer {
    async fn exchange(
        &self,
        token: &str,
        credential_url: &Url,
        duration: CredentialDuration,
    ) -> Result<WarehouseCredential> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ExchangeCall {
                token: token.to_owned(),
                credential_url: credential_url.clone(),
                duration,
            });

        self.credential
            .clone()
            .ok_or_else(|| Error::auth().with_message("credential endpoint returned HTTP 403"))
    }
}
