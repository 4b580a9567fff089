//! Short-lived warehouse credentials.
//!
//! A [`CredentialIssuer`] exchanges a bearer token for a Snowflake username
//! and password. Nothing here is cached: every exchange issues a new pair.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::request::CredentialDuration;

/// Tracing target for credential exchanges.
pub const TRACING_TARGET: &str = "dpp_core::credential";

/// Username and password issued for the warehouse.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseCredential {
    /// Snowflake user name.
    pub username: String,
    /// Snowflake password.
    pub password: String,
}

impl fmt::Debug for WarehouseCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarehouseCredential")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl WarehouseCredential {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Core trait for credential-issuing endpoints.
#[async_trait::async_trait]
pub trait CredentialIssuer: Send + Sync {
    /// Exchanges `token` for credentials valid for `duration`.
    ///
    /// Implementations return an auth error on a non-success response or when
    /// the response lacks a username or password.
    async fn exchange(
        &self,
        token: &str,
        credential_url: &Url,
        duration: CredentialDuration,
    ) -> Result<WarehouseCredential>;
}
