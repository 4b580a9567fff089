//! Bearer tokens from the OAuth client-credentials grant.
//!
//! - [`TokenIssuer`]: performs one client-credentials exchange
//! - [`TokenCache`]: holds the current token and refreshes it on read once expired
//!
//! For an HTTP implementation of [`TokenIssuer`], see the `dpp-reqwest` crate.

mod cache;

use std::fmt;

pub use cache::{MAX_TOKEN_LIFETIME, TokenCache, TokenState};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Tracing target for token operations.
pub const TRACING_TARGET: &str = "dpp_core::token";

/// Parameters of a client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRequest {
    /// OAuth token endpoint.
    pub oauth_url: Url,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Audience the token is issued for.
    pub audience: String,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("oauth_url", &self.oauth_url.as_str())
            .field("client_id", &self.client_id)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

/// Token returned by the issuer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Bearer token value.
    pub access_token: String,
    /// Lifetime reported by the issuer, in seconds.
    pub expires_in: u64,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

/// Core trait for token issuers.
#[async_trait::async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Performs a client-credentials exchange.
    ///
    /// Implementations return an auth error on a non-success response.
    async fn issue_token(&self, request: &TokenRequest) -> Result<IssuedToken>;
}
