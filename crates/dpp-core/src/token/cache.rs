//! Lazily refreshed bearer token.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use super::{TRACING_TARGET, TokenIssuer, TokenRequest};
use crate::error::{Error, Result};

/// Upper bound on the lifetime honored for a single token.
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Observable state of a [`TokenCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No token has been issued yet.
    Absent,
    /// The held token may be used.
    Valid,
    /// The held token reached its expiry instant.
    Expired,
}

struct BearerToken {
    value: String,
    expires_at: Instant,
}

impl BearerToken {
    fn is_usable(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Bearer token cache for a single client.
///
/// The token is fetched on first use and again whenever it has expired at
/// read time; there is no background refresh. A failed fetch leaves the
/// previous state untouched. Lifetimes longer than [`MAX_TOKEN_LIFETIME`]
/// are capped.
///
/// The cache is owned by one caller and needs `&mut self` to refresh, so it
/// is never shared between concurrent requests.
///
/// # Examples
///
/// ```rust,ignore
/// let mut cache = TokenCache::new(issuer, request);
/// let token = cache.get_token().await?;
/// ```
pub struct TokenCache {
    issuer: Arc<dyn TokenIssuer>,
    request: TokenRequest,
    token: Option<BearerToken>,
    refresh_margin: Duration,
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCache")
            .field("request", &self.request)
            .field("state", &self.state())
            .field("refresh_margin", &self.refresh_margin)
            .finish_non_exhaustive()
    }
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new(issuer: Arc<dyn TokenIssuer>, request: TokenRequest) -> Self {
        Self {
            issuer,
            request,
            token: None,
            refresh_margin: Duration::ZERO,
        }
    }

    /// Treats tokens as expired `margin` before the issuer-reported expiry.
    #[must_use]
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Returns the current state.
    pub fn state(&self) -> TokenState {
        match &self.token {
            None => TokenState::Absent,
            Some(token) if token.is_usable(Instant::now()) => TokenState::Valid,
            Some(_) => TokenState::Expired,
        }
    }

    /// Returns a usable bearer token, fetching a new one if needed.
    ///
    /// # Errors
    ///
    /// Returns the issuer's error unchanged; the cache keeps its prior state.
    pub async fn get_token(&mut self) -> Result<&str> {
        let state = self.state();
        if state != TokenState::Valid {
            self.refresh(state).await?;
        }

        self.token
            .as_ref()
            .map(|token| token.value.as_str())
            .ok_or_else(|| Error::auth().with_message("no bearer token available"))
    }

    async fn refresh(&mut self, state: TokenState) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            client_id = %self.request.client_id,
            state = ?state,
            "Requesting bearer token"
        );

        let issued = match self.issuer.issue_token(&self.request).await {
            Ok(issued) => issued,
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    client_id = %self.request.client_id,
                    error = %error,
                    "Bearer token request failed"
                );
                return Err(error);
            }
        };

        let lifetime = Duration::from_secs(issued.expires_in)
            .min(MAX_TOKEN_LIFETIME)
            .saturating_sub(self.refresh_margin);
        let expires_at = Instant::now().checked_add(lifetime).ok_or_else(|| {
            Error::auth().with_message(format!(
                "token lifetime of {}s is out of range",
                issued.expires_in
            ))
        })?;

        self.token = Some(BearerToken {
            value: issued.access_token,
            expires_at,
        });

        tracing::debug!(
            target: TRACING_TARGET,
            client_id = %self.request.client_id,
            expires_in = issued.expires_in,
            "Bearer token refreshed"
        );

        Ok(())
    }
}
