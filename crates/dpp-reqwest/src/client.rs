//! Reqwest-based HTTP client shared by the token and credential endpoints.

use std::sync::Arc;

use reqwest::{Client, Response};

use crate::{Error, ReqwestConfig, Result, TRACING_TARGET};

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP client for the OAuth token endpoint and the
/// credential-issuing endpoint.
///
/// Implements both [`TokenIssuer`] and [`CredentialIssuer`]; clones share
/// one connection pool.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
///
/// use dpp_core::BrokerServices;
/// use dpp_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let client = ReqwestClient::new(ReqwestConfig::default())?;
/// let services = BrokerServices::new(secrets, Arc::new(client.clone()), Arc::new(client));
/// ```
///
/// [`TokenIssuer`]: dpp_core::TokenIssuer
/// [`CredentialIssuer`]: dpp_core::CredentialIssuer
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client with the given configuration.
    pub fn new(config: ReqwestConfig) -> Result<Self> {
        let timeout = config.timeout();

        tracing::debug!(
            target: TRACING_TARGET,
            timeout_ms = timeout.as_millis(),
            user_agent = %config.user_agent,
            "Creating reqwest client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let inner = ReqwestClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }
}

/// Turns a non-success response into [`Error::Status`].
pub(crate) async fn ensure_success(endpoint: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(
        target: TRACING_TARGET,
        endpoint,
        status = status.as_u16(),
        "Endpoint returned a non-success status"
    );

    Err(Error::Status {
        endpoint,
        status,
        body,
    })
}
