//! Client-credentials grant against the OAuth token endpoint.

use std::time::Instant;

use dpp_core::{IssuedToken, TokenIssuer, TokenRequest};
use serde::Serialize;

use crate::client::ensure_success;
use crate::{Error, ReqwestClient, TRACING_TARGET};

const ENDPOINT: &str = "token";

/// JSON body of a client-credentials grant.
#[derive(Serialize)]
struct GrantBody<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
}

impl<'a> From<&'a TokenRequest> for GrantBody<'a> {
    fn from(request: &'a TokenRequest) -> Self {
        Self {
            grant_type: "client_credentials",
            client_id: &request.client_id,
            client_secret: &request.client_secret,
            audience: &request.audience,
        }
    }
}

impl ReqwestClient {
    async fn request_token(&self, request: &TokenRequest) -> crate::Result<IssuedToken> {
        let response = self
            .http()
            .post(request.oauth_url.clone())
            .json(&GrantBody::from(request))
            .send()
            .await?;

        let response = ensure_success(ENDPOINT, response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Error::from)
    }
}

#[async_trait::async_trait]
impl TokenIssuer for ReqwestClient {
    async fn issue_token(&self, request: &TokenRequest) -> dpp_core::Result<IssuedToken> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            oauth_url = %request.oauth_url,
            client_id = %request.client_id,
            "Requesting bearer token"
        );

        let token = self.request_token(request).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            expires_in = token.expires_in,
            elapsed_ms = started_at.elapsed().as_millis(),
            "Bearer token issued"
        );

        Ok(token)
    }
}
