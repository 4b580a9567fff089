//! Bearer-token exchange against the credential-issuing endpoint.

use std::time::Instant;

use dpp_core::{CredentialDuration, CredentialIssuer, WarehouseCredential};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

use crate::client::ensure_success;
use crate::{Error, ReqwestClient, TRACING_TARGET};

const ENDPOINT: &str = "credential";
const HAL_JSON: &str = "application/hal+json";

#[derive(Deserialize)]
struct CredentialResponse {
    snowflake: Option<SnowflakeCredential>,
}

#[derive(Deserialize)]
struct SnowflakeCredential {
    username: Option<String>,
    password: Option<String>,
}

impl TryFrom<CredentialResponse> for WarehouseCredential {
    type Error = Error;

    fn try_from(response: CredentialResponse) -> Result<Self, Self::Error> {
        let snowflake = response.snowflake.ok_or(Error::MissingField {
            endpoint: ENDPOINT,
            field: "snowflake",
        })?;
        let username = snowflake.username.ok_or(Error::MissingField {
            endpoint: ENDPOINT,
            field: "snowflake.username",
        })?;
        let password = snowflake.password.ok_or(Error::MissingField {
            endpoint: ENDPOINT,
            field: "snowflake.password",
        })?;

        Ok(WarehouseCredential::new(username, password))
    }
}

impl ReqwestClient {
    async fn request_credential(
        &self,
        token: &str,
        credential_url: &Url,
        duration: CredentialDuration,
    ) -> crate::Result<WarehouseCredential> {
        let response = self
            .http()
            .post(credential_url.clone())
            .header(ACCEPT, HAL_JSON)
            .bearer_auth(token)
            .form(&[("duration", duration.to_string())])
            .send()
            .await?;

        let response = ensure_success(ENDPOINT, response).await?;
        let bytes = response.bytes().await?;
        let body: CredentialResponse = serde_json::from_slice(&bytes)?;
        body.try_into()
    }
}

#[async_trait::async_trait]
impl CredentialIssuer for ReqwestClient {
    async fn exchange(
        &self,
        token: &str,
        credential_url: &Url,
        duration: CredentialDuration,
    ) -> dpp_core::Result<WarehouseCredential> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            credential_url = %credential_url,
            duration_days = duration.days(),
            "Exchanging bearer token for warehouse credentials"
        );

        let credential = self
            .request_credential(token, credential_url, duration)
            .await?;

        tracing::debug!(
            target: TRACING_TARGET,
            username = %credential.username,
            elapsed_ms = started_at.elapsed().as_millis(),
            "Warehouse credentials issued"
        );

        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> crate::Result<WarehouseCredential> {
        serde_json::from_str::<CredentialResponse>(body)?.try_into()
    }

    #[test]
    fn test_nested_credential() {
        let credential = decode(
            r#"{"snowflake":{"username":"alice","password":"pw1"},"_links":{"self":{"href":"/x"}}}"#,
        )
        .unwrap();
        assert_eq!(credential, WarehouseCredential::new("alice", "pw1"));
    }

    #[test]
    fn test_missing_password() {
        let err = decode(r#"{"snowflake":{"username":"alice"}}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                field: "snowflake.password",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_snowflake_object() {
        let err = decode(r#"{"username":"alice","password":"pw1"}"#).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "snowflake", .. }));
    }
}
