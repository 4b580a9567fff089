//! Secrets Manager implementation of the secret store seam.

use std::sync::Arc;
use std::time::Instant;

use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::config::{BehaviorVersion, Builder, Credentials, Region};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use dpp_core::{AccessKeys, Error, Result, SecretPayload, SecretStore, SecretStoreConnector};

use crate::{AwsConfig, TRACING_TARGET};

/// Name reported by the static credentials provider.
const PROVIDER_NAME: &str = "DppAccessKeys";

/// Connects to Secrets Manager with caller-supplied access keys.
///
/// Only the keys passed to [`connect`] are used; ambient credentials from
/// the environment or instance profile are never consulted.
///
/// [`connect`]: SecretStoreConnector::connect
#[derive(Debug, Clone, Default)]
pub struct SecretsManagerConnector {
    config: AwsConfig,
}

impl SecretsManagerConnector {
    /// Creates a connector with the given configuration.
    pub fn new(config: AwsConfig) -> Self {
        Self { config }
    }

    /// Gets the connector configuration.
    pub fn config(&self) -> &AwsConfig {
        &self.config
    }

    fn client_config(&self, keys: &AccessKeys) -> aws_sdk_secretsmanager::Config {
        let credentials = Credentials::new(
            keys.access_key_id(),
            keys.secret_access_key(),
            None,
            None,
            PROVIDER_NAME,
        );

        let mut builder = Builder::new()
            .credentials_provider(credentials)
            .region(Region::new(self.config.region.clone()))
            .behavior_version(BehaviorVersion::latest());

        if let Some(endpoint_url) = &self.config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        builder.build()
    }
}

impl SecretStoreConnector for SecretsManagerConnector {
    fn connect(&self, keys: AccessKeys) -> Result<Arc<dyn SecretStore>> {
        tracing::debug!(
            target: TRACING_TARGET,
            region = %self.config.region,
            endpoint_url = self.config.endpoint_url.as_deref(),
            access_key_id = keys.access_key_id(),
            "Creating Secrets Manager client"
        );

        let client = Client::from_conf(self.client_config(&keys));
        Ok(Arc::new(SecretsManagerClient { client }))
    }
}

/// Authenticated Secrets Manager handle.
#[derive(Debug, Clone)]
pub struct SecretsManagerClient {
    client: Client,
}

#[async_trait::async_trait]
impl SecretStore for SecretsManagerClient {
    async fn fetch(&self, secret_name: &str) -> Result<SecretPayload> {
        let started_at = Instant::now();

        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_name)
            .send()
            .await
            .map_err(|err| {
                Error::secret_store()
                    .with_message(format!(
                        "Failed to read secret {secret_name}: {}",
                        DisplayErrorContext(&err)
                    ))
                    .with_source(err)
            })?;

        tracing::debug!(
            target: TRACING_TARGET,
            secret_name,
            version_id = output.version_id(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Read secret value"
        );

        if let Some(text) = output.secret_string() {
            return Ok(SecretPayload::Text(text.to_owned()));
        }
        if let Some(binary) = output.secret_binary() {
            return Ok(SecretPayload::Binary(binary.clone().into_inner()));
        }

        Err(Error::secret_store().with_message(format!("Secret {secret_name} has no value")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> AccessKeys {
        AccessKeys::new(Some("AKIAEXAMPLE"), Some("secret")).unwrap()
    }

    #[test]
    fn test_client_config_uses_supplied_region() {
        let connector = SecretsManagerConnector::new(AwsConfig::default().with_region("us-east-2"));
        let config = connector.client_config(&keys());
        let region = config.region().map(ToString::to_string);
        assert_eq!(region.as_deref(), Some("us-east-2"));
    }

    #[tokio::test]
    async fn test_connect_accepts_complete_keys() {
        let connector = SecretsManagerConnector::default();
        assert!(connector.connect(keys()).is_ok());
    }
}
