//! Secrets Manager client configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Region every Snowflake key secret is stored in.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Configuration for the Secrets Manager connector.
///
/// Credentials are not part of the configuration: each connection is
/// authenticated with the access keys supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct AwsConfig {
    /// AWS region of the secret store
    #[cfg_attr(
        feature = "config",
        arg(long = "aws-region", env = "DPP_AWS_REGION", default_value = DEFAULT_REGION)
    )]
    #[serde(default = "default_region")]
    pub region: String,

    /// Override for the Secrets Manager endpoint
    #[cfg_attr(
        feature = "config",
        arg(long = "aws-endpoint-url", env = "DPP_AWS_ENDPOINT_URL")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_owned()
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
        }
    }
}

impl AwsConfig {
    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the endpoint override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region() {
        let config = AwsConfig::default();
        assert_eq!(config.region, "eu-west-1");
        assert!(config.endpoint_url.is_none());
    }

    #[test]
    fn test_deserialize_fills_default_region() {
        let config: AwsConfig =
            serde_json::from_str(r#"{"endpoint_url":"http://localhost:4566"}"#).unwrap();
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }
}
