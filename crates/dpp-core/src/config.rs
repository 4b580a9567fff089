//! Endpoint configuration.
//!
//! [`EndpointUrls`] holds the static endpoint URLs, either parsed from CLI
//! arguments and environment variables (with the `config` feature) or loaded
//! from a TOML file with a `[url]` table:
//!
//! ```toml
//! [url]
//! AUDIENCE_URL = "https://api.example.com/"
//! OAUTH_URL = "https://oauth.example.com/oauth/token"
//! BASE_SF_AUTH_URL = "https://snowflake-auth.example.com"
//! ```
//!
//! [`EndpointConfig::resolve`] interpolates the account and client into the
//! credential-issuing URL.

use std::fmt;
use std::path::Path;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Static endpoint URLs used by the client-credentials path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct EndpointUrls {
    /// Audience requested in the client-credentials grant.
    #[cfg_attr(
        feature = "config",
        arg(long = "audience-url", env = "DPP_AUDIENCE_URL")
    )]
    #[serde(rename = "AUDIENCE_URL", default)]
    pub audience_url: Option<String>,

    /// OAuth token endpoint.
    #[cfg_attr(feature = "config", arg(long = "oauth-url", env = "DPP_OAUTH_URL"))]
    #[serde(rename = "OAUTH_URL", default)]
    pub oauth_url: Option<String>,

    /// Base URL of the credential-issuing service.
    #[cfg_attr(
        feature = "config",
        arg(long = "base-credential-url", env = "DPP_BASE_CREDENTIAL_URL")
    )]
    #[serde(rename = "BASE_SF_AUTH_URL", default)]
    pub base_credential_url: Option<String>,
}

#[derive(Deserialize)]
struct ConfigFile {
    url: Option<EndpointUrls>,
}

impl EndpointUrls {
    /// Creates a fully populated set of endpoint URLs.
    pub fn new(
        audience_url: impl Into<String>,
        oauth_url: impl Into<String>,
        base_credential_url: impl Into<String>,
    ) -> Self {
        Self {
            audience_url: Some(audience_url.into()),
            oauth_url: Some(oauth_url.into()),
            base_credential_url: Some(base_credential_url.into()),
        }
    }

    /// Parses endpoint URLs from the `[url]` table of a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| {
            Error::configuration()
                .with_message("failed to parse endpoint configuration")
                .with_source(e)
        })?;

        file.url.ok_or_else(|| {
            Error::configuration().with_message("endpoint configuration has no [url] section")
        })
    }

    /// Reads endpoint URLs from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration()
                .with_message(format!("failed to read {}", path.display()))
                .with_source(e)
        })?;

        Self::from_toml_str(&contents)
    }

    /// Fills unset values from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            audience_url: self.audience_url.or(fallback.audience_url),
            oauth_url: self.oauth_url.or(fallback.oauth_url),
            base_credential_url: self.base_credential_url.or(fallback.base_credential_url),
        }
    }
}

/// Endpoints resolved for one account and client.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Audience requested in the client-credentials grant.
    pub audience_url: String,
    /// OAuth token endpoint.
    pub oauth_url: Url,
    /// Per-account, per-client credential-issuing endpoint.
    pub credential_url: Url,
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("audience_url", &self.audience_url)
            .field("oauth_url", &self.oauth_url.as_str())
            .field("credential_url", &self.credential_url.as_str())
            .finish()
    }
}

impl EndpointConfig {
    /// Resolves the endpoints for `account_name` and `client_id`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing or malformed key.
    pub fn resolve(urls: &EndpointUrls, account_name: &str, client_id: &str) -> Result<Self> {
        let audience_url = required(urls.audience_url.as_deref(), "AUDIENCE_URL")?;
        let oauth_url = required(urls.oauth_url.as_deref(), "OAUTH_URL")?;
        let base_url = required(urls.base_credential_url.as_deref(), "BASE_SF_AUTH_URL")?;

        let credential_url = format!(
            "{}/v0/accounts/{account_name}/users/{client_id}@clients/credentials",
            base_url.trim_end_matches('/')
        );

        Ok(Self {
            audience_url: audience_url.to_owned(),
            oauth_url: parse_url(oauth_url, "OAUTH_URL")?,
            credential_url: parse_url(&credential_url, "BASE_SF_AUTH_URL")?,
        })
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::configuration().with_message(format!("missing required key {key}"))),
    }
}

fn parse_url(value: &str, key: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| {
        Error::configuration()
            .with_message(format!("{key} is not a valid URL"))
            .with_source(e)
    })
}
