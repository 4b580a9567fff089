//! HTTP settings for the token and credential endpoints.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("dpp/", env!("CARGO_PKG_VERSION"));

/// Settings applied to every call made by a [`ReqwestClient`].
///
/// The OAuth token endpoint and the credential-issuing endpoint share one
/// connection pool, so both calls get the same per-request timeout and user
/// agent.
///
/// [`ReqwestClient`]: crate::ReqwestClient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// Seconds to wait for the token or credential endpoint to answer
    #[cfg_attr(
        feature = "config",
        arg(
            long = "http-timeout",
            env = "DPP_HTTP_TIMEOUT",
            default_value_t = 30,
            value_parser = clap::value_parser!(u64).range(1..)
        )
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout_secs: u64,

    /// User-Agent header sent to both endpoints
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "DPP_HTTP_USER_AGENT", default_value = DEFAULT_USER_AGENT)
    )]
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self::new(default_timeout_secs())
    }
}

impl ReqwestConfig {
    /// Settings with the given timeout and the default user agent.
    pub fn new(http_timeout_secs: u64) -> Self {
        Self {
            http_timeout_secs,
            user_agent: default_user_agent(),
        }
    }

    /// Per-request timeout. A zero timeout would fail every call, so it
    /// is raised to one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    /// Replaces the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_identify_dpp() {
        let config = ReqwestConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("dpp/"));
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        assert_eq!(ReqwestConfig::new(0).timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let config: ReqwestConfig = serde_json::from_str(r#"{"http_timeout_secs":5}"#).unwrap();
        assert_eq!(config, ReqwestConfig::new(5));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_cli_rejects_zero_timeout() {
        use clap::Parser;

        #[derive(Parser)]
        struct Cli {
            #[clap(flatten)]
            http: ReqwestConfig,
        }

        let cli = Cli::try_parse_from(["dpp", "--http-timeout", "10"]).unwrap();
        assert_eq!(cli.http.timeout(), Duration::from_secs(10));
        assert!(Cli::try_parse_from(["dpp", "--http-timeout", "0"]).is_err());
    }
}
