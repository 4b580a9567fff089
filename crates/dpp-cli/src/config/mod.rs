//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── command: Command         # connector | reader, with request arguments
//! ├── endpoints: EndpointUrls  # audience, OAuth and credential URLs
//! ├── http: ReqwestConfig      # timeout, user agent
//! └── aws: AwsConfig           # Secrets Manager region and endpoint
//! ```
//!
//! Endpoint URLs given as arguments or environment variables take precedence
//! over those read from `--config`.
//!
//! # Example
//!
//! ```bash
//! dpp --config dpp.toml reader --database db1 --schema s1 \
//!     --role r1 --client-id c1 --client-secret s1
//! ```

mod request;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dpp_aws::{AwsConfig, SecretsManagerConnector};
use dpp_core::{BrokerServices, EndpointUrls, OptionsBroker};
use dpp_reqwest::{ReqwestClient, ReqwestConfig};
pub use request::RequestArgs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Parser)]
#[command(name = "dpp")]
#[command(about = "Snowflake connection options from AWS keys or OAuth client credentials")]
#[command(version)]
pub struct Cli {
    /// Options shape to print.
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with a [url] table of endpoint URLs
    #[arg(long, env = "DPP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Seconds before reported expiry at which bearer tokens are refreshed
    #[arg(long, env = "DPP_TOKEN_REFRESH_MARGIN", default_value = "0")]
    pub token_refresh_margin: u64,

    /// Endpoint URLs for the client-credentials path.
    #[clap(flatten)]
    pub endpoints: EndpointUrls,

    /// HTTP client configuration.
    #[clap(flatten)]
    pub http: ReqwestConfig,

    /// Secrets Manager configuration.
    #[clap(flatten)]
    pub aws: AwsConfig,
}

/// Options shapes the CLI can print.
#[derive(Clone, Subcommand)]
pub enum Command {
    /// Print options for the native Snowflake connector
    Connector(RequestArgs),
    /// Print options for the Spark Snowflake reader
    Reader(RequestArgs),
}

impl Command {
    /// Returns the request arguments of either subcommand.
    pub fn args(&self) -> &RequestArgs {
        match self {
            Self::Connector(args) | Self::Reader(args) => args,
        }
    }
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing on stderr with environment-based filtering.
    ///
    /// The level is read from `RUST_LOG` and defaults to `info`.
    pub fn init_tracing() -> anyhow::Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .map_err(|e| anyhow::anyhow!("Failed to create env filter: {e}"))?;

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .with(env_filter)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
    }

    /// Resolves endpoint URLs, filling gaps from the `--config` file.
    pub fn endpoint_urls(&self) -> anyhow::Result<EndpointUrls> {
        let Some(path) = &self.config else {
            return Ok(self.endpoints.clone());
        };

        let file = EndpointUrls::from_file(path).with_context(|| {
            format!("failed to load endpoint configuration from {}", path.display())
        })?;
        Ok(self.endpoints.clone().or(file))
    }

    /// Builds the broker with the reqwest and Secrets Manager collaborators.
    pub fn create_broker(&self) -> anyhow::Result<OptionsBroker> {
        let endpoints = self.endpoint_urls()?;
        let client =
            ReqwestClient::new(self.http.clone()).context("failed to create HTTP client")?;
        let client = Arc::new(client);
        let secrets = Arc::new(SecretsManagerConnector::new(self.aws.clone()));

        let services = BrokerServices::new(secrets, client.clone(), client);
        Ok(OptionsBroker::new(endpoints, services)
            .with_token_refresh_margin(Duration::from_secs(self.token_refresh_margin)))
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            dotenv = cfg!(feature = "dotenv"),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            config = ?self.config,
            http_timeout_secs = self.http.http_timeout_secs,
            aws_region = %self.aws.region,
            aws_endpoint_url = self.aws.endpoint_url.as_deref(),
            token_refresh_margin_secs = self.token_refresh_margin,
            "Configuration"
        );
    }
}
