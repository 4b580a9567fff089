#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;

pub use crate::client::{SecretsManagerClient, SecretsManagerConnector};
pub use crate::config::{AwsConfig, DEFAULT_REGION};

/// Tracing target for Secrets Manager operations.
pub const TRACING_TARGET: &str = "dpp_aws";
