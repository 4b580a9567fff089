#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod credentials;
mod error;
mod oauth;

pub use crate::client::ReqwestClient;
pub use crate::config::{DEFAULT_USER_AGENT, ReqwestConfig};
pub use crate::error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "dpp_reqwest";
