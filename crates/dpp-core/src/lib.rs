#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod broker;
pub mod config;
pub mod credential;
mod error;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;
pub mod options;
pub mod request;
pub mod secret;
pub mod token;

pub use broker::{BrokerServices, OptionsBroker, TRACING_TARGET};
pub use config::{EndpointConfig, EndpointUrls};
pub use credential::{CredentialIssuer, WarehouseCredential};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use options::{ConnectorOptions, ReaderOptions};
pub use request::{CredentialDuration, CredentialRequest, KeySelection};
pub use secret::{AccessKeys, SecretClient, SecretPayload, SecretStore, SecretStoreConnector};
pub use token::{IssuedToken, TokenCache, TokenIssuer, TokenRequest, TokenState};
