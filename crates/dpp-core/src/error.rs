//! Structured error handling for credential brokering.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while brokering credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Neither credential branch was fully supplied, or an argument is out of range.
    InvalidArguments,
    /// Static endpoint configuration is missing or malformed.
    Configuration,
    /// Secret store access keys are missing.
    Credential,
    /// The managed secret store failed or rejected the request.
    SecretStore,
    /// The token issuer or the credential-issuing endpoint failed.
    Auth,
    /// The stored secret could not be decoded into key material.
    KeyMaterial,
}

/// Structured error type with classification and an optional source.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a new invalid arguments error.
    pub fn invalid_arguments() -> Self {
        Self::new(ErrorKind::InvalidArguments)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new credential error.
    pub fn credential() -> Self {
        Self::new(ErrorKind::Credential)
    }

    /// Creates a new secret store error.
    pub fn secret_store() -> Self {
        Self::new(ErrorKind::SecretStore)
    }

    /// Creates a new authentication error.
    pub fn auth() -> Self {
        Self::new(ErrorKind::Auth)
    }

    /// Creates a new key material error.
    pub fn key_material() -> Self {
        Self::new(ErrorKind::KeyMaterial)
    }
}
