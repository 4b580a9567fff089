//! Credential requests and key selection.
//!
//! A [`CredentialRequest`] carries everything a caller may supply. Exactly one
//! of two credential branches must be complete:
//!
//! - static keys: `username`, `access_key_id` and `secret_key`
//! - client credentials: `role`, `client_id` and `client_secret`
//!
//! [`KeySelection::select`] decides which branch applies. The static-key branch
//! wins when both are complete.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tracing target for key selection.
pub const TRACING_TARGET: &str = "dpp_core::request";

/// Tracing target used for deprecation notices.
pub const DEPRECATION_TARGET: &str = "dpp_core::deprecation";

/// Snowflake account used when the caller does not name one.
pub const DEFAULT_ACCOUNT_NAME: &str = "vistaprint";

/// Prefix of the secret holding a user's private key.
pub const SECRET_NAME_PREFIX: &str = "snowflake/";

const STATIC_KEYS_DEPRECATION: &str = "Support for using AWS keys to get credentials to \
    authenticate with snowflake will soon be deprecated. Please switch to using Auth0 Client \
    keys as soon as possible.";

/// Lifetime, in days, of credentials issued by the credential-issuing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CredentialDuration(u32);

impl CredentialDuration {
    /// Shortest lifetime accepted by the issuer.
    pub const MIN: Self = Self(1);
    /// Longest lifetime accepted by the issuer.
    pub const MAX: Self = Self(90);

    /// Creates a duration, rejecting values outside `1..=90`.
    pub fn new(days: u32) -> Result<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&days) {
            Ok(Self(days))
        } else {
            Err(Error::invalid_arguments().with_message(format!(
                "duration must be between {} and {} days, got {days}",
                Self::MIN.0,
                Self::MAX.0
            )))
        }
    }

    /// Returns the number of days.
    pub const fn days(self) -> u32 {
        self.0
    }
}

impl Default for CredentialDuration {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u32> for CredentialDuration {
    type Error = Error;

    fn try_from(days: u32) -> Result<Self> {
        Self::new(days)
    }
}

impl From<CredentialDuration> for u32 {
    fn from(duration: CredentialDuration) -> Self {
        duration.0
    }
}

impl fmt::Display for CredentialDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied parameters for building connection options.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialRequest {
    /// Database to connect to.
    pub database: String,
    /// Schema to connect to.
    pub schema: String,

    /// Snowflake user whose private key is stored in the secret store.
    #[serde(default)]
    pub username: Option<String>,
    /// Secret store access key id.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret store secret access key.
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Snowflake role attached to issued credentials.
    #[serde(default)]
    pub role: Option<String>,
    /// OAuth client id.
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Snowflake account name.
    #[serde(default = "default_account_name")]
    pub account_name: String,
    /// Lifetime of issued credentials, in days.
    #[serde(default)]
    pub duration: CredentialDuration,
}

fn default_account_name() -> String {
    DEFAULT_ACCOUNT_NAME.to_owned()
}

impl fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRequest")
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("username", &self.username)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "***"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .field("role", &self.role)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("account_name", &self.account_name)
            .field("duration", &self.duration)
            .finish()
    }
}

impl CredentialRequest {
    /// Creates a request for the given database and schema with no credentials.
    pub fn new(database: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            account_name: default_account_name(),
            ..Default::default()
        }
    }

    /// Supplies the static-key branch.
    #[must_use]
    pub fn with_static_keys(
        mut self,
        username: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.access_key_id = Some(access_key_id.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Supplies the client-credentials branch.
    #[must_use]
    pub fn with_client_credentials(
        mut self,
        role: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.role = Some(role.into());
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Sets the Snowflake account name.
    #[must_use]
    pub fn with_account_name(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = account_name.into();
        self
    }

    /// Sets the credential lifetime.
    #[must_use]
    pub fn with_duration(mut self, duration: CredentialDuration) -> Self {
        self.duration = duration;
        self
    }
}

/// Static secret-store keys plus the user whose private key they unlock.
#[derive(Clone, Copy)]
pub struct StaticKeys<'a> {
    /// Snowflake user as supplied by the caller.
    pub username: &'a str,
    /// Secret store access key id.
    pub access_key_id: &'a str,
    /// Secret store secret access key.
    pub secret_key: &'a str,
}

impl StaticKeys<'_> {
    /// Returns the upper-cased Snowflake user name.
    pub fn user(&self) -> String {
        self.username.to_uppercase()
    }

    /// Returns the name of the secret holding the user's private key.
    pub fn secret_name(&self) -> String {
        format!("{SECRET_NAME_PREFIX}{}", self.user())
    }
}

impl fmt::Debug for StaticKeys<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticKeys")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// OAuth client credentials plus the role to attach.
#[derive(Clone, Copy)]
pub struct ClientCredentials<'a> {
    /// Snowflake role.
    pub role: &'a str,
    /// OAuth client id.
    pub client_id: &'a str,
    /// OAuth client secret.
    pub client_secret: &'a str,
}

impl fmt::Debug for ClientCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("role", &self.role)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// The credential path chosen for a request.
#[derive(Debug, Clone, Copy)]
pub enum KeySelection<'a> {
    /// Fetch a private key from the secret store.
    StaticKeys(StaticKeys<'a>),
    /// Exchange client credentials for a username and password.
    ClientCredentials(ClientCredentials<'a>),
}

impl<'a> KeySelection<'a> {
    /// Chooses the credential path for a request.
    ///
    /// Emits a deprecation warning on [`DEPRECATION_TARGET`] when the static-key
    /// branch is selected.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArguments`] when neither branch is complete.
    ///
    /// [`ErrorKind::InvalidArguments`]: crate::ErrorKind::InvalidArguments
    pub fn select(request: &'a CredentialRequest) -> Result<Self> {
        if let (Some(username), Some(access_key_id), Some(secret_key)) = (
            request.username.as_deref(),
            request.access_key_id.as_deref(),
            request.secret_key.as_deref(),
        ) {
            tracing::warn!(target: DEPRECATION_TARGET, "{STATIC_KEYS_DEPRECATION}");
            tracing::debug!(
                target: TRACING_TARGET,
                username,
                "Selected static-key credentials"
            );

            return Ok(Self::StaticKeys(StaticKeys {
                username,
                access_key_id,
                secret_key,
            }));
        }

        if let (Some(role), Some(client_id), Some(client_secret)) = (
            request.role.as_deref(),
            request.client_id.as_deref(),
            request.client_secret.as_deref(),
        ) {
            tracing::debug!(
                target: TRACING_TARGET,
                role,
                client_id,
                "Selected client credentials"
            );

            return Ok(Self::ClientCredentials(ClientCredentials {
                role,
                client_id,
                client_secret,
            }));
        }

        Err(Error::invalid_arguments().with_message(
            "You must use either 'username', 'aws_access_key_id' and 'aws_secret_access_key' \
             or 'role', 'client_id' and 'client_secret'",
        ))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::{Layer, Registry};

    use super::*;
    use crate::ErrorKind;

    /// Counts WARN events on the deprecation target.
    #[derive(Clone, Default)]
    pub(crate) struct DeprecationCounter(Arc<AtomicUsize>);

    impl DeprecationCounter {
        pub(crate) fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for DeprecationCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            if metadata.target() == DEPRECATION_TARGET && *metadata.level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_deprecations(request: &CredentialRequest) -> (usize, Result<()>) {
        let counter = DeprecationCounter::default();
        let subscriber = Registry::default().with(counter.clone());
        let result = with_default(subscriber, || KeySelection::select(request).map(|_| ()));
        (counter.count(), result)
    }

    #[test]
    fn test_static_keys_selected() {
        let request = CredentialRequest::new("db1", "s1").with_static_keys("u1", "id", "secret");

        match KeySelection::select(&request).unwrap() {
            KeySelection::StaticKeys(keys) => {
                assert_eq!(keys.user(), "U1");
                assert_eq!(keys.secret_name(), "snowflake/U1");
                assert_eq!(keys.access_key_id, "id");
            }
            other => panic!("expected static keys, got {other:?}"),
        }
    }

    #[test]
    fn test_static_keys_take_priority() {
        let request = CredentialRequest::new("db1", "s1")
            .with_static_keys("u1", "id", "secret")
            .with_client_credentials("r1", "c1", "s1");

        assert!(matches!(
            KeySelection::select(&request).unwrap(),
            KeySelection::StaticKeys(_)
        ));
    }

    #[test]
    fn test_client_credentials_selected() {
        let request = CredentialRequest::new("db1", "s1").with_client_credentials("r1", "c1", "s1");

        match KeySelection::select(&request).unwrap() {
            KeySelection::ClientCredentials(creds) => {
                assert_eq!(creds.role, "r1");
                assert_eq!(creds.client_id, "c1");
                assert_eq!(creds.client_secret, "s1");
            }
            other => panic!("expected client credentials, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_sets_are_rejected() {
        let partials = [
            CredentialRequest::new("db", "s"),
            CredentialRequest {
                username: Some("u1".into()),
                access_key_id: Some("id".into()),
                ..CredentialRequest::new("db", "s")
            },
            CredentialRequest {
                role: Some("r1".into()),
                client_secret: Some("secret".into()),
                ..CredentialRequest::new("db", "s")
            },
            CredentialRequest {
                username: Some("u1".into()),
                secret_key: Some("secret".into()),
                role: Some("r1".into()),
                client_id: Some("c1".into()),
                ..CredentialRequest::new("db", "s")
            },
        ];

        for request in &partials {
            let error = KeySelection::select(request).unwrap_err();
            assert_eq!(error.kind, ErrorKind::InvalidArguments, "{request:?}");
        }
    }

    #[test]
    fn test_deprecation_emitted_once_for_static_keys() {
        let request = CredentialRequest::new("db1", "s1").with_static_keys("u1", "id", "secret");
        let (count, result) = count_deprecations(&request);
        assert!(result.is_ok());
        assert_eq!(count, 1);
    }

    #[test]
    fn test_no_deprecation_for_client_credentials() {
        let request = CredentialRequest::new("db1", "s1").with_client_credentials("r1", "c1", "s1");
        let (count, result) = count_deprecations(&request);
        assert!(result.is_ok());
        assert_eq!(count, 0);
    }

    #[test]
    fn test_duration_bounds() {
        assert!(CredentialDuration::new(0).is_err());
        assert_eq!(CredentialDuration::new(1).unwrap().days(), 1);
        assert_eq!(CredentialDuration::new(90).unwrap().days(), 90);
        assert_eq!(
            CredentialDuration::new(91).unwrap_err().kind,
            ErrorKind::InvalidArguments
        );
    }

    #[test]
    fn test_request_defaults() {
        let request = CredentialRequest::new("db1", "s1");
        assert_eq!(request.account_name, "vistaprint");
        assert_eq!(request.duration.days(), 1);
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let request: CredentialRequest =
            serde_json::from_str(r#"{"database":"db1","schema":"s1","duration":30}"#).unwrap();
        assert_eq!(request.account_name, "vistaprint");
        assert_eq!(request.duration.days(), 30);

        let invalid = serde_json::from_str::<CredentialRequest>(
            r#"{"database":"db1","schema":"s1","duration":120}"#,
        );
        assert!(invalid.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let request = CredentialRequest::new("db1", "s1")
            .with_static_keys("u1", "AKIA123", "topsecret")
            .with_client_credentials("r1", "c1", "clientsecret");
        let debug = format!("{request:?}");
        assert!(!debug.contains("AKIA123"));
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("clientsecret"));
    }
}
