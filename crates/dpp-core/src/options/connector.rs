//! Options for the native Snowflake connector.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Serialize, Serializer};

use super::{REGION, WAREHOUSE};

/// Connection options in the native connector's shape.
///
/// Carries either a decoded private key or a password and role, never both.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorOptions {
    /// `{account_name}.eu-west-1`.
    pub account: String,
    /// Database to connect to.
    pub database: String,
    /// Schema to connect to.
    pub schema: String,
    /// Warehouse; always `PUBLIC`.
    pub warehouse: String,
    /// Snowflake user.
    pub user: String,
    /// Password issued by the credential endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Role supplied by the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// DER-encoded private key.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_private_key"
    )]
    pub private_key: Option<Vec<u8>>,
}

fn serialize_private_key<S>(key: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match key {
        Some(key) => serializer.serialize_str(&STANDARD.encode(key)),
        None => serializer.serialize_none(),
    }
}

impl fmt::Debug for ConnectorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorOptions")
            .field("account", &self.account)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("warehouse", &self.warehouse)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("role", &self.role)
            .field("private_key", &self.private_key.as_ref().map(Vec::len))
            .finish()
    }
}

impl ConnectorOptions {
    /// Options authenticated with a private key.
    pub fn with_private_key(
        account_name: &str,
        database: impl Into<String>,
        schema: impl Into<String>,
        user: impl Into<String>,
        private_key: Vec<u8>,
    ) -> Self {
        Self {
            private_key: Some(private_key),
            ..Self::base(account_name, database, schema, user)
        }
    }

    /// Options authenticated with an issued password.
    pub fn with_password(
        account_name: &str,
        database: impl Into<String>,
        schema: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            password: Some(password.into()),
            role: Some(role.into()),
            ..Self::base(account_name, database, schema, user)
        }
    }

    fn base(
        account_name: &str,
        database: impl Into<String>,
        schema: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            account: format!("{account_name}.{REGION}"),
            database: database.into(),
            schema: schema.into(),
            warehouse: WAREHOUSE.to_owned(),
            user: user.into(),
            password: None,
            role: None,
            private_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_private_key_options() {
        let options = ConnectorOptions::with_private_key("acme", "db1", "s1", "U1", vec![1, 2, 3]);

        assert_eq!(options.account, "acme.eu-west-1");
        assert_eq!(options.warehouse, "PUBLIC");
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "account": "acme.eu-west-1",
                "database": "db1",
                "schema": "s1",
                "warehouse": "PUBLIC",
                "user": "U1",
                "private_key": "AQID",
            })
        );
    }

    #[test]
    fn test_password_options() {
        let options = ConnectorOptions::with_password("acme", "db1", "s1", "alice", "pw1", "r1");

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["password"], "pw1");
        assert_eq!(value["role"], "r1");
        assert!(value.get("private_key").is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let options = ConnectorOptions::with_password("acme", "db1", "s1", "alice", "pw1", "r1");
        assert!(!format!("{options:?}").contains("pw1"));
    }
}
