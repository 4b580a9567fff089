//! Options for the Spark Snowflake reader.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::{REGION, WAREHOUSE};

/// Connection options in the Spark reader's shape.
///
/// Carries either a single-line PEM body or a password and role, never both.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ReaderOptions {
    /// `{account_name}.eu-west-1.snowflakecomputing.com`.
    #[serde(rename = "sfURL")]
    pub url: String,
    /// Database to connect to.
    #[serde(rename = "sfDatabase")]
    pub database: String,
    /// Schema to connect to.
    #[serde(rename = "sfSchema")]
    pub schema: String,
    /// Warehouse; always `PUBLIC`.
    #[serde(rename = "sfWarehouse")]
    pub warehouse: String,
    /// Snowflake user.
    #[serde(rename = "sfUser")]
    pub user: String,
    /// Password issued by the credential endpoint.
    #[serde(rename = "sfPassword", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Role supplied by the caller.
    #[serde(rename = "sfRole", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Base64 key body with the PEM armor and line breaks removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pem_private_key: Option<String>,
}

impl fmt::Debug for ReaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderOptions")
            .field("url", &self.url)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("warehouse", &self.warehouse)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("role", &self.role)
            .field("pem_private_key", &self.pem_private_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ReaderOptions {
    /// Options authenticated with a private key body.
    pub fn with_private_key(
        account_name: &str,
        database: impl Into<String>,
        schema: impl Into<String>,
        user: impl Into<String>,
        pem_private_key: impl Into<String>,
    ) -> Self {
        Self {
            pem_private_key: Some(pem_private_key.into()),
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
            url: format!("{account_name}.{REGION}.snowflakecomputing.com"),
            database: database.into(),
            schema: schema.into(),
            warehouse: WAREHOUSE.to_owned(),
            user: user.into(),
            password: None,
            role: None,
            pem_private_key: None,
        }
    }

    /// Flattens the options into the key/value pairs the reader consumes.
    pub fn into_map(self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::from([
            ("sfURL".to_owned(), self.url),
            ("sfDatabase".to_owned(), self.database),
            ("sfSchema".to_owned(), self.schema),
            ("sfWarehouse".to_owned(), self.warehouse),
            ("sfUser".to_owned(), self.user),
        ]);

        if let Some(password) = self.password {
            map.insert("sfPassword".to_owned(), password);
        }
        if let Some(role) = self.role {
            map.insert("sfRole".to_owned(), role);
        }
        if let Some(key) = self.pem_private_key {
            map.insert("pem_private_key".to_owned(), key);
        }

        map
    }
}
