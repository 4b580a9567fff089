//! Secret payloads and key material extraction.

use serde_json::Value;

use crate::error::{Error, Result};

/// Field of a structured secret that holds the key material.
pub const SECRET_FIELD: &str = "sf_account";

/// Raw value of a secret as returned by the store.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretPayload {
    /// Structured text; a JSON object carrying [`SECRET_FIELD`].
    Text(String),
    /// Binary value holding the key material as UTF-8.
    Binary(Vec<u8>),
}

impl std::fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "Text({} bytes)", text.len()),
            Self::Binary(bytes) => write!(f, "Binary({} bytes)", bytes.len()),
        }
    }
}

impl SecretPayload {
    /// Extracts the key material.
    ///
    /// Structured text is parsed and its [`SECRET_FIELD`] returned; binary
    /// values are decoded as UTF-8.
    pub fn into_key_material(self) -> Result<String> {
        match self {
            Self::Text(text) => {
                let value: Value = serde_json::from_str(&text).map_err(|e| {
                    Error::key_material()
                        .with_message("secret string is not valid JSON")
                        .with_source(e)
                })?;

                match value.get(SECRET_FIELD) {
                    Some(Value::String(material)) => Ok(material.clone()),
                    Some(_) => Err(Error::key_material()
                        .with_message(format!("secret field {SECRET_FIELD} is not a string"))),
                    None => Err(Error::key_material()
                        .with_message(format!("secret has no {SECRET_FIELD} field"))),
                }
            }
            Self::Binary(bytes) => String::from_utf8(bytes).map_err(|e| {
                Error::key_material()
                    .with_message("secret binary is not valid UTF-8")
                    .with_source(e)
            }),
        }
    }
}
