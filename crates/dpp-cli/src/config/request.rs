//! Credential request arguments.

use clap::Args;
use dpp_core::request::DEFAULT_ACCOUNT_NAME;
use dpp_core::{CredentialDuration, CredentialRequest};

/// Database, schema and one of the two credential branches.
///
/// Secret values can be supplied through the environment so they stay out
/// of shell history.
#[derive(Clone, Args)]
pub struct RequestArgs {
    /// Database to connect to
    #[arg(long, env = "DPP_DATABASE")]
    pub database: String,

    /// Schema to connect to
    #[arg(long, env = "DPP_SCHEMA")]
    pub schema: String,

    /// Snowflake user whose private key is stored in Secrets Manager
    #[arg(long, env = "DPP_USERNAME", help_heading = "Static keys (deprecated)")]
    pub username: Option<String>,

    /// Secrets Manager access key id
    #[arg(
        long,
        env = "DPP_ACCESS_KEY_ID",
        hide_env_values = true,
        help_heading = "Static keys (deprecated)"
    )]
    pub access_key_id: Option<String>,

    /// Secrets Manager secret access key
    #[arg(
        long,
        env = "DPP_SECRET_KEY",
        hide_env_values = true,
        help_heading = "Static keys (deprecated)"
    )]
    pub secret_key: Option<String>,

    /// Snowflake role attached to the issued credentials
    #[arg(long, env = "DPP_ROLE", help_heading = "Client credentials")]
    pub role: Option<String>,

    /// OAuth client id
    #[arg(long, env = "DPP_CLIENT_ID", help_heading = "Client credentials")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(
        long,
        env = "DPP_CLIENT_SECRET",
        hide_env_values = true,
        help_heading = "Client credentials"
    )]
    pub client_secret: Option<String>,

    /// Snowflake account name
    #[arg(long, env = "DPP_ACCOUNT_NAME", default_value = DEFAULT_ACCOUNT_NAME)]
    pub account_name: String,

    /// Lifetime of issued credentials in days (1-90)
    #[arg(long, env = "DPP_DURATION", default_value = "1", value_parser = parse_duration)]
    pub duration: CredentialDuration,
}

fn parse_duration(value: &str) -> Result<CredentialDuration, String> {
    let days = value
        .parse::<u32>()
        .map_err(|e| format!("invalid number of days: {e}"))?;
    CredentialDuration::new(days).map_err(|e| e.to_string())
}

impl RequestArgs {
    /// Converts the arguments into a broker request.
    pub fn to_request(&self) -> CredentialRequest {
        CredentialRequest {
            database: self.database.clone(),
            schema: self.schema.clone(),
            username: self.username.clone(),
            access_key_id: self.access_key_id.clone(),
            secret_key: self.secret_key.clone(),
            role: self.role.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            account_name: self.account_name.clone(),
            duration: self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_bounds() {
        assert_eq!(parse_duration("90").unwrap(), CredentialDuration::MAX);
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("91").is_err());
        assert!(parse_duration("seven").is_err());
    }
}
