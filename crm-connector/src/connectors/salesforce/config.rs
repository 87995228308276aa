use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;

pub const TOKEN_URL: &str = "https://login.salesforce.com/services/oauth2/token";
pub const API_VERSION: &str = "40.0";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Non-secret Salesforce endpoint settings.
///
/// Lives in the `[salesforce]` section of the bridge's TOML config.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesforceSettings {
    /// OAuth token endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Instance base URL, e.g. `https://acme.my.salesforce.com`.
    /// When unset, the `instance_url` returned by the token endpoint is used.
    #[serde(default)]
    pub instance_url: Option<String>,

    /// REST API version used in the query path (`v{api_version}`).
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Timeout applied to every outbound request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_token_url() -> String {
    TOKEN_URL.to_string()
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_request_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

impl Default for SalesforceSettings {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            instance_url: None,
            api_version: default_api_version(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Static secret payload for the password grant.
///
/// Loads from environment variables:
/// - `SALESFORCE_CLIENT_ID`
/// - `SALESFORCE_CLIENT_SECRET`
/// - `SALESFORCE_USERNAME`
/// - `SALESFORCE_PASSWORD`
#[derive(Clone)]
pub struct SalesforceCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl SalesforceCredentials {
    /// Load credentials from environment variables.
    pub fn from_env() -> Result<Self> {
        let client_id =
            std::env::var("SALESFORCE_CLIENT_ID").context("SALESFORCE_CLIENT_ID not set")?;
        let client_secret = std::env::var("SALESFORCE_CLIENT_SECRET")
            .context("SALESFORCE_CLIENT_SECRET not set")?;
        let username =
            std::env::var("SALESFORCE_USERNAME").context("SALESFORCE_USERNAME not set")?;
        let password =
            std::env::var("SALESFORCE_PASSWORD").context("SALESFORCE_PASSWORD not set")?;
        Ok(Self {
            client_id,
            client_secret,
            username,
            password,
        })
    }
}

impl fmt::Debug for SalesforceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesforceCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
