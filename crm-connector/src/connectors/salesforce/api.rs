use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::config::{SalesforceCredentials, SalesforceSettings};
use crate::error::ConnectorError;

/// One record as returned by the query endpoint.
///
/// Attribute names are provider-defined (`Name`, `Site`, `Type`, plus an
/// `attributes` metadata object).
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// OAuth token response from the password grant.
#[derive(Deserialize, Debug)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    instance_url: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    /// Milliseconds since the epoch, as a string.
    #[serde(default)]
    issued_at: Option<String>,
}

/// Access token obtained from the token endpoint.
#[derive(Clone)]
pub struct AccessToken {
    pub access_token: String,
    pub instance_url: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("instance_url", &self.instance_url)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Query endpoint response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub total_size: Option<u64>,
    #[serde(default)]
    pub done: Option<bool>,
    pub records: Vec<RawRecord>,
}

/// HTTP client for the Salesforce OAuth and REST query endpoints.
pub struct SalesforceClient {
    http_client: Client,
    settings: SalesforceSettings,
}

impl SalesforceClient {
    /// Create a client for the given endpoint settings.
    pub fn new(settings: SalesforceSettings) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent("report-bridge/1.0")
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http_client,
            settings,
        })
    }

    /// Exchange the static secret payload for an access token (password grant).
    pub async fn request_token(
        &self,
        credentials: &SalesforceCredentials,
    ) -> Result<AccessToken, ConnectorError> {
        let form_data = [
            ("grant_type", "password"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        tracing::debug!("Requesting access token from {}", self.settings.token_url);

        let response = self
            .http_client
            .post(&self.settings.token_url)
            .header(ACCEPT, "application/json")
            .form(&form_data)
            .send()
            .await
            .map_err(|e| ConnectorError::Auth(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ConnectorError::Auth(format!(
                "token exchange failed with status {}: {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| ConnectorError::Auth(format!("failed to parse token response: {}", e)))?;

        let access_token = token_response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConnectorError::Auth("token response has no access_token".to_string()))?;

        let issued_at = token_response
            .issued_at
            .and_then(|ms| ms.parse::<i64>().ok())
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single());

        tracing::debug!(
            token_type = ?token_response.token_type,
            has_instance_url = token_response.instance_url.is_some(),
            issued_at = ?issued_at,
            "Token exchange successful"
        );

        Ok(AccessToken {
            access_token,
            instance_url: token_response.instance_url,
            issued_at,
        })
    }

    /// Run a SOQL query against the instance the token belongs to.
    ///
    /// The configured instance URL takes precedence over the one returned
    /// by the token endpoint.
    pub async fn query(
        &self,
        token: &AccessToken,
        soql: &str,
    ) -> Result<QueryResponse, ConnectorError> {
        let instance = self
            .settings
            .instance_url
            .as_deref()
            .or(token.instance_url.as_deref())
            .ok_or_else(|| {
                ConnectorError::Auth(
                    "no instance URL configured and none returned with the token".to_string(),
                )
            })?;
        let url = format!(
            "{}/services/data/v{}/query/",
            instance.trim_end_matches('/'),
            self.settings.api_version
        );

        tracing::debug!(soql, "Querying {}", url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", soql)])
            .bearer_auth(&token.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ConnectorError::Query(format!("query request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(query_status_error(status, &body));
        }

        response
            .json::<QueryResponse>()
            .await
            .map_err(|e| ConnectorError::Query(format!("failed to parse query response: {}", e)))
    }
}

/// Map a non-2xx query response to a descriptive error.
///
/// - 401 → session expired or invalid
/// - Other non-2xx → generic API error
///
/// The provider's error body (`[{"message", "errorCode"}]`) is kept verbatim.
fn query_status_error(status: StatusCode, body: &str) -> ConnectorError {
    match status {
        StatusCode::UNAUTHORIZED => ConnectorError::Query(format!(
            "Salesforce session expired or invalid: {}",
            body
        )),
        s => ConnectorError::Query(format!("Salesforce API error {}: {}", s, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const TOKEN_PATH: &str = "/services/oauth2/token";
    const QUERY_PATH: &str = "/services/data/v40.0/query/";

    fn credentials() -> SalesforceCredentials {
        SalesforceCredentials {
            client_id: "cid".to_string(),
            client_secret: "csecret".to_string(),
            username: "ops@example.com".to_string(),
            password: "pw".to_string(),
        }
    }

    fn client_for(server: &Server, instance_url: Option<String>) -> SalesforceClient {
        SalesforceClient::new(SalesforceSettings {
            token_url: format!("{}{}", server.url(), TOKEN_PATH),
            instance_url,
            ..SalesforceSettings::default()
        })
        .unwrap()
    }

    fn token(instance_url: Option<String>) -> AccessToken {
        AccessToken {
            access_token: "tok".to_string(),
            instance_url,
            issued_at: None,
        }
    }

    #[tokio::test]
    async fn test_request_token() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", TOKEN_PATH)
            .match_header("accept", "application/json")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "password".into()),
                Matcher::UrlEncoded("client_id".into(), "cid".into()),
                Matcher::UrlEncoded("client_secret".into(), "csecret".into()),
                Matcher::UrlEncoded("username".into(), "ops@example.com".into()),
                Matcher::UrlEncoded("password".into(), "pw".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "access_token": "00Dxx!AQ0AQ",
                    "instance_url": "https://acme.my.salesforce.com",
                    "id": "https://login.salesforce.com/id/00Dxx/005xx",
                    "token_type": "Bearer",
                    "issued_at": "1700000000000",
                    "signature": "abc="
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server, None);
        let token = client.request_token(&credentials()).await.unwrap();

        assert_eq!(token.access_token, "00Dxx!AQ0AQ");
        assert_eq!(
            token.instance_url.as_deref(),
            Some("https://acme.my.salesforce.com")
        );
        assert_eq!(token.issued_at.unwrap().timestamp_millis(), 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_token_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", TOKEN_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"invalid_grant","error_description":"authentication failure"}"#)
            .create_async()
            .await;

        let client = client_for(&server, None);
        let err = client.request_token(&credentials()).await.unwrap_err();

        assert!(matches!(err, ConnectorError::Auth(_)));
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("authentication failure"));
    }

    #[tokio::test]
    async fn test_token_missing_access_token() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", TOKEN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"instance_url": "https://acme.my.salesforce.com"}"#)
            .create_async()
            .await;

        let client = client_for(&server, None);
        let err = client.request_token(&credentials()).await.unwrap_err();

        assert!(matches!(err, ConnectorError::Auth(_)));
        assert!(err.to_string().contains("no access_token"));
    }

    #[tokio::test]
    async fn test_token_malformed_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", TOKEN_PATH)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = client_for(&server, None);
        let err = client.request_token(&credentials()).await.unwrap_err();
        assert!(matches!(err, ConnectorError::Auth(_)));
    }

    #[tokio::test]
    async fn test_query_uses_token_instance_url() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", QUERY_PATH)
            .match_query(Matcher::UrlEncoded(
                "q".into(),
                "SELECT Name, Site, Type FROM Account".into(),
            ))
            .match_header("authorization", "Bearer tok")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "totalSize": 1,
                    "done": true,
                    "records": [
                        {
                            "attributes": {"type": "Account", "url": "/services/data/v40.0/sobjects/Account/001"},
                            "Name": "Acme",
                            "Site": "HQ",
                            "Type": "Customer"
                        }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server, None);
        let response = client
            .query(&token(Some(server.url())), "SELECT Name, Site, Type FROM Account")
            .await
            .unwrap();

        assert_eq!(response.total_size, Some(1));
        assert_eq!(response.done, Some(true));
        assert_eq!(response.records.len(), 1);
        assert_eq!(response.records[0]["Name"], "Acme");
    }

    #[tokio::test]
    async fn test_query_prefers_configured_instance_url() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", QUERY_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"records": []}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some(format!("{}/", server.url())));
        let response = client
            .query(
                &token(Some("http://127.0.0.1:9".to_string())),
                "SELECT Name FROM Account",
            )
            .await
            .unwrap();

        assert!(response.records.is_empty());
        assert_eq!(response.done, None);
    }

    #[tokio::test]
    async fn test_query_without_instance_url() {
        let server = Server::new_async().await;
        let client = client_for(&server, None);

        let err = client
            .query(&token(None), "SELECT Name FROM Account")
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Auth(_)));
    }

    #[tokio::test]
    async fn test_query_401() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", QUERY_PATH)
            .match_query(Matcher::Any)
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"message":"Session expired or invalid","errorCode":"INVALID_SESSION_ID"}]"#)
            .create_async()
            .await;

        let client = client_for(&server, Some(server.url()));
        let err = client
            .query(&token(None), "SELECT Name FROM Account")
            .await
            .unwrap_err();

        assert!(matches!(err, ConnectorError::Query(_)));
        assert!(err.to_string().contains("session expired or invalid"));
        assert!(err.to_string().contains("INVALID_SESSION_ID"));
    }

    #[tokio::test]
    async fn test_query_500() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", QUERY_PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server, Some(server.url()));
        let err = client
            .query(&token(None), "SELECT Name FROM Account")
            .await
            .unwrap_err();

        assert!(matches!(err, ConnectorError::Query(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_query_error_keeps_provider_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", QUERY_PATH)
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"message":"No such column 'Sites' on entity 'Account'","errorCode":"INVALID_FIELD"}]"#)
            .create_async()
            .await;

        let client = client_for(&server, Some(server.url()));
        let err = client
            .query(&token(None), "SELECT Sites FROM Account")
            .await
            .unwrap_err();

        assert!(matches!(err, ConnectorError::Query(_)));
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("INVALID_FIELD"));
        assert!(err.to_string().contains("No such column 'Sites'"));
    }

    #[tokio::test]
    async fn test_query_missing_records() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", QUERY_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"totalSize": 0, "done": true}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some(server.url()));
        let err = client
            .query(&token(None), "SELECT Name FROM Account")
            .await
            .unwrap_err();

        assert!(matches!(err, ConnectorError::Query(_)));
        assert!(err.to_string().contains("failed to parse query response"));
    }

    #[test]
    fn test_access_token_debug_redacted() {
        let debug = format!("{:?}", token(None));
        assert!(!debug.contains("tok\""));
        assert!(debug.contains("<redacted>"));
    }
}
