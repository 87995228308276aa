use thiserror::Error;

/// Failure classes surfaced by a connector's outbound calls.
///
/// Both variants are fatal for the call that produced them. Callers holding
/// an `anyhow::Error` can recover the class with `downcast_ref`.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Token exchange failed or returned no usable token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Data query failed, returned a non-success status, or unparsable JSON.
    #[error("query failed: {0}")]
    Query(String),
}

impl ConnectorError {
    /// Short machine-readable tag (`"auth"` or `"query"`).
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectorError::Auth(_) => "auth",
            ConnectorError::Query(_) => "query",
        }
    }
}
