use crate::types::{
    AuthTypeResponse, ConfigSchema, GetDataRequest, GetDataResponse, GetSchemaResponse,
};
use anyhow::Result;
use async_trait::async_trait;

/// Connector interface for reporting-platform data sources.
///
/// The platform drives a connector through four callbacks. Connectors hold
/// no per-call state: the schema is a process-wide constant and every
/// `get_data` call authenticates and queries from scratch.
///
/// # Lifecycle
/// 1. Platform calls `get_config()` to learn what the user must configure
/// 2. Platform calls `get_auth_type()` to learn how the user authenticates
/// 3. Platform calls `get_schema()` to discover the available fields
/// 4. Platform calls `get_data(request)` with the fields a report needs
/// 5. Connector returns the projected schema and one row per record
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the unique identifier for this connector.
    ///
    /// Must be lowercase alphanumeric (e.g., "salesforce").
    /// Used for logging and diagnostics.
    fn name(&self) -> &str;

    /// Describes the configuration the end user has to provide.
    ///
    /// Must not depend on the request; the platform may call it at any time.
    fn get_config(&self) -> ConfigSchema;

    /// Returns the full field catalog, in catalog order.
    fn get_schema(&self) -> GetSchemaResponse;

    /// Declares which platform-managed authentication the connector needs.
    fn get_auth_type(&self) -> AuthTypeResponse;

    /// Fetches rows for the requested fields.
    ///
    /// # Arguments
    /// * `request` - Field names the report asked for (any order, unknown
    ///   names allowed)
    ///
    /// # Returns
    /// * `Ok(GetDataResponse)` - Projected schema plus rows aligned with it
    /// * `Err(...)` - Authentication or query failure. No partial results
    ///   are ever returned.
    async fn get_data(&self, request: &GetDataRequest) -> Result<GetDataResponse>;
}
