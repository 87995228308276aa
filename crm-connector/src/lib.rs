//! CRM Connector - Interface and types for reporting-platform data connectors.
//!
//! This crate defines the callback contract a reporting platform uses to pull
//! tabular data out of an external CRM, plus the Salesforce `Account`
//! connector that implements it.
//!
//! # Architecture
//!
//! ```text
//!       Reporting platform
//!          ↓  getConfig / getSchema / getAuthType / getData
//! ┌─────────────────────────────────────────┐
//! │       Connector (implements trait)       │
//! │  - Schema registry (static catalog)      │
//! │  - Field projection                      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       Salesforce client                  │
//! │  - Password-grant token exchange         │
//! │  - SOQL query                            │
//! └─────────────────────────────────────────┘
//!          ↓
//!     Raw records → output rows
//! ```
//!
//! # Core Types
//!
//! - [`Connector`] - Trait that all connectors must implement
//! - [`FieldDescriptor`] - Schema metadata for one emittable column
//! - [`GetDataRequest`] / [`GetDataResponse`] - The `getData` contract
//! - [`ConnectorError`] - Auth/query failure classification
//!
//! # Creating a Connector
//!
//! ```no_run
//! use crm_connector::{
//!     AuthTypeResponse, ConfigSchema, Connector, GetDataRequest, GetDataResponse,
//!     GetSchemaResponse,
//! };
//! use async_trait::async_trait;
//! use anyhow::Result;
//!
//! struct MyConnector;
//!
//! #[async_trait]
//! impl Connector for MyConnector {
//!     fn name(&self) -> &str {
//!         "myservice"
//!     }
//!
//!     fn get_config(&self) -> ConfigSchema {
//!         ConfigSchema::info_only("connect", "Nothing to configure.")
//!     }
//!
//!     fn get_schema(&self) -> GetSchemaResponse {
//!         GetSchemaResponse { schema: vec![] }
//!     }
//!
//!     fn get_auth_type(&self) -> AuthTypeResponse {
//!         AuthTypeResponse::none()
//!     }
//!
//!     async fn get_data(&self, _request: &GetDataRequest) -> Result<GetDataResponse> {
//!         Ok(GetDataResponse { schema: vec![], rows: vec![] })
//!     }
//! }
//! ```

mod connector;
mod error;
mod types;
pub mod connectors;
pub mod projection;

// Re-export public types
pub use connector::Connector;
pub use connectors::salesforce::SalesforceConnector;
pub use error::ConnectorError;
pub use projection::project_fields;
pub use types::{
    AuthType, AuthTypeResponse, ConceptType, ConfigParam, ConfigParamType, ConfigSchema,
    DataType, FieldDescriptor, FieldRequest, GetDataRequest, GetDataResponse,
    GetSchemaResponse, OutputRow, Semantics,
};
