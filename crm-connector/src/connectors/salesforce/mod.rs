pub mod api;
pub mod config;
pub mod schema;
pub mod transformer;

use crate::types::{
    AuthTypeResponse, ConfigSchema, FieldDescriptor, GetDataRequest, GetDataResponse,
    GetSchemaResponse, OutputRow,
};
use crate::Connector;
use anyhow::{Context, Result};
use async_trait::async_trait;

use self::api::SalesforceClient;
use self::config::{SalesforceCredentials, SalesforceSettings};
use self::transformer::{account_query, record_to_row};

const CONFIG_PARAM_NAME: &str = "connect";
const CONFIG_TEXT: &str = "This connector does not require any configuration. \
Click CONNECT at the top right to get started.";

/// Salesforce connector — exposes `Account` records (Name, Site, Type plus a
/// constant `count` metric) as a reporting data source.
///
/// The provider credential is a static secret payload injected at startup;
/// the platform itself collects nothing from the end user.
pub struct SalesforceConnector {
    client: SalesforceClient,
    credentials: SalesforceCredentials,
}

impl SalesforceConnector {
    pub fn new(settings: SalesforceSettings, credentials: SalesforceCredentials) -> Result<Self> {
        let client = SalesforceClient::new(settings)?;
        Ok(Self {
            client,
            credentials,
        })
    }

    /// Authenticate, query accounts, and map every record onto `fields`.
    ///
    /// Any failure before mapping aborts the call; no partial rows.
    pub async fn fetch_rows(&self, fields: &[FieldDescriptor]) -> Result<Vec<OutputRow>> {
        let token = self
            .client
            .request_token(&self.credentials)
            .await
            .context("Failed to obtain Salesforce access token")?;
        tracing::debug!(issued_at = ?token.issued_at, "Using fresh Salesforce access token");

        let response = self
            .client
            .query(&token, &account_query())
            .await
            .context("Failed to query Salesforce accounts")?;

        if response.done == Some(false) {
            tracing::warn!(
                total_size = ?response.total_size,
                returned = response.records.len(),
                "Salesforce returned a partial result set; remaining pages are not fetched"
            );
        }

        Ok(response
            .records
            .iter()
            .map(|record| record_to_row(record, fields))
            .collect())
    }
}

#[async_trait]
impl Connector for SalesforceConnector {
    fn name(&self) -> &str {
        "salesforce"
    }

    fn get_config(&self) -> ConfigSchema {
        ConfigSchema::info_only(CONFIG_PARAM_NAME, CONFIG_TEXT)
    }

    fn get_schema(&self) -> GetSchemaResponse {
        GetSchemaResponse {
            schema: schema::list_fields().to_vec(),
        }
    }

    fn get_auth_type(&self) -> AuthTypeResponse {
        AuthTypeResponse::none()
    }

    async fn get_data(&self, request: &GetDataRequest) -> Result<GetDataResponse> {
        let fields = schema::project(&request.field_names());
        let rows = self.fetch_rows(&fields).await?;

        tracing::info!(
            connector = self.name(),
            requested = request.fields.len(),
            projected = fields.len(),
            rows = rows.len(),
            "getData served"
        );

        Ok(GetDataResponse {
            schema: fields,
            rows,
        })
    }
}
