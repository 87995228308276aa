use anyhow::{Context, Result};
use crm_connector::connectors::salesforce::config::SalesforceCredentials;
use crm_connector::{Connector, SalesforceConnector};
use report_bridge::api::{create_router, ConnectorAppState};
use report_bridge::config::{load_config, BridgeConfig};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "report_bridge=info,crm_connector=info".into()),
        )
        .init();

    info!("Report bridge starting...");

    // Optional TOML config; defaults otherwise
    let mut config = match std::env::var("BRIDGE_CONFIG") {
        Ok(path) => load_config(&path)?,
        Err(_) => BridgeConfig::default(),
    };

    if let Ok(port) = std::env::var("BRIDGE_PORT") {
        config.server.port = port
            .parse()
            .context("BRIDGE_PORT must be a valid port number")?;
    }

    // Provider secrets come from the environment only
    let credentials = SalesforceCredentials::from_env()?;

    info!(
        port = config.server.port,
        token_url = %config.salesforce.token_url,
        instance_url = ?config.salesforce.instance_url,
        api_version = %config.salesforce.api_version,
        "Configuration loaded"
    );

    let connector = SalesforceConnector::new(config.salesforce.clone(), credentials)
        .context("Failed to initialize Salesforce connector")?;
    info!(connector = connector.name(), "Connector initialized");

    let router = create_router(ConnectorAppState {
        connector: Arc::new(connector),
    });
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.server.port))
        .await
        .context("Failed to bind connector API port")?;
    info!(port = config.server.port, "Connector API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Connector API server error")?;

    info!("Report bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl_c signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
