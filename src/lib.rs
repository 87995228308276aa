// Configuration loading
pub mod config;

// HTTP API exposing the connector callbacks
pub mod api;
