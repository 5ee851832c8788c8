// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Redline-Map API Server
//!
//! Serves historical redlining GeoJSON filtered by bounding box or keyword,
//! user map pins, and county broadband statistics.

use redline_map::{
    config::Config,
    db::PinStore,
    services::{CensusClient, RedliningService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
    })?;
    tracing::info!(port = config.port, "Starting Redline-Map API");

    // The dataset is required; refuse to start without it
    tracing::info!(path = %config.data_path.display(), "Loading redlining data");
    let redlining = RedliningService::load_from_file(&config.data_path).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load redlining data");
    })?;

    let pins = match &config.gcp_project_id {
        Some(project_id) => PinStore::new(project_id).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to connect to Firestore");
        })?,
        None => {
            tracing::warn!("GCP_PROJECT_ID not set, keeping pins in memory");
            PinStore::new_in_memory()
        }
    };

    let census = CensusClient::new(config.census_api_url.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        pins,
        redlining,
        census,
    });

    // Build router
    let app = redline_map::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("redline_map=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
