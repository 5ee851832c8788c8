// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, StatusCode};
use redline_map::config::Config;
use redline_map::db::PinStore;
use redline_map::routes::create_router;
use redline_map::services::{CensusClient, RedliningService};
use redline_map::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Pin store connected to the Firestore emulator.
#[allow(dead_code)]
pub async fn test_db() -> PinStore {
    PinStore::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by the sample fixture and an in-memory pin store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let redlining = RedliningService::load_from_file(&config.data_path)
        .expect("Failed to load sample redlining data");
    let census = CensusClient::new(config.census_api_url.clone());

    let state = Arc::new(AppState {
        config,
        pins: PinStore::new_in_memory(),
        redlining,
        census,
    });

    (create_router(state.clone()), state)
}

/// Issue a GET and return the status with the parsed JSON body.
#[allow(dead_code)]
pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Cities of the features in a `{"data": ...}` response, in order.
#[allow(dead_code)]
pub fn cities(json: &serde_json::Value) -> Vec<String> {
    json["data"]["features"]
        .as_array()
        .expect("features array")
        .iter()
        .map(|f| f["properties"]["city"].as_str().unwrap_or_default().to_string())
        .collect()
}
