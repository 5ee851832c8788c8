// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! County broadband lookup route (proxied to the Census API).

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/broadband", get(broadband))
}

/// `data` is `[state, county, percentage]`.
#[derive(Serialize)]
pub struct BroadbandResponse {
    pub response_type: String,
    pub data: [String; 3],
    pub date_time: String,
}

fn require(params: &HashMap<String, String>, name: &str) -> Result<String> {
    params
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing required parameter '{}'", name)))
}

async fn broadband(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<BroadbandResponse>> {
    let state_name = require(&params, "state")?;
    let county = require(&params, "county")?;

    let result = state.census.broadband(&state_name, &county).await?;

    Ok(Json(BroadbandResponse {
        response_type: "success".to_string(),
        data: [result.state, result.county, result.percentage],
        date_time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}
