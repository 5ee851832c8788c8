// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Redlining GeoJSON query routes.

use crate::error::Result;
use crate::services::DataResponse;
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/filtered-geojson", get(filtered_geojson))
        .route("/filtered-keywords", get(filtered_keywords))
}

const KEYWORD: &str = "keyWord";

/// Features inside a lat/long window, or everything when no window is given.
async fn filtered_geojson(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    let data = state.redlining.query_bounds(&params)?;
    Ok(Json(DataResponse { data }).into_response())
}

/// Features whose area description contains the keyword.
async fn filtered_keywords(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    let data = state
        .redlining
        .query_keyword(params.get(KEYWORD).map(String::as_str))?;
    Ok(Json(DataResponse { data }).into_response())
}
