// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User pin routes.

use crate::db::PinStore;
use crate::error::{AppError, Result};
use crate::models::Pin;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

const LAT_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LONG_RANGE: RangeInclusive<f64> = -180.0..=180.0;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add-pin", get(add_pin))
        .route("/list-pins", get(list_pins))
        .route("/clear-user", get(clear_user))
}

#[derive(Serialize)]
pub struct AddPinResponse {
    pub response_type: String,
    pub pin: Pin,
}

#[derive(Serialize)]
pub struct ListPinsResponse {
    pub response_type: String,
    pub pins: Vec<Pin>,
}

#[derive(Serialize)]
pub struct ClearUserResponse {
    pub response_type: String,
    pub cleared: usize,
}

fn require_uid(params: &HashMap<String, String>) -> Result<String> {
    params
        .get("uid")
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required parameter 'uid'".to_string()))
}

fn parse_coordinate(raw: Option<&str>, name: &str, range: RangeInclusive<f64>) -> Result<f64> {
    let raw = raw
        .ok_or_else(|| AppError::BadRequest(format!("Missing required parameter '{}'", name)))?;

    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| range.contains(v))
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid '{}' parameter: must be a number in [{}, {}]",
                name,
                range.start(),
                range.end()
            ))
        })
}

/// Save a pin for a user.
async fn add_pin(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<AddPinResponse>> {
    let uid = require_uid(&params)?;
    let lat = parse_coordinate(params.get("lat").map(String::as_str), "lat", LAT_RANGE)?;
    let long = parse_coordinate(params.get("long").map(String::as_str), "long", LONG_RANGE)?;

    let pin = PinStore::new_pin(&uid, lat, long);
    state.pins.add_pin(&pin).await?;

    Ok(Json(AddPinResponse {
        response_type: "success".to_string(),
        pin,
    }))
}

/// List a user's pins, oldest first.
async fn list_pins(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListPinsResponse>> {
    let uid = require_uid(&params)?;
    let pins = state.pins.list_pins(&uid).await?;

    Ok(Json(ListPinsResponse {
        response_type: "success".to_string(),
        pins,
    }))
}

/// Remove all of a user's pins.
async fn clear_user(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ClearUserResponse>> {
    let uid = require_uid(&params)?;
    let cleared = state.pins.clear_pins(&uid).await?;

    Ok(Json(ClearUserResponse {
        response_type: "success".to_string(),
        cleared,
    }))
}
