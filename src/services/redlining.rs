// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Redlining dataset loading and query handling.
//!
//! The dataset is loaded once at startup and held read-only for the life of
//! the process. Every query runs one filter pass over it and borrows the
//! matching features into a new collection.

use crate::error::AppError;
use crate::models::{BoundingBox, FeatureCollection, FilteredCollection};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const MIN_LAT: &str = "minLat";
const MAX_LAT: &str = "maxLat";
const MIN_LONG: &str = "minLong";
const MAX_LONG: &str = "maxLong";

/// Service holding the resident redlining collection.
#[derive(Debug, Clone)]
pub struct RedliningService {
    collection: FeatureCollection,
}

/// Result of a bounding-box query: either the whole dataset or a filtered view.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BoundsResult<'a> {
    Full(&'a FeatureCollection),
    Filtered(FilteredCollection<'a>),
}

/// `{"data": ...}` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl RedliningService {
    pub fn new(collection: FeatureCollection) -> Self {
        Self { collection }
    }

    /// Load the dataset from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RedliningError> {
        let path = path.as_ref();
        let json_data = fs::read_to_string(path)
            .map_err(|e| RedliningError::Io(format!("{}: {}", path.display(), e)))?;
        Self::load_from_json(&json_data)
    }

    /// Load the dataset from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, RedliningError> {
        let collection: FeatureCollection =
            serde_json::from_str(json_data).map_err(|e| RedliningError::Parse(e.to_string()))?;

        let missing_geometry = collection
            .features
            .iter()
            .flatten()
            .filter(|f| f.representative_point().is_none())
            .count();

        tracing::info!(
            count = collection.len(),
            missing_geometry,
            "Loaded redlining features"
        );
        Ok(Self { collection })
    }

    /// The resident collection, unfiltered.
    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    /// Features whose representative point lies within the given window.
    pub fn filter_by_bounds(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_long: f64,
        max_long: f64,
    ) -> FilteredCollection<'_> {
        let bounds = BoundingBox::new(min_lat, max_lat, min_long, max_long);
        self.collection.filter_by_bounds(&bounds)
    }

    /// Features whose area description mentions `keyword`.
    pub fn filter_by_keyword(&self, keyword: &str) -> FilteredCollection<'_> {
        self.collection.filter_by_keyword(keyword)
    }

    /// Answer a bounding-box query from raw query parameters.
    ///
    /// No parameters at all returns the full collection. Otherwise all four
    /// bounds must be present and numeric.
    pub fn query_bounds(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<BoundsResult<'_>, AppError> {
        if params.is_empty() {
            return Ok(BoundsResult::Full(&self.collection));
        }

        let bounds = parse_bounds(params)?;
        let filtered = self.collection.filter_by_bounds(&bounds);

        tracing::debug!(
            min_lat = bounds.min_lat,
            max_lat = bounds.max_lat,
            min_long = bounds.min_long,
            max_long = bounds.max_long,
            matched = filtered.features.len(),
            "Filtered by bounds"
        );
        Ok(BoundsResult::Filtered(filtered))
    }

    /// Answer a keyword query. A missing keyword is a caller error; an empty
    /// one is not.
    pub fn query_keyword(
        &self,
        keyword: Option<&str>,
    ) -> Result<FilteredCollection<'_>, AppError> {
        let keyword = keyword.ok_or_else(|| {
            AppError::BadRequest("Missing required parameter 'keyWord'".to_string())
        })?;

        let filtered = self.collection.filter_by_keyword(keyword);
        tracing::debug!(
            keyword,
            matched = filtered.features.len(),
            "Filtered by keyword"
        );
        Ok(filtered)
    }
}

fn parse_bounds(params: &HashMap<String, String>) -> Result<BoundingBox, AppError> {
    Ok(BoundingBox::new(
        parse_bound(params, MIN_LAT)?,
        parse_bound(params, MAX_LAT)?,
        parse_bound(params, MIN_LONG)?,
        parse_bound(params, MAX_LONG)?,
    ))
}

fn parse_bound(params: &HashMap<String, String>, name: &str) -> Result<f64, AppError> {
    let raw = params
        .get(name)
        .ok_or_else(|| AppError::BadRequest(format!("Missing required parameter '{}'", name)))?;

    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid '{}' parameter: must be a finite number",
                name
            ))
        })
}

/// Errors from loading the redlining dataset.
#[derive(Debug, thiserror::Error)]
pub enum RedliningError {
    #[error("Failed to read file: {0}")]
    Io(String),

    #[error("Failed to parse redlining GeoJSON: {0}")]
    Parse(String),
}
