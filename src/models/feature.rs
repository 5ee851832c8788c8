// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Redlining feature collection model and the two filters that run over it.
//!
//! The collection is deserialized once from the source document and never
//! mutated afterwards. Filters borrow matching features into a fresh
//! [`FilteredCollection`] instead of copying them.

use crate::models::bounds::BoundingBox;
use geo::Coord;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// A single coordinate: `[longitude, latitude, ...]`.
pub type Position = Vec<f64>;
/// A closed ring of positions.
pub type Ring = Vec<Position>;
/// A polygon: outer ring followed by holes.
pub type PolygonRings = Vec<Ring>;

/// A GeoJSON-style feature collection as loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    /// `null` entries are kept so the full collection serializes as loaded.
    #[serde(default)]
    pub features: Vec<Option<Feature>>,
}

/// One redlined area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// Feature geometry. Polygon and multipolygon are not distinguished; the
/// coordinates are always read four levels deep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub coordinates: Vec<PolygonRings>,
}

/// Descriptive properties of a feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holc_grade: Option<String>,
    /// Individual values may be `null` in the source document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_description_data: Option<HashMap<String, Option<String>>>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Geometry {
    /// First position of the first ring of the first polygon, as
    /// `x = longitude`, `y = latitude`.
    ///
    /// Returns `None` as soon as any level is missing.
    pub fn representative_point(&self) -> Option<Coord<f64>> {
        let position = self.coordinates.first()?.first()?.first()?;
        match position.as_slice() {
            [x, y, ..] => Some(Coord { x: *x, y: *y }),
            _ => None,
        }
    }
}

impl Feature {
    /// Representative point of this feature, if it has a usable geometry.
    pub fn representative_point(&self) -> Option<Coord<f64>> {
        self.geometry.as_ref()?.representative_point()
    }

    /// Whether the representative point lies inside `bounds`.
    pub fn is_within(&self, bounds: &BoundingBox) -> bool {
        self.representative_point()
            .is_some_and(|point| bounds.contains(point))
    }

    /// Whether any area description value contains `keyword` (case-sensitive).
    /// `null` values never match.
    pub fn describes(&self, keyword: &str) -> bool {
        self.properties
            .as_ref()
            .and_then(|p| p.area_description_data.as_ref())
            .is_some_and(|data| {
                data.values()
                    .flatten()
                    .any(|value| value.contains(keyword))
            })
    }
}

/// Borrowed view over the matching features of a [`FeatureCollection`].
///
/// Serializes with the same shape as the source collection.
#[derive(Debug, Serialize)]
pub struct FilteredCollection<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub features: Vec<&'a Feature>,
}

impl FeatureCollection {
    /// Number of features, counting `null` entries.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Stable filter over the non-null features.
    pub fn filter<F>(&self, mut predicate: F) -> FilteredCollection<'_>
    where
        F: FnMut(&Feature) -> bool,
    {
        FilteredCollection {
            kind: &self.kind,
            features: self
                .features
                .iter()
                .filter_map(Option::as_ref)
                .filter(|feature| predicate(*feature))
                .collect(),
        }
    }

    /// Features whose representative point lies inside `bounds`.
    pub fn filter_by_bounds(&self, bounds: &BoundingBox) -> FilteredCollection<'_> {
        self.filter(|feature| feature.is_within(bounds))
    }

    /// Features with an area description value containing `keyword`.
    pub fn filter_by_keyword(&self, keyword: &str) -> FilteredCollection<'_> {
        self.filter(|feature| feature.describes(keyword))
    }
}
