// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Latitude/longitude window used by the bounding-box filter.

use geo::Coord;

/// Rectangular lat/long window with inclusive edges.
///
/// Bounds are taken as given: a window with `min > max` on either axis is
/// valid and contains nothing. `geo::Rect` is not used because it
/// normalizes its corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_long: f64,
    pub max_long: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_long: f64, max_long: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_long,
            max_long,
        }
    }

    /// Whether `point` (`x = longitude`, `y = latitude`) is inside the window.
    pub fn contains(&self, point: Coord<f64>) -> bool {
        point.x >= self.min_long
            && point.x <= self.max_long
            && point.y >= self.min_lat
            && point.y <= self.max_lat
    }
}
