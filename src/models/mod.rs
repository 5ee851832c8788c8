// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod bounds;
pub mod feature;
pub mod pin;

pub use bounds::BoundingBox;
pub use feature::{Feature, FeatureCollection, FilteredCollection, Geometry, Properties};
pub use pin::Pin;
