// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod census;
pub mod redlining;

pub use census::{AreaCode, BroadbandData, CensusClient};
pub use redlining::{BoundsResult, DataResponse, RedliningError, RedliningService};
