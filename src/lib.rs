// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Redline-Map: historical redlining data API
//!
//! This crate serves HOLC redlining GeoJSON filtered by bounding box or by
//! area-description keyword, along with user map pins and county broadband
//! statistics from the US Census.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::PinStore;
use services::{CensusClient, RedliningService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub pins: PinStore,
    pub redlining: RedliningService,
    pub census: CensusClient,
}
