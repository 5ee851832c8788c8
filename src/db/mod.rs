// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod pins;

pub use pins::PinStore;

/// Collection names as constants.
pub mod collections {
    /// User pins (one document per pin, queried by `uid`)
    pub const PINS: &str = "pins";
}
