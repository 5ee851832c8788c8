// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User-saved map pin.

use serde::{Deserialize, Serialize};

/// A pin dropped on the map by a user, stored in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Document id: `<url-encoded uid>_<unix nanos>`
    pub id: String,
    /// Owner's user id (login cookie value on the frontend)
    pub uid: String,
    pub lat: f64,
    pub long: f64,
    /// When the pin was added (RFC 3339, UTC)
    pub created_at: String,
}
