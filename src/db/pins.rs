// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pin storage keyed by user id.
//!
//! Backed by Firestore in deployment, or by an in-process map for local
//! development and tests.

use crate::db::collections;
use crate::error::AppError;
use crate::models::Pin;
use chrono::{SecondsFormat, Utc};
use dashmap::DashMap;
use std::sync::Arc;

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
pub const BATCH_SIZE: usize = 400;

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(Arc<DashMap<String, Vec<Pin>>>),
}

/// Pin store client.
#[derive(Clone)]
pub struct PinStore {
    backend: Backend,
}

impl PinStore {
    /// Connect to Firestore.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// In-process store. Pins are lost when the process exits.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    /// Build a new pin for `uid`, stamped with the current time.
    pub fn new_pin(uid: &str, lat: f64, long: f64) -> Pin {
        let now = Utc::now();
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros() * 1000);
        Pin {
            id: format!("{}_{}", urlencoding::encode(uid), nanos),
            uid: uid.to_string(),
            lat,
            long,
            created_at: now.to_rfc3339_opts(SecondsFormat::Nanos, true),
        }
    }

    /// Store a pin.
    pub async fn add_pin(&self, pin: &Pin) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::PINS)
                    .document_id(&pin.id)
                    .object(pin)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
            Backend::Memory(map) => {
                map.entry(pin.uid.clone()).or_default().push(pin.clone());
            }
        }

        tracing::debug!(uid = %pin.uid, id = %pin.id, "Added pin");
        Ok(())
    }

    /// All pins for a user, oldest first.
    pub async fn list_pins(&self, uid: &str) -> Result<Vec<Pin>, AppError> {
        let mut pins: Vec<Pin> = match &self.backend {
            Backend::Firestore(client) => {
                let uid = uid.to_string();
                client
                    .fluent()
                    .select()
                    .from(collections::PINS)
                    .filter(move |q| q.for_all([q.field("uid").eq(uid.clone())]))
                    .obj()
                    .query()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
            }
            Backend::Memory(map) => map
                .get(uid)
                .map(|pins| pins.value().clone())
                .unwrap_or_default(),
        };

        // Fixed-width timestamps sort lexicographically
        pins.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(pins)
    }

    /// Delete every pin for a user. Returns the number of pins removed.
    pub async fn clear_pins(&self, uid: &str) -> Result<usize, AppError> {
        let count = match &self.backend {
            Backend::Firestore(client) => {
                let pins = self.list_pins(uid).await?;
                Self::batch_delete(client, &pins).await?;
                pins.len()
            }
            Backend::Memory(map) => map.remove(uid).map(|(_, pins)| pins.len()).unwrap_or(0),
        };

        tracing::info!(uid, count, "Cleared user pins");
        Ok(count)
    }

    /// Helper to batch delete pin documents using transactions.
    async fn batch_delete(
        client: &firestore::FirestoreDb,
        pins: &[Pin],
    ) -> Result<(), AppError> {
        for chunk in pins.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for pin in chunk {
                client
                    .fluent()
                    .delete()
                    .from(collections::PINS)
                    .document_id(&pin.id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add pin deletion to transaction: {}",
                            e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }
}
