// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Provider sync records.

use crate::models::{Provider, SyncStatus};
use serde::{Deserialize, Serialize};

/// Link between one provider activity and one workout.
///
/// All providers share the `sync_records` collection; `provider` is the
/// discriminator and `(workout_id, provider)` is unique via the document ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRecord {
    pub workout_id: String,
    pub user_id: String,
    pub provider: Provider,
    /// Activity ID on the provider side
    pub external_activity_id: String,
    pub sync_status: SyncStatus,
    /// When the record last reached `synced` (ISO 8601)
    #[serde(default)]
    pub synced_at: Option<String>,
    /// Most recent failure message, if any
    #[serde(default)]
    pub last_error: Option<String>,
}

impl SyncRecord {
    /// Document ID for a `(workout, provider)` pair.
    pub fn document_id(workout_id: &str, provider: Provider) -> String {
        format!("{}_{}", urlencoding::encode(workout_id), provider)
    }

    pub fn is_synced(&self) -> bool {
        self.sync_status == SyncStatus::Synced
    }
}
