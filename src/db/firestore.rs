// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - User settings (opaque preferences document)
//! - Workouts (planned sessions and their actuals)
//! - Sync records (provider activity links, one per workout and provider)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Provider, SyncRecord, UserSettings, Workout};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
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
            client: Some(client),
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
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Settings Operations ────────────────────────────────

    /// Get the settings document for a user.
    pub async fn get_user_settings(&self, user_id: &str) -> Result<Option<UserSettings>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USER_SETTINGS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a user's settings document.
    pub async fn set_user_settings(&self, settings: &UserSettings) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USER_SETTINGS)
            .document_id(&settings.user_id)
            .object(settings)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Get a workout by ID.
    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .obj()
            .one(workout_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a workout.
    pub async fn set_workout(&self, workout: &Workout) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(&workout.id)
            .object(workout)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Sync Record Operations ──────────────────────────────────

    /// Get the sync record for one provider on a workout.
    pub async fn get_sync_record(
        &self,
        workout_id: &str,
        provider: Provider,
    ) -> Result<Option<SyncRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::SYNC_RECORDS)
            .obj()
            .one(&SyncRecord::document_id(workout_id, provider))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every provider's sync record for a workout.
    pub async fn get_sync_records_for_workout(
        &self,
        workout_id: &str,
    ) -> Result<Vec<SyncRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SYNC_RECORDS)
            .filter(|q| q.for_all([q.field("workout_id").eq(workout_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a sync record.
    pub async fn set_sync_record(&self, record: &SyncRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::SYNC_RECORDS)
            .document_id(SyncRecord::document_id(&record.workout_id, record.provider))
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Atomic Import ───────────────────────────────────────────

    /// Atomically write imported actuals to a workout and mark its sync record.
    ///
    /// The workout, the importing provider's record and any `superseded`
    /// records of other providers are committed in one Firestore transaction,
    /// so a reader never sees actuals without the sync record that proves
    /// their provenance.
    pub async fn apply_import_atomic(
        &self,
        workout: &Workout,
        record: &SyncRecord,
        superseded: &[SyncRecord],
    ) -> Result<(), AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(&workout.id)
            .object(workout)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add workout to transaction: {}", e))
            })?;

        for sync_record in std::iter::once(record).chain(superseded) {
            client
                .fluent()
                .update()
                .in_col(collections::SYNC_RECORDS)
                .document_id(SyncRecord::document_id(
                    &sync_record.workout_id,
                    sync_record.provider,
                ))
                .object(sync_record)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!(
                        "Failed to add sync record to transaction: {}",
                        e
                    ))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            workout_id = %workout.id,
            provider = %record.provider,
            external_activity_id = %record.external_activity_id,
            superseded = superseded.len(),
            "Import committed atomically"
        );

        Ok(())
    }
}
