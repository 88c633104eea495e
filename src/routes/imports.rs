// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Import admission routes, called by provider sync jobs.

use crate::error::{AppError, Result};
use crate::models::{ImportDecision, Provider, Source};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Upper bound on workouts in a single plan request.
pub const MAX_PLAN_CANDIDATES: usize = 500;

const MAX_ID_LENGTH: usize = 128;

/// Import admission routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/imports/admission", post(check_admission))
        .route("/api/imports/plan", post(plan_imports))
        .route(
            "/api/users/{user_id}/activity-source",
            get(get_user_preference),
        )
        .route(
            "/api/workouts/{workout_id}/activity-source",
            get(get_workout_source),
        )
}

fn validate_id(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    if value.len() > MAX_ID_LENGTH {
        return Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, MAX_ID_LENGTH
        )));
    }
    Ok(())
}

// ─── Admission ───────────────────────────────────────────────

/// Admission check request.
#[derive(Debug, Deserialize)]
pub struct AdmissionRequest {
    pub user_id: String,
    /// Absent when the import would create a new workout
    #[serde(default)]
    pub workout_id: Option<String>,
    pub source: Provider,
}

/// Decide whether a single import may proceed.
async fn check_admission(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdmissionRequest>,
) -> Result<Json<ImportDecision>> {
    validate_id("user_id", &request.user_id)?;
    if let Some(workout_id) = &request.workout_id {
        validate_id("workout_id", workout_id)?;
    }

    let decision = state
        .import_gate
        .should_allow_import(
            &request.user_id,
            request.workout_id.as_deref(),
            request.source,
        )
        .await;

    decision.audit(
        &request.user_id,
        request.workout_id.as_deref(),
        request.source,
    );

    Ok(Json(decision))
}

/// Batch admission request for a sync sweep.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub user_id: String,
    /// `null` entries stand for workouts the import would create
    pub workout_ids: Vec<Option<String>>,
    pub source: Provider,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub decisions: Vec<ImportDecision>,
}

/// Decide admission for many workouts of one user.
async fn plan_imports(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>> {
    validate_id("user_id", &request.user_id)?;
    if request.workout_ids.len() > MAX_PLAN_CANDIDATES {
        return Err(AppError::BadRequest(format!(
            "At most {} workouts per plan",
            MAX_PLAN_CANDIDATES
        )));
    }
    for workout_id in request.workout_ids.iter().flatten() {
        validate_id("workout_id", workout_id)?;
    }

    let decisions = state
        .import_gate
        .plan_imports(&request.user_id, &request.workout_ids, request.source)
        .await;

    for (workout_id, decision) in request.workout_ids.iter().zip(&decisions) {
        decision.audit(&request.user_id, workout_id.as_deref(), request.source);
    }

    Ok(Json(PlanResponse { decisions }))
}

// ─── Source Lookups ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PreferenceResponse {
    pub user_id: String,
    pub preference: Source,
}

/// Get a user's preferred activity source.
async fn get_user_preference(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<PreferenceResponse>> {
    validate_id("user_id", &user_id)?;
    let preference = state.import_gate.user_activity_preference(&user_id).await;
    Ok(Json(PreferenceResponse {
        user_id,
        preference,
    }))
}

#[derive(Debug, Serialize)]
pub struct WorkoutSourceResponse {
    pub workout_id: String,
    /// `null` when no source has written data yet
    pub source: Option<Source>,
}

/// Get the source that currently owns a workout's data.
async fn get_workout_source(
    State(state): State<Arc<AppState>>,
    Path(workout_id): Path<String>,
) -> Result<Json<WorkoutSourceResponse>> {
    validate_id("workout_id", &workout_id)?;
    let source = state.import_gate.workout_activity_source(&workout_id).await;
    Ok(Json(WorkoutSourceResponse { workout_id, source }))
}
