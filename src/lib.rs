// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trainlog sync: decides which activity source may write workout data.
//!
//! Workouts can receive actual performance data from manual entry, Strava,
//! or Garmin. This crate holds the policy that admits or blocks each
//! provider import, plus a small HTTP service exposing it to sync jobs.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::ImportGate;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub import_gate: ImportGate,
}

impl AppState {
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        let import_gate = ImportGate::new(db.clone(), config.plan_concurrency);
        Self {
            config,
            db,
            import_gate,
        }
    }
}
