// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod decision;
pub mod settings;
pub mod source;
pub mod sync;
pub mod workout;

pub use decision::{DecisionReason, ImportDecision};
pub use settings::UserSettings;
pub use source::{Provider, Source, SyncStatus};
pub use sync::SyncRecord;
pub use workout::{Workout, WorkoutActuals, WorkoutMetrics};
