// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Import admission verdicts.

use crate::models::{Provider, Source};
use serde::{Deserialize, Serialize};

/// Which admission rule produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// User only accepts manual logs
    ManualOnly,
    /// New workout, but the user prefers the other provider
    PrefersOtherSource,
    /// Auto mode keeps whichever source wrote first
    FirstSourceWins,
    /// Existing data is from a source other than the one being imported,
    /// and the user's preference does not name the importer
    DifferentSourceThanPreferred,
    /// Explicit preference allows replacing another source's data
    PreferenceOverride,
}

impl DecisionReason {
    /// Human-readable explanation for audit logs and API responses.
    pub fn message(&self) -> &'static str {
        match self {
            DecisionReason::ManualOnly => {
                "User prefers manual entry only; external imports are disabled"
            }
            DecisionReason::PrefersOtherSource => {
                "User prefers a different activity source for new workouts"
            }
            DecisionReason::FirstSourceWins => {
                "Workout already has data from another source (first source wins under auto mode)"
            }
            DecisionReason::DifferentSourceThanPreferred => {
                "Workout already has data from a different source than preferred"
            }
            DecisionReason::PreferenceOverride => {
                "User preference overrides data from another source"
            }
        }
    }
}

/// Result of an import admission check. Computed per call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecision {
    pub should_proceed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DecisionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_source: Option<Source>,
    pub user_preference: Source,
}

impl ImportDecision {
    pub fn allow(user_preference: Source, existing_source: Option<Source>) -> Self {
        Self {
            should_proceed: true,
            reason: None,
            existing_source,
            user_preference,
        }
    }

    pub fn block(
        user_preference: Source,
        existing_source: Option<Source>,
        reason: DecisionReason,
    ) -> Self {
        Self {
            should_proceed: false,
            reason: Some(reason),
            existing_source,
            user_preference,
        }
    }

    /// Whether proceeding replaces data written by a different source.
    pub fn is_overwrite(&self) -> bool {
        self.should_proceed && self.reason == Some(DecisionReason::PreferenceOverride)
    }

    fn action(&self) -> &'static str {
        if self.should_proceed {
            "allow"
        } else {
            "block"
        }
    }

    /// Emit the audit record for this decision.
    pub fn audit(&self, user_id: &str, workout_id: Option<&str>, import_source: Provider) {
        let reason = self.reason.map(|r| r.message());
        let existing_source = self.existing_source.map(|s| s.as_str());

        if self.is_overwrite() {
            tracing::warn!(
                target: "audit",
                action = self.action(),
                user_id,
                workout_id,
                import_source = import_source.as_str(),
                existing_source,
                user_preference = self.user_preference.as_str(),
                reason,
                "Import overwrites data from another source"
            );
        } else {
            tracing::info!(
                target: "audit",
                action = self.action(),
                user_id,
                workout_id,
                import_source = import_source.as_str(),
                existing_source,
                user_preference = self.user_preference.as_str(),
                reason,
                "Import admission decision"
            );
        }
    }
}
