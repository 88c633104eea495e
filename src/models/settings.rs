//! User settings model.

use serde::{Deserialize, Serialize};

/// Per-user settings document.
///
/// `preferences` is owned by the settings UI and treated as opaque here;
/// only `preferred_activity_source` is read by the import pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    /// User ID (also used as document ID, so may be absent from the body)
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub preferences: serde_json::Value,
}

/// Key of the activity source preference inside `preferences`.
pub const PREFERRED_ACTIVITY_SOURCE: &str = "preferred_activity_source";
