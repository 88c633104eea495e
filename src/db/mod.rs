//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USER_SETTINGS: &str = "user_settings";
    pub const WORKOUTS: &str = "workouts";
    /// Provider sync records (keyed by `{workout_id}_{provider}`)
    pub const SYNC_RECORDS: &str = "sync_records";
}
