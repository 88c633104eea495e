//! Application configuration loaded from environment variables.

use std::env;

/// Default number of workouts evaluated concurrently in one import plan.
pub const DEFAULT_PLAN_CONCURRENCY: usize = 16;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID (Firestore database)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Maximum concurrent admission checks when planning a sync sweep
    pub plan_concurrency: usize,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            plan_concurrency: DEFAULT_PLAN_CONCURRENCY,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first if present. Set `FIRESTORE_EMULATOR_HOST`
    /// to talk to a local emulator instead of production Firestore.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("GCP_PROJECT_ID"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            plan_concurrency: parse_concurrency(env::var("IMPORT_PLAN_CONCURRENCY").ok())?,
        })
    }
}

fn parse_concurrency(value: Option<String>) -> Result<usize, ConfigError> {
    match value {
        None => Ok(DEFAULT_PLAN_CONCURRENCY),
        Some(v) => v
            .trim()
            .parse::<usize>()
            .map(|n| n.max(1))
            .map_err(|_| ConfigError::Invalid("IMPORT_PLAN_CONCURRENCY", v)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
