// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity sources, import providers and sync status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a workout's actual data comes from, or where a user prefers it to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// First source to write a workout wins
    #[default]
    Auto,
    /// Human-entered logs only
    Manual,
    Strava,
    Garmin,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Auto => "auto",
            Source::Manual => "manual",
            Source::Strava => "strava",
            Source::Garmin => "garmin",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a string that is not one of the known source names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown activity source: {0}")]
pub struct UnknownSource(pub String);

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Source::Auto),
            "manual" => Ok(Source::Manual),
            "strava" => Ok(Source::Strava),
            "garmin" => Ok(Source::Garmin),
            other => Err(UnknownSource(other.to_string())),
        }
    }
}

/// External provider that can push activity data into a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Strava,
    Garmin,
}

impl Provider {
    /// Order in which synced records claim ownership of a workout.
    ///
    /// When stale `synced` rows exist for more than one provider, the first
    /// provider in this list wins.
    pub const PRECEDENCE: [Provider; 2] = [Provider::Strava, Provider::Garmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Strava => "strava",
            Provider::Garmin => "garmin",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strava" => Ok(Provider::Strava),
            "garmin" => Ok(Provider::Garmin),
            other => Err(UnknownSource(other.to_string())),
        }
    }
}

impl From<Provider> for Source {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Strava => Source::Strava,
            Provider::Garmin => Source::Garmin,
        }
    }
}

impl PartialEq<Provider> for Source {
    fn eq(&self, other: &Provider) -> bool {
        *self == Source::from(*other)
    }
}

/// Status of a provider activity linked to a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Pending,
    Synced,
    Failed,
    /// Replaced by another provider's import under an explicit preference
    Superseded,
    /// Any status value written by another version of the pipeline
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_round_trips_through_str() {
        for source in [Source::Auto, Source::Manual, Source::Strava, Source::Garmin] {
            assert_eq!(source.as_str().parse::<Source>().unwrap(), source);
        }
    }

    #[test]
    fn test_source_parse_is_case_sensitive() {
        assert!("Strava".parse::<Source>().is_err());
        assert!("".parse::<Source>().is_err());
        assert!("polar".parse::<Source>().is_err());
    }

    #[test]
    fn test_source_default_is_auto() {
        assert_eq!(Source::default(), Source::Auto);
    }

    #[test]
    fn test_provider_rejects_non_provider_sources() {
        assert!("auto".parse::<Provider>().is_err());
        assert!("manual".parse::<Provider>().is_err());
        assert_eq!("garmin".parse::<Provider>().unwrap(), Provider::Garmin);
    }

    #[test]
    fn test_source_compares_with_provider() {
        assert!(Source::Strava == Provider::Strava);
        assert!(Source::Garmin != Provider::Strava);
        assert!(Source::Auto != Provider::Garmin);
    }

    #[test]
    fn test_unknown_sync_status_deserializes() {
        let status: SyncStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status, SyncStatus::Unknown);

        let status: SyncStatus = serde_json::from_str("\"synced\"").unwrap();
        assert_eq!(status, SyncStatus::Synced);

        let status: SyncStatus = serde_json::from_str("\"superseded\"").unwrap();
        assert_eq!(status, SyncStatus::Superseded);
    }
}
