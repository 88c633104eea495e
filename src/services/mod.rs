// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod admission;
pub mod detector;
pub mod preference;

pub use admission::{decide, ImportGate, ImportOutcome, ImportTarget, ProviderImport};
pub use detector::detect_source;
pub use preference::preference_from_settings;
