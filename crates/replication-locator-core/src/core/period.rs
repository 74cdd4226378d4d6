// crates/replication-locator-core/src/core/period.rs
// ============================================================================
// Module: Replication Period
// Description: Replication granularity (minute, hour, day).
// Purpose: Name period directories and estimate sequence gaps from time gaps.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each replication period publishes into its own sequence space. The period
//! name doubles as the directory segment in OSM-like layouts, and its
//! seconds-per-unit divisor converts an elapsed time into an approximate number
//! of sequences when estimating the initial search window.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::error::LocateError;

// ============================================================================
// SECTION: Period
// ============================================================================

/// Replication granularity.
///
/// # Invariants
/// - `seconds()` is strictly positive for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// One sequence per minute.
    Minute,
    /// One sequence per hour.
    Hour,
    /// One sequence per day.
    Day,
}

impl Period {
    /// All supported periods, finest first.
    pub const ALL: [Self; 3] = [Self::Minute, Self::Hour, Self::Day];

    /// Returns the period directory name used in OSM-like layouts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }

    /// Returns the nominal number of seconds between two sequences.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = LocateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == normalized)
            .ok_or_else(|| LocateError::InvalidPeriod(value.to_string()))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
