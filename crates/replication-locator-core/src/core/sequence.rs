// crates/replication-locator-core/src/core/sequence.rs
// ============================================================================
// Module: Sequence Numbers
// Description: Replication sequence numbers and their sharded descriptor paths.
// Purpose: Map sequence numbers to `AAA/BBB/CCC.state.txt` URLs and back.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A sequence number is zero-padded to nine digits and split into three
//! three-digit groups: sequence `1234` lives at `000/001/234.state.txt` under
//! the descriptor directory.
//! Invariants:
//! - Valid sequence numbers lie in `0..=999_999_999`.
//! - [`SequenceNumber::descriptor_path`] and [`SequenceNumber::from_descriptor_path`]
//!   are exact inverses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::error::LocateError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File suffix of per-sequence descriptors.
pub const DESCRIPTOR_SUFFIX: &str = ".state.txt";

/// Length of the `/ddd/ddd/ddd` shard segment preceding [`DESCRIPTOR_SUFFIX`].
const SHARD_SEGMENT_LEN: usize = 12;

// ============================================================================
// SECTION: Sequence Number
// ============================================================================

/// Replication sequence number.
///
/// # Invariants
/// - The wrapped value never exceeds [`SequenceNumber::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u64")]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    /// Largest sequence number addressable by the nine-digit path scheme.
    pub const MAX: u64 = 999_999_999;

    /// Creates a sequence number, rejecting values above [`Self::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::InvalidSequenceNumber`] when the value does not fit
    /// in nine digits.
    pub fn new(value: u64) -> Result<Self, LocateError> {
        if value > Self::MAX {
            return Err(LocateError::InvalidSequenceNumber(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the raw sequence value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the sharded relative path, e.g. `000/001/234.state.txt`.
    #[must_use]
    pub fn descriptor_path(self) -> String {
        let value = self.0;
        format!(
            "{:03}/{:03}/{:03}{DESCRIPTOR_SUFFIX}",
            value / 1_000_000,
            (value / 1_000) % 1_000,
            value % 1_000
        )
    }

    /// Returns the descriptor URL for this sequence under `base`.
    #[must_use]
    pub fn descriptor_url(self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.descriptor_path())
    }

    /// Recovers the sequence number from a value ending in `/ddd/ddd/ddd.state.txt`.
    #[must_use]
    pub fn from_descriptor_path(value: &str) -> Option<Self> {
        split_descriptor_path(value).map(|(_, sequence)| sequence)
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for SequenceNumber {
    type Error = LocateError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for SequenceNumber {
    type Error = LocateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let unsigned = u64::try_from(value)
            .map_err(|_| LocateError::InvalidSequenceNumber(value.to_string()))?;
        Self::new(unsigned)
    }
}

impl From<SequenceNumber> for u64 {
    fn from(value: SequenceNumber) -> Self {
        value.0
    }
}

impl From<SequenceNumber> for i64 {
    fn from(value: SequenceNumber) -> Self {
        // MAX fits comfortably in i64.
        Self::try_from(value.0).unwrap_or(Self::MAX)
    }
}

impl FromStr for SequenceNumber {
    type Err = LocateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(LocateError::InvalidSequenceNumber(value.to_string()));
        }
        let parsed = trimmed
            .parse::<u64>()
            .map_err(|_| LocateError::InvalidSequenceNumber(value.to_string()))?;
        Self::new(parsed)
    }
}

// ============================================================================
// SECTION: URL Builder
// ============================================================================

/// Builds the descriptor URL for `sequence` under the directory `base`.
///
/// # Errors
///
/// Returns [`LocateError::InvalidSequenceNumber`] when `sequence` is negative or
/// exceeds nine digits.
pub fn sequence_url(base: &str, sequence: i64) -> Result<String, LocateError> {
    Ok(SequenceNumber::try_from(sequence)?.descriptor_url(base))
}

/// Splits a value ending in `/ddd/ddd/ddd.state.txt` into its parent directory
/// (without trailing slash) and the encoded sequence number.
pub(crate) fn split_descriptor_path(value: &str) -> Option<(&str, SequenceNumber)> {
    let stem = value.strip_suffix(DESCRIPTOR_SUFFIX)?;
    let split = stem.len().checked_sub(SHARD_SEGMENT_LEN)?;
    let prefix = stem.get(..split)?;
    let shard = stem.get(split..)?;
    let mut sequence = 0_u64;
    for (index, byte) in shard.bytes().enumerate() {
        if index % 4 == 0 {
            if byte != b'/' {
                return None;
            }
            continue;
        }
        if !byte.is_ascii_digit() {
            return None;
        }
        sequence = sequence * 10 + u64::from(byte - b'0');
    }
    Some((prefix, SequenceNumber(sequence)))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use super::*;

    #[test]
    fn url_uses_three_zero_padded_groups() {
        assert_eq!(
            sequence_url("https://h/r/minute/", 1234).unwrap(),
            "https://h/r/minute/000/001/234.state.txt"
        );
        assert_eq!(sequence_url("https://h/r/day", 0).unwrap(), "https://h/r/day/000/000/000.state.txt");
        assert_eq!(
            sequence_url("https://h/r/day//", 999_999_999).unwrap(),
            "https://h/r/day/999/999/999.state.txt"
        );
    }

    #[test]
    fn out_of_range_sequences_are_rejected() {
        assert!(matches!(sequence_url("https://h/", -1), Err(LocateError::InvalidSequenceNumber(_))));
        assert!(matches!(
            sequence_url("https://h/", 1_000_000_000),
            Err(LocateError::InvalidSequenceNumber(_))
        ));
    }

    #[test]
    fn sequence_field_parsing_is_strict() {
        assert_eq!(" 6203\n".parse::<SequenceNumber>().unwrap().get(), 6203);
        assert!("-3".parse::<SequenceNumber>().is_err());
        assert!("12a".parse::<SequenceNumber>().is_err());
        assert!("".parse::<SequenceNumber>().is_err());
        assert!("1000000000".parse::<SequenceNumber>().is_err());
    }

    #[test]
    fn split_rejects_malformed_shards() {
        let (prefix, sequence) = split_descriptor_path("https://h/000/001/234.state.txt").unwrap();
        assert_eq!(prefix, "https://h");
        assert_eq!(sequence.get(), 1234);
        assert!(split_descriptor_path("https://h/000/001/2345.state.txt").is_none());
        assert!(split_descriptor_path("https://h/00a/001/234.state.txt").is_none());
        assert!(split_descriptor_path("https://h/000-001/234.state.txt").is_none());
        assert!(split_descriptor_path("01/234.state.txt").is_none());
        assert!(split_descriptor_path("https://h/state.txt").is_none());
    }
}
