// crates/replication-locator-core/src/core/descriptor.rs
// ============================================================================
// Module: State Descriptors
// Description: Parser for `key=value` replication state descriptors.
// Purpose: Extract sequence numbers and timestamps from `state.txt` bodies.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Replication state descriptors are small Java-properties style files:
//!
//! ```text
//! #Sat May 17 00:20:07 UTC 2025
//! sequenceNumber=4628
//! timestamp=2025-05-16T00\:00\:00Z
//! ```
//!
//! Only `sequenceNumber` and `timestamp` are consumed; other keys are ignored.
//! Values are cleaned by removing backslash escapes and a trailing `Z` and by
//! trimming surrounding whitespace.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::error::LocateError;
use crate::core::sequence::SequenceNumber;
use crate::core::timestamp::normalize_timestamp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File name of the latest-state descriptor inside a descriptor directory.
pub const STATE_FILE_NAME: &str = "state.txt";
/// Descriptor key carrying the sequence number.
pub const SEQUENCE_NUMBER_FIELD: &str = "sequenceNumber";
/// Descriptor key carrying the UTC timestamp.
pub const TIMESTAMP_FIELD: &str = "timestamp";

// ============================================================================
// SECTION: Descriptor
// ============================================================================

/// Parsed replication state descriptor.
///
/// # Invariants
/// - The first occurrence of a key wins; later duplicates are ignored.
/// - Stored values are raw; cleanup happens on lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// URL the descriptor was read from, used in error reports.
    source: String,
    /// Raw `key -> value` entries.
    entries: BTreeMap<String, String>,
}

impl Descriptor {
    /// Parses a descriptor body read from `source`.
    #[must_use]
    pub fn parse(source: impl Into<String>, text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in text.lines() {
            let line = line.trim_start();
            if line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            entries.entry(key.to_string()).or_insert_with(|| value.to_string());
        }
        Self {
            source: source.into(),
            entries,
        }
    }

    /// Returns the URL the descriptor was read from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the raw, uncleaned value for `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the cleaned value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::FieldNotFound`] when the key is absent or its
    /// cleaned value is empty.
    pub fn field(&self, key: &str) -> Result<String, LocateError> {
        self.raw(key).map(clean_value).filter(|value| !value.is_empty()).ok_or_else(|| {
            LocateError::FieldNotFound {
                field: key.to_string(),
                url: self.source.clone(),
            }
        })
    }

    /// Returns the `sequenceNumber` field as a [`SequenceNumber`].
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::FieldNotFound`] when the field is missing and
    /// [`LocateError::InvalidSequenceNumber`] when it is not an unsigned integer.
    pub fn sequence_number(&self) -> Result<SequenceNumber, LocateError> {
        self.field(SEQUENCE_NUMBER_FIELD)?.parse()
    }

    /// Returns the `timestamp` field as unix epoch seconds.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::FieldNotFound`] when the field is missing and
    /// [`LocateError::InvalidTimestamp`] when it cannot be parsed.
    pub fn timestamp_epoch(&self) -> Result<i64, LocateError> {
        normalize_timestamp(&self.field(TIMESTAMP_FIELD)?)
    }
}

/// Cleans a raw descriptor value.
///
/// Removes backslash escapes, trims whitespace and line terminators, and drops
/// one trailing `Z`.
#[must_use]
pub fn clean_value(raw: &str) -> String {
    let unescaped: String = raw.chars().filter(|ch| *ch != '\\').collect();
    let trimmed = unescaped.trim();
    trimmed.strip_suffix('Z').unwrap_or(trimmed).trim().to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
