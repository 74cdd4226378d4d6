// crates/replication-locator-core/src/core/timestamp.rs
// ============================================================================
// Module: Timestamp Normalization
// Description: Format-tolerant UTC timestamp parsing into epoch seconds.
// Purpose: Compare user targets and descriptor timestamps on one scale.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Accepts `YYYY-MM-DD[<T|space>HH[:MM[:SS]]][Z]`. A trailing `Z` is dropped,
//! `T` becomes a space, and the remainder is matched against an ordered list of
//! formats from most to least specific. Every value is interpreted as UTC.
//! Invariants:
//! - The first matching format wins; a date-only value means midnight.
//! - Parsing is pure and identical on every host platform.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::core::error::LocateError;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Date-time formats, most specific first.
const DATE_TIME_FORMATS: [&[BorrowedFormatItem<'static>]; 3] = [
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]"),
];

/// Date-only fallback format.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Canonical rendering used in diagnostics.
const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Converts a UTC timestamp string into unix epoch seconds.
///
/// # Errors
///
/// Returns [`LocateError::InvalidTimestamp`] when no accepted format matches.
pub fn normalize_timestamp(input: &str) -> Result<i64, LocateError> {
    let trimmed = input.trim();
    let without_zone = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    let candidate = without_zone.replace('T', " ");

    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = PrimitiveDateTime::parse(&candidate, format) {
            return Ok(parsed.assume_utc().unix_timestamp());
        }
    }
    Date::parse(&candidate, DATE_FORMAT)
        .map(|date| date.midnight().assume_utc().unix_timestamp())
        .map_err(|_| LocateError::InvalidTimestamp(input.to_string()))
}

/// Renders epoch seconds as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// Returns `None` when the epoch is outside the representable date range.
#[must_use]
pub fn format_epoch(epoch: i64) -> Option<String> {
    OffsetDateTime::from_unix_timestamp(epoch).ok()?.format(DISPLAY_FORMAT).ok()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
