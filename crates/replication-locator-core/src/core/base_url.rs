// crates/replication-locator-core/src/core/base_url.rs
// ============================================================================
// Module: Base URL Resolution
// Description: Normalizes user-supplied URLs into a descriptor directory.
// Purpose: Accept roots, period directories, state files, or sequence files.
// Dependencies: url
// ============================================================================

//! ## Overview
//! Users point the locator at whatever replication URL they have at hand. The
//! resolver strips query and fragment, reduces a `state.txt` or
//! `ddd/ddd/ddd.state.txt` URL to its directory, and in OSM-like layouts appends
//! the period segment when it is missing.
//! Invariants:
//! - A resolved directory always ends with `/`.
//! - Resolution is pure; no network access is performed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use url::Url;

use crate::core::descriptor::STATE_FILE_NAME;
use crate::core::error::LocateError;
use crate::core::period::Period;
use crate::core::sequence::split_descriptor_path;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves `raw` into the directory that directly contains `state.txt`.
///
/// When `osm_like` is set and the directory does not already end in
/// `<period>/`, the period segment is appended. Otherwise the stripped
/// directory is used as-is regardless of `period`.
///
/// # Errors
///
/// Returns [`LocateError::InvalidBaseUrl`] when the input is empty or not an
/// absolute URL with a host.
pub fn resolve_base_url(raw: &str, period: Period, osm_like: bool) -> Result<String, LocateError> {
    let invalid = || LocateError::InvalidBaseUrl(raw.to_string());
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let mut url = Url::parse(trimmed).map_err(|_| invalid())?;
    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    url.set_query(None);
    url.set_fragment(None);

    let mut directory = strip_descriptor_file(url.as_str()).to_string();
    if !directory.ends_with('/') {
        directory.push('/');
    }
    if osm_like && !ends_with_segment(&directory, period.as_str()) {
        directory.push_str(period.as_str());
        directory.push('/');
    }
    Ok(directory)
}

/// Removes a trailing sequence descriptor or `state.txt` file name.
fn strip_descriptor_file(url: &str) -> &str {
    if let Some((parent, _)) = split_descriptor_path(url) {
        return parent;
    }
    url.strip_suffix(STATE_FILE_NAME).filter(|parent| parent.ends_with('/')).unwrap_or(url)
}

/// Returns true when `directory` ends with the `/<segment>/` path component.
fn ends_with_segment(directory: &str, segment: &str) -> bool {
    directory
        .strip_suffix('/')
        .and_then(|rest| rest.strip_suffix(segment))
        .is_some_and(|rest| rest.ends_with('/'))
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
    fn sequence_file_reduces_to_period_directory() {
        assert_eq!(
            resolve_base_url("https://h/r/hour/000/001/234.state.txt", Period::Hour, true).unwrap(),
            "https://h/r/hour/"
        );
    }

    #[test]
    fn replication_root_gains_period_segment() {
        assert_eq!(resolve_base_url("https://h/r/", Period::Hour, true).unwrap(), "https://h/r/hour/");
        assert_eq!(resolve_base_url("https://h/r", Period::Day, true).unwrap(), "https://h/r/day/");
        assert_eq!(resolve_base_url("https://h", Period::Minute, true).unwrap(), "https://h/minute/");
    }

    #[test]
    fn custom_layout_is_left_untouched() {
        assert_eq!(resolve_base_url("https://h/custom/", Period::Hour, false).unwrap(), "https://h/custom/");
        assert_eq!(resolve_base_url("https://h/custom", Period::Day, false).unwrap(), "https://h/custom/");
    }

    #[test]
    fn state_file_and_query_are_stripped() {
        assert_eq!(
            resolve_base_url("https://h/r/minute/state.txt?cache=0#top", Period::Minute, true).unwrap(),
            "https://h/r/minute/"
        );
        assert_eq!(
            resolve_base_url(" https://h/mirror/state.txt ", Period::Minute, false).unwrap(),
            "https://h/mirror/"
        );
    }

    #[test]
    fn lookalike_file_names_are_kept() {
        assert_eq!(
            resolve_base_url("https://h/r/mystate.txt", Period::Day, false).unwrap(),
            "https://h/r/mystate.txt/"
        );
        assert_eq!(
            resolve_base_url("https://h/r/thehour/", Period::Hour, true).unwrap(),
            "https://h/r/thehour/hour/"
        );
    }

    #[test]
    fn unusable_inputs_are_rejected() {
        for raw in ["", "   ", "not a url", "mailto:osm@example.org", "/relative/path/", "file:///tmp/"] {
            assert!(
                matches!(resolve_base_url(raw, Period::Hour, true), Err(LocateError::InvalidBaseUrl(_))),
                "{raw}"
            );
        }
    }
}
