// crates/replication-locator-core/src/runtime/reader.rs
// ============================================================================
// Module: Remote Descriptor Reader
// Description: Fetches descriptor resources and extracts fields.
// Purpose: Bridge the transport seam and the descriptor parser.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Every read goes to the transport; nothing is cached, so concurrent updates by
//! the publisher are always observed on the next read.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::descriptor::Descriptor;
use crate::core::error::LocateError;
use crate::interfaces::Transport;

// ============================================================================
// SECTION: Reader
// ============================================================================

/// Fetches and parses the descriptor at `url`.
///
/// # Errors
///
/// Returns [`LocateError::Fetch`] when the transport fails.
pub fn read_descriptor(transport: &dyn Transport, url: &str) -> Result<Descriptor, LocateError> {
    let body = transport.get_text(url).map_err(|source| LocateError::Fetch {
        url: url.to_string(),
        source,
    })?;
    Ok(Descriptor::parse(url, &body))
}

/// Fetches the descriptor at `url` and returns the cleaned value of `field`.
///
/// # Errors
///
/// Returns [`LocateError::Fetch`] when the transport fails and
/// [`LocateError::FieldNotFound`] when the field is absent or empty.
pub fn read_field(transport: &dyn Transport, url: &str, field: &str) -> Result<String, LocateError> {
    read_descriptor(transport, url)?.field(field)
}
