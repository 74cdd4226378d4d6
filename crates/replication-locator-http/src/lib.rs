// crates/replication-locator-http/src/lib.rs
// ============================================================================
// Module: Replication Locator HTTP Library
// Description: Blocking HTTP transport for replication descriptor reads.
// Purpose: Implement the core transport interface on top of reqwest.
// Dependencies: replication-locator-core, reqwest, url
// ============================================================================

//! ## Overview
//! [`HttpTransport`] reads descriptor bodies with bounded redirects, a
//! per-fetch timeout, and a body size cap, and answers accessibility probes
//! with `HEAD` requests carrying their own timeout.
//! Invariants:
//! - Only `http` and `https` URLs are requested.
//! - Non-success statuses, oversized bodies, and non-UTF-8 bodies fail closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use transport::HttpTransport;
pub use transport::HttpTransportConfig;
