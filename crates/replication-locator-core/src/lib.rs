// crates/replication-locator-core/src/lib.rs
// ============================================================================
// Module: Replication Locator Core Library
// Description: Public API surface for the replication sequence locator.
// Purpose: Expose core types, interfaces, and the locate runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Replication Locator core finds the newest replication state descriptor whose
//! timestamp does not exceed a target instant. It normalizes the input URL into
//! a descriptor directory, reads the latest `state.txt`, and bisects the sharded
//! `AAA/BBB/CCC.state.txt` tree with O(log n) remote reads.
//! The core performs no network I/O of its own: remote reads go through the
//! [`Transport`] interface and diagnostics through the [`Reporter`] interface.
//! Invariants:
//! - Every call is stateless; nothing is cached across invocations.
//! - Sequence timestamps are assumed non-decreasing; violations yield an
//!   arbitrary (but never panicking) answer.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::LocateEvent;
pub use interfaces::MidpointOutcome;
pub use interfaces::Outcome;
pub use interfaces::ProbeTarget;
pub use interfaces::Reporter;
pub use interfaces::Transport;
pub use interfaces::TransportError;
pub use runtime::JsonLinesReporter;
pub use runtime::LocateRequest;
pub use runtime::Located;
pub use runtime::Locator;
pub use runtime::LocatorSettings;
pub use runtime::NoopReporter;
pub use runtime::ProbeSettings;
pub use runtime::SearchWindow;
pub use runtime::TextReporter;
