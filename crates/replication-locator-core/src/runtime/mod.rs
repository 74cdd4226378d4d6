// crates/replication-locator-core/src/runtime/mod.rs
// ============================================================================
// Module: Replication Locator Runtime
// Description: Remote reads, probing, bisection, and the locate entry point.
// Purpose: Resolve a target instant into a descriptor URL through a transport.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules combine the pure core helpers with the [`crate::Transport`]
//! and [`crate::Reporter`] seams. [`Locator::locate`] is the single entry point;
//! the bisection engine, descriptor reader, and accessibility prober are public
//! for callers that need the individual steps.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod bisect;
pub mod locator;
pub mod probe;
pub mod reader;
pub mod report;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bisect::BisectionEngine;
pub use bisect::SearchWindow;
pub use locator::LocateRequest;
pub use locator::Located;
pub use locator::Locator;
pub use locator::LocatorSettings;
pub use probe::ProbeSettings;
pub use probe::probe_accessible;
pub use reader::read_descriptor;
pub use reader::read_field;
pub use report::JsonLinesReporter;
pub use report::NoopReporter;
pub use report::TextReporter;
