// crates/replication-locator-core/src/core/mod.rs
// ============================================================================
// Module: Replication Locator Core Types
// Description: Pure building blocks for replication sequence lookups.
// Purpose: Provide deterministic, I/O-free normalization and URL helpers.
// Dependencies: serde, thiserror, time, url
// ============================================================================

//! ## Overview
//! Core types cover the replication period model, timestamp normalization,
//! sharded sequence paths, descriptor parsing, and base URL resolution. None of
//! these modules touch the network; the runtime layers remote reads on top.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod base_url;
pub mod descriptor;
pub mod error;
pub mod period;
pub mod sequence;
pub mod timestamp;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use base_url::resolve_base_url;
pub use descriptor::Descriptor;
pub use descriptor::SEQUENCE_NUMBER_FIELD;
pub use descriptor::STATE_FILE_NAME;
pub use descriptor::TIMESTAMP_FIELD;
pub use descriptor::clean_value;
pub use error::LocateError;
pub use period::Period;
pub use sequence::SequenceNumber;
pub use sequence::sequence_url;
pub use timestamp::format_epoch;
pub use timestamp::normalize_timestamp;
