// crates/replication-locator-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: In-memory transport and recording reporter for core tests.
// Purpose: Drive the locator and bisection engine without a network.
// Dependencies: replication-locator-core
// ============================================================================

//! ## Overview
//! [`MemoryTransport`] serves descriptor bodies from a map and counts every
//! request; [`RecordingReporter`] keeps every reported event for assertions.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Duration;

use replication_locator_core::LocateEvent;
use replication_locator_core::Reporter;
use replication_locator_core::SequenceNumber;
use replication_locator_core::Transport;
use replication_locator_core::TransportError;
use replication_locator_core::format_epoch;

/// Descriptor directory used by most tests.
pub const BASE: &str = "https://replication.test/replication/day/";

/// Epoch of 2025-05-16T00:00:00Z.
pub const MAY_16: i64 = 1_747_353_600;

// ============================================================================
// SECTION: Memory Transport
// ============================================================================

/// In-memory transport keyed by absolute URL.
#[derive(Default)]
pub struct MemoryTransport {
    bodies: BTreeMap<String, String>,
    head_failures: Mutex<BTreeMap<String, u32>>,
    unreachable: BTreeSet<String>,
    gets: Mutex<Vec<String>>,
    heads: Mutex<Vec<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for GET requests to `url`.
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Publishes a descriptor for `sequence` at `epoch` under `base`.
    pub fn with_descriptor(self, base: &str, sequence: u64, epoch: i64) -> Self {
        let url = SequenceNumber::new(sequence).unwrap().descriptor_url(base);
        self.with_body(url, descriptor_body(sequence, epoch))
    }

    /// Publishes `state.txt` under `base`.
    pub fn with_state(self, base: &str, sequence: u64, epoch: i64) -> Self {
        self.with_body(format!("{base}state.txt"), descriptor_body(sequence, epoch))
    }

    /// Makes the first `count` HEAD requests to `url` fail.
    pub fn with_head_failures(self, url: impl Into<String>, count: u32) -> Self {
        self.head_failures.lock().unwrap().insert(url.into(), count);
        self
    }

    /// Makes every HEAD request to `url` fail.
    pub fn with_unreachable(mut self, url: impl Into<String>) -> Self {
        self.unreachable.insert(url.into());
        self
    }

    /// Returns the GET requests issued so far.
    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    /// Returns the HEAD requests issued so far.
    pub fn heads(&self) -> Vec<String> {
        self.heads.lock().unwrap().clone()
    }
}

impl Transport for MemoryTransport {
    fn get_text(&self, url: &str) -> Result<String, TransportError> {
        self.gets.lock().unwrap().push(url.to_string());
        self.bodies.get(url).cloned().ok_or(TransportError::Status(404))
    }

    fn head(&self, url: &str, _timeout: Duration) -> Result<(), TransportError> {
        self.heads.lock().unwrap().push(url.to_string());
        if self.unreachable.contains(url) {
            return Err(TransportError::Http("connection refused".to_string()));
        }
        if let Some(remaining) = self.head_failures.lock().unwrap().get_mut(url)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(TransportError::Status(503));
        }
        let exists = self.bodies.contains_key(url)
            || (url.ends_with('/') && self.bodies.keys().any(|key| key.starts_with(url)));
        if exists { Ok(()) } else { Err(TransportError::Status(404)) }
    }
}

/// Renders a descriptor body the way replication publishers do.
pub fn descriptor_body(sequence: u64, epoch: i64) -> String {
    let timestamp = format_epoch(epoch).unwrap().replace(':', "\\:");
    format!("#Generated by test\nsequenceNumber={sequence}\ntimestamp={timestamp}\n")
}

/// Builds a daily tree with sequences `0..count`, `epoch(seq) = seq * 86400 + offset`.
pub fn daily_tree(base: &str, count: u64, offset: i64) -> MemoryTransport {
    let mut transport = MemoryTransport::new();
    for sequence in 0..count {
        transport = transport.with_descriptor(base, sequence, daily_epoch(sequence, offset));
    }
    let latest = count - 1;
    transport.with_state(base, latest, daily_epoch(latest, offset))
}

/// Epoch of `sequence` in a daily tree.
pub fn daily_epoch(sequence: u64, offset: i64) -> i64 {
    i64::try_from(sequence).unwrap() * 86_400 + offset
}

// ============================================================================
// SECTION: Recording Reporter
// ============================================================================

/// Reporter that records every event.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<LocateEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    pub fn events(&self) -> Vec<LocateEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &LocateEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
