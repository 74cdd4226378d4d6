// crates/replication-locator-core/tests/bisect.rs
// ============================================================================
// Module: Bisection Engine Tests
// Description: Window search over in-memory descriptor tables.
// Purpose: Validate candidate selection, gap handling, and fetch bounds.
// Dependencies: replication-locator-core, proptest
// ============================================================================

//! ## Overview
//! Exercises [`BisectionEngine::search`] against synthetic monotonic tables,
//! including tables with unpublished or malformed descriptors.

#![allow(dead_code, reason = "Common module may have unused helpers.")]
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

mod common;

use std::collections::BTreeSet;

use proptest::prelude::*;
use replication_locator_core::LocateError;
use replication_locator_core::LocateEvent;
use replication_locator_core::MidpointOutcome;
use replication_locator_core::NoopReporter;
use replication_locator_core::SearchWindow;
use replication_locator_core::runtime::BisectionEngine;

use crate::common::BASE;
use crate::common::MemoryTransport;
use crate::common::RecordingReporter;

/// Builds a minutely table for every sequence in `present`, `epoch = seq * 60`.
fn minutely_table(present: impl IntoIterator<Item = u64>) -> MemoryTransport {
    present.into_iter().fold(MemoryTransport::new(), |transport, sequence| {
        transport.with_descriptor(BASE, sequence, i64::try_from(sequence).unwrap() * 60)
    })
}

// ============================================================================
// SECTION: Selection
// ============================================================================

#[test]
fn finds_newest_sequence_at_or_before_target() {
    let transport = minutely_table(0..100);
    let engine = BisectionEngine::new(&transport, &NoopReporter, BASE);
    let best = engine.search(SearchWindow::new(0, 99), 50 * 60 + 30).unwrap();
    assert_eq!(best.get(), 50);
}

#[test]
fn exact_timestamp_match_is_selected() {
    let transport = minutely_table(0..100);
    let engine = BisectionEngine::new(&transport, &NoopReporter, BASE);
    let best = engine.search(SearchWindow::new(0, 99), 73 * 60).unwrap();
    assert_eq!(best.get(), 73);
}

#[test]
fn target_before_window_fails_with_no_suitable_sequence() {
    let transport = minutely_table(10..20);
    let engine = BisectionEngine::new(&transport, &NoopReporter, BASE);
    let err = engine.search(SearchWindow::new(10, 19), 5 * 60).unwrap_err();
    assert!(matches!(
        err,
        LocateError::NoSuitableSequence { ref target } if target == "1970-01-01T00:05:00Z"
    ));
}

#[test]
fn window_search_uses_logarithmic_fetches() {
    let transport = minutely_table(0..4629);
    let engine = BisectionEngine::new(&transport, &NoopReporter, BASE);
    let best = engine.search(SearchWindow::new(0, 4628), 1234 * 60 + 1).unwrap();
    assert_eq!(best.get(), 1234);
    assert!(transport.gets().len() <= 14, "fetched {} descriptors", transport.gets().len());
}

// ============================================================================
// SECTION: Gaps
// ============================================================================

#[test]
fn unpublished_leading_edge_is_treated_as_too_new() {
    let transport = minutely_table(0..80);
    let engine = BisectionEngine::new(&transport, &NoopReporter, BASE);
    let best = engine.search(SearchWindow::new(0, 99), 1_000 * 60).unwrap();
    assert_eq!(best.get(), 79);
}

#[test]
fn malformed_and_missing_midpoints_are_reported_distinctly() {
    let malformed_url = replication_locator_core::sequence_url(BASE, 1).unwrap();
    let transport = MemoryTransport::new()
        .with_descriptor(BASE, 0, 0)
        .with_body(malformed_url, "sequenceNumber=1\ntimestamp=not a date\n");
    let reporter = RecordingReporter::new();
    let engine = BisectionEngine::new(&transport, &reporter, BASE);

    let best = engine.search(SearchWindow::new(0, 3), 10_000).unwrap();
    assert_eq!(best.get(), 0);

    let outcomes: Vec<(i64, MidpointOutcome)> = reporter
        .events()
        .into_iter()
        .filter_map(|event| match event {
            LocateEvent::MidpointProbed {
                sequence,
                outcome,
                ..
            } => Some((sequence, outcome)),
            _ => None,
        })
        .collect();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].0, 1);
    assert!(matches!(outcomes[0].1, MidpointOutcome::Malformed { .. }));
    assert_eq!(outcomes[1], (0, MidpointOutcome::AtOrBefore { epoch: 0 }));

    let transport = MemoryTransport::new().with_descriptor(BASE, 0, 0);
    let reporter = RecordingReporter::new();
    let engine = BisectionEngine::new(&transport, &reporter, BASE);
    engine.search(SearchWindow::new(0, 3), 10_000).unwrap();
    assert!(reporter.events().iter().any(|event| matches!(
        event,
        LocateEvent::MidpointProbed {
            sequence: 1,
            outcome: MidpointOutcome::Unavailable { .. },
            ..
        }
    )));
}

#[test]
fn negative_midpoints_are_unavailable_not_fatal() {
    let transport = minutely_table(0..3);
    let reporter = RecordingReporter::new();
    let engine = BisectionEngine::new(&transport, &reporter, BASE);
    let err = engine.search(SearchWindow::new(-3, 2), 10_000).unwrap_err();
    assert!(matches!(err, LocateError::NoSuitableSequence { .. }));
    assert!(transport.gets().is_empty());
    assert!(reporter.events().iter().all(|event| matches!(
        event,
        LocateEvent::MidpointProbed {
            outcome: MidpointOutcome::Unavailable { .. },
            ..
        }
    )));
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn leading_edge_gaps_yield_greatest_present_sequence(
        published in 1_u64..200,
        unpublished in 0_i64..50,
        target_minute in -5_i64..260,
    ) {
        let transport = minutely_table(0..published);
        let engine = BisectionEngine::new(&transport, &NoopReporter, BASE);
        let high = i64::try_from(published).unwrap() - 1 + unpublished;
        let target = target_minute * 60;
        let result = engine.search(SearchWindow::new(0, high), target);

        let expected = (0..published).rev().find(|seq| i64::try_from(*seq).unwrap() * 60 <= target);
        match expected {
            Some(expected) => prop_assert_eq!(result.unwrap().get(), expected),
            None => {
                let is_no_suitable = matches!(result, Err(LocateError::NoSuitableSequence { .. }));
                prop_assert!(is_no_suitable);
            }
        }
    }

    #[test]
    fn scattered_gaps_never_select_missing_or_later_sequences(
        missing in proptest::collection::btree_set(0_u64..120, 0..40),
        target_minute in 0_i64..130,
    ) {
        let present: BTreeSet<u64> = (0..120).filter(|seq| !missing.contains(seq)).collect();
        let transport = minutely_table(present.iter().copied());
        let engine = BisectionEngine::new(&transport, &NoopReporter, BASE);
        let target = target_minute * 60;
        if let Ok(best) = engine.search(SearchWindow::new(0, 119), target) {
            prop_assert!(present.contains(&best.get()));
            prop_assert!(i64::try_from(best.get()).unwrap() * 60 <= target);
        }
    }
}
