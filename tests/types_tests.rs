//! Tests for shared domain types
//!
//! Session counter lifecycle and remote node report semantics.

use nodelink_firmware::types::{RemoteNodeReport, SessionCounter};

// ============================================================================
// Session Counter Tests
// ============================================================================

#[test]
fn test_counter_starts_at_zero() {
    let counter = SessionCounter::new();
    assert_eq!(counter.value(), 0);
}

#[test]
fn test_counter_default_matches_new() {
    assert_eq!(SessionCounter::default(), SessionCounter::new());
}

#[test]
fn test_counter_first_advance_enters_band() {
    let counter = SessionCounter::new().advance();
    assert_eq!(counter.value(), SessionCounter::FLOOR);
}

#[test]
fn test_counter_advance_increments() {
    let counter = SessionCounter::from_value(41).unwrap().advance();
    assert_eq!(counter.value(), 42);
}

#[test]
fn test_counter_wraps_to_floor_not_zero() {
    let counter = SessionCounter::from_value(SessionCounter::CEILING).unwrap();
    assert!(counter.at_ceiling());
    let wrapped = counter.advance();
    assert_eq!(wrapped.value(), 1);
}

#[test]
fn test_counter_never_reaches_501() {
    let mut counter = SessionCounter::from_value(499).unwrap();
    counter = counter.advance();
    assert_eq!(counter.value(), 500);
    counter = counter.advance();
    assert_eq!(counter.value(), 1);
}

#[test]
fn test_counter_from_value_bounds() {
    assert!(SessionCounter::from_value(0).is_some());
    assert!(SessionCounter::from_value(500).is_some());
    assert!(SessionCounter::from_value(501).is_none());
    assert!(SessionCounter::from_value(u16::MAX).is_none());
}

#[test]
fn test_counter_at_ceiling_only_at_500() {
    assert!(!SessionCounter::from_value(499).unwrap().at_ceiling());
    assert!(SessionCounter::from_value(500).unwrap().at_ceiling());
}

// ============================================================================
// Remote Node Report Tests
// ============================================================================

#[test]
fn test_report_initial_value() {
    assert_eq!(RemoteNodeReport::INITIAL.node_id, 1);
    assert_eq!(RemoteNodeReport::INITIAL.echoed_count, 1);
}

#[test]
fn test_report_default_is_initial() {
    assert_eq!(RemoteNodeReport::default(), RemoteNodeReport::INITIAL);
}

#[test]
fn test_report_new() {
    let report = RemoteNodeReport::new(3, 250);
    assert_eq!(report.node_id, 3);
    assert_eq!(report.echoed_count, 250);
}
