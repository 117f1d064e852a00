//! Tests for diagnostic status lines
//!
//! The console text is best-effort and unversioned, but the tests pin the
//! pieces a human watching the link relies on: outcome prefixes and the
//! numbers embedded in each line.

use nodelink_firmware::cycle::{CycleOutcome, LinkStats};
use nodelink_firmware::diag;
use nodelink_firmware::frame::FrameError;
use nodelink_firmware::types::{RemoteNodeReport, SessionCounter};

#[test]
fn test_banner_mentions_the_radio() {
    let line = diag::banner();
    assert!(line.contains("nRF24L01+"));
    assert!(line.starts_with("[*]"));
}

#[test]
fn test_cycle_header_carries_counter_value() {
    let line = diag::cycle_header(SessionCounter::from_value(42).unwrap());
    assert!(line.contains("42"));
}

#[test]
fn test_delivered_line_carries_report_fields() {
    let outcome = CycleOutcome::Delivered(RemoteNodeReport::new(3, 127));
    let line = diag::outcome_line(&outcome);
    assert!(line.starts_with("[+]"));
    assert!(line.contains('3'));
    assert!(line.contains("127"));
}

#[test]
fn test_failure_line_prefix() {
    let line = diag::outcome_line(&CycleOutcome::SendFailed);
    assert!(line.starts_with("[-]"));
}

#[test]
fn test_missing_report_line_prefix() {
    let line = diag::outcome_line(&CycleOutcome::ReportMissing);
    assert!(line.starts_with("[?]"));
}

#[test]
fn test_malformed_line_names_lengths() {
    let outcome = CycleOutcome::ReportMalformed(FrameError::Length {
        expected: 4,
        actual: 7,
    });
    let line = diag::outcome_line(&outcome);
    assert!(line.starts_with("[!]"));
    assert!(line.contains('7'));
    assert!(line.contains('4'));
}

#[test]
fn test_stats_line_counts() {
    let stats = LinkStats {
        attempted: 10,
        delivered: 6,
        send_failures: 2,
        missing_reports: 1,
        malformed_reports: 1,
    };
    let line = diag::stats_line(&stats);
    assert!(line.contains("6/10"));
}

#[test]
fn test_lines_fit_their_capacity() {
    // Worst-case numeric widths must not truncate
    let outcome = CycleOutcome::Delivered(RemoteNodeReport::new(u16::MAX, u16::MAX));
    let line = diag::outcome_line(&outcome);
    assert!(line.contains("65535"));
    assert!(line.len() <= diag::LINE_LEN);
}
