//! Line-oriented status text for the console
//!
//! Best-effort human-readable output, one line per event, in the master
//! unit's traditional `[*]`/`[+]`/`[-]` style. Nothing machine-parses these
//! lines and they carry no protocol contract; they are formatted into
//! fixed-capacity strings so the same text serves defmt logging on target
//! and plain assertions in host tests.

use core::fmt::Write;

use heapless::String;

use crate::cycle::{CycleOutcome, LinkStats};
use crate::types::SessionCounter;

/// Capacity of one status line
pub const LINE_LEN: usize = 96;

/// One formatted status line
pub type StatusLine = String<LINE_LEN>;

/// Separator printed between cycles
pub const RULE: &str = "--------------------------------------------------------";

/// Program start banner
#[must_use]
pub fn banner() -> StatusLine {
    let mut line = StatusLine::new();
    let _ = line.push_str("[*][*][*] nRF24L01+ master / single-slave link [*][*][*]");
    line
}

/// Announce the transmit attempt for the current cycle
#[must_use]
pub fn cycle_header(counter: SessionCounter) -> StatusLine {
    let mut line = StatusLine::new();
    let _ = write!(
        line,
        "[*] Transmitting master count {} to remote node",
        counter.value()
    );
    line
}

/// Describe the outcome of a cycle
#[must_use]
pub fn outcome_line(outcome: &CycleOutcome) -> StatusLine {
    let mut line = StatusLine::new();
    match outcome {
        CycleOutcome::Delivered(report) => {
            let _ = write!(
                line,
                "[+] Received report from remote node {} ---- returned count: {}",
                report.node_id, report.echoed_count
            );
        }
        CycleOutcome::ReportMissing => {
            let _ = line.push_str("[?] Transmit acknowledged but no report was attached");
        }
        CycleOutcome::SendFailed => {
            let _ = line.push_str("[-] The transmission to the remote node failed");
        }
        CycleOutcome::ReportMalformed(e) => {
            let _ = write!(line, "[!] Discarded ack-payload: {e}");
        }
    }
    line
}

/// Summarize link health counters
#[must_use]
pub fn stats_line(stats: &LinkStats) -> StatusLine {
    let mut line = StatusLine::new();
    let _ = write!(
        line,
        "[*] Link: {}/{} delivered, {} failed, {} missing, {} malformed",
        stats.delivered,
        stats.attempted,
        stats.send_failures,
        stats.missing_reports,
        stats.malformed_reports
    );
    line
}
