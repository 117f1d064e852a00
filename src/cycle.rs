//! Transmit Cycle Controller
//!
//! Drives one rate-limited request/response cycle per invocation: encode the
//! session counter, transmit it to the remote node, and on success read the
//! node's report out of the piggy-backed ack-payload. All session state
//! (counter, last report, cycle clock, link statistics) lives here, owned by
//! a single controller instance passed explicitly to the scheduling loop.
//!
//! Per-cycle state machine:
//!
//! ```text
//! Idle → Transmitting → { SendFailed
//!                       | AwaitingAck → { Delivered | ReportMissing | ReportMalformed } }
//! ```
//!
//! Every branch is terminal within the cycle; nothing propagates upward as a
//! fault except transport-level bus errors, which the caller logs and
//! survives. Cycles execute strictly sequentially and a new one never starts
//! before the configured interval has elapsed since the previous attempt.

use crate::frame::{self, FrameError};
use crate::link::{RadioLink, MAX_ACK_PAYLOAD_LEN};
use crate::types::{RemoteNodeReport, SessionCounter};

/// Outcome of a single transmit cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Full round-trip: frame delivered, report read and decoded
    Delivered(RemoteNodeReport),
    /// Frame delivered but no ack-payload was attached (soft miss)
    ReportMissing,
    /// Link layer exhausted its retry budget without an acknowledgement
    SendFailed,
    /// Ack-payload present but not a valid report; bytes were discarded
    ReportMalformed(FrameError),
}

impl CycleOutcome {
    /// Check whether this outcome advanced the session counter
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CycleOutcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Delivered(report) => defmt::write!(f, "delivered ({})", report),
            Self::ReportMissing => defmt::write!(f, "no report attached"),
            Self::SendFailed => defmt::write!(f, "send failed"),
            Self::ReportMalformed(e) => defmt::write!(f, "malformed report: {}", e),
        }
    }
}

/// Rate-limiting clock for the transmit cycle
///
/// Timestamps are caller-supplied milliseconds from any monotonic source
/// (`embassy_time::Instant` on target, a plain integer in tests). The clock
/// is marked on every attempt, successful or not, so a degraded link polls
/// at the same fixed rate as a healthy one.
#[derive(Clone, Copy, Debug)]
pub struct CycleClock {
    /// Minimum interval between attempts in milliseconds
    interval_ms: u64,
    /// Time of the last attempt
    last_attempt_ms: Option<u64>,
}

impl CycleClock {
    /// Create a clock with the given minimum interval
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_attempt_ms: None,
        }
    }

    /// Get the configured interval in milliseconds
    #[must_use]
    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Check whether enough time has elapsed to begin a new cycle
    #[must_use]
    pub fn is_ready(&self, now_ms: u64) -> bool {
        match self.last_attempt_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Record an attempt at `now_ms`
    pub fn mark(&mut self, now_ms: u64) {
        self.last_attempt_ms = Some(now_ms);
    }

    /// Reset the clock so the next poll runs immediately
    pub fn reset(&mut self) {
        self.last_attempt_ms = None;
    }
}

/// Observational counters for the link's health
///
/// Purely diagnostic; nothing reads these to make decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Cycles attempted (every transmit, any outcome)
    pub attempted: u32,
    /// Fully successful round-trips
    pub delivered: u32,
    /// Transmits that exhausted the retry budget
    pub send_failures: u32,
    /// Acknowledged transmits with no ack-payload attached
    pub missing_reports: u32,
    /// Ack-payloads rejected by the frame decoder
    pub malformed_reports: u32,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkStats {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{}/{} delivered, {} failed, {} missing, {} malformed",
            self.delivered,
            self.attempted,
            self.send_failures,
            self.missing_reports,
            self.malformed_reports
        );
    }
}

/// The master's transmit cycle controller
///
/// Owns exactly one [`SessionCounter`], one [`CycleClock`] and the most
/// recent [`RemoteNodeReport`]; delegates all physical transmission to one
/// [`RadioLink`] bound to one remote node address.
#[derive(Clone, Copy, Debug)]
pub struct CycleController {
    /// Session counter sent in the outbound frame
    counter: SessionCounter,
    /// Last report read from the remote node (stale across failed cycles)
    last_report: RemoteNodeReport,
    /// Rate-limiting clock
    clock: CycleClock,
    /// Link health counters
    stats: LinkStats,
}

impl CycleController {
    /// Create a controller polling no faster than `send_interval_ms`
    #[must_use]
    pub const fn new(send_interval_ms: u64) -> Self {
        Self {
            counter: SessionCounter::new(),
            last_report: RemoteNodeReport::INITIAL,
            clock: CycleClock::new(send_interval_ms),
            stats: LinkStats {
                attempted: 0,
                delivered: 0,
                send_failures: 0,
                missing_reports: 0,
                malformed_reports: 0,
            },
        }
    }

    /// Set the session counter (returns new controller)
    #[must_use]
    pub const fn with_counter(self, counter: SessionCounter) -> Self {
        Self { counter, ..self }
    }

    /// Get the current session counter
    #[must_use]
    pub const fn counter(&self) -> SessionCounter {
        self.counter
    }

    /// Get the most recent remote node report
    #[must_use]
    pub const fn last_report(&self) -> RemoteNodeReport {
        self.last_report
    }

    /// Get the link health counters
    #[must_use]
    pub const fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Get the rate-limiting clock
    #[must_use]
    pub const fn clock(&self) -> &CycleClock {
        &self.clock
    }

    /// Run one cycle if the interval has elapsed, `None` otherwise
    ///
    /// `now_ms` is the caller's monotonic clock. The clock is marked on
    /// every attempt regardless of outcome, including transport faults.
    ///
    /// # Errors
    ///
    /// Propagates transport faults from the link; see [`Self::run_cycle`].
    pub fn poll<L: RadioLink>(
        &mut self,
        link: &mut L,
        now_ms: u64,
    ) -> Option<Result<CycleOutcome, L::Error>> {
        if !self.clock.is_ready(now_ms) {
            return None;
        }
        self.clock.mark(now_ms);
        Some(self.run_cycle(link))
    }

    /// Run one full transmit cycle unconditionally
    ///
    /// Exactly one transmission attempt and zero or one payload read per
    /// invocation. The counter advances only on a fully successful
    /// round-trip; the last report is overwritten only by a valid decode.
    ///
    /// # Errors
    ///
    /// Returns the link's transport fault if the transceiver itself could
    /// not be reached. Neither the counter nor the report changes then.
    pub fn run_cycle<L: RadioLink>(&mut self, link: &mut L) -> Result<CycleOutcome, L::Error> {
        self.stats.attempted += 1;
        let outbound = frame::encode_counter(self.counter);

        if !link.send(&outbound)? {
            self.stats.send_failures += 1;
            return Ok(CycleOutcome::SendFailed);
        }

        if !link.ack_payload_available()? {
            self.stats.missing_reports += 1;
            return Ok(CycleOutcome::ReportMissing);
        }

        let mut payload = [0u8; MAX_ACK_PAYLOAD_LEN];
        let len = link.read_ack_payload(&mut payload)?.min(MAX_ACK_PAYLOAD_LEN);

        match frame::decode_report(&payload[..len]) {
            Ok(report) => {
                self.last_report = report;
                self.counter = self.counter.advance();
                self.stats.delivered += 1;
                Ok(CycleOutcome::Delivered(report))
            }
            Err(e) => {
                self.stats.malformed_reports += 1;
                Ok(CycleOutcome::ReportMalformed(e))
            }
        }
    }
}
