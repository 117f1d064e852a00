//! Wire framing for the master/slave exchange
//!
//! The byte layout is a protocol constant agreed out-of-band with the remote
//! node, not negotiated at runtime:
//!
//! ```text
//! outbound (master → slave):  [ counter.lo, counter.hi ]              2 bytes
//! inbound  (ack-payload):     [ id.lo, id.hi, count.lo, count.hi ]    4 bytes
//! ```
//!
//! All integers are unsigned 16-bit, little-endian. The width and byte order
//! are fixed here explicitly rather than inherited from the platform's
//! native integer representation.

use core::fmt;

use crate::types::{RemoteNodeReport, SessionCounter};

/// Size of the outbound counter frame in bytes
pub const COUNTER_FRAME_LEN: usize = 2;

/// Size of the inbound report frame in bytes
pub const REPORT_FRAME_LEN: usize = 4;

/// Encode the session counter into its outbound frame
#[must_use]
pub const fn encode_counter(counter: SessionCounter) -> [u8; COUNTER_FRAME_LEN] {
    counter.value().to_le_bytes()
}

/// Decode an ack-payload into a remote node report
///
/// The payload must be exactly [`REPORT_FRAME_LEN`] bytes; anything else is
/// rejected rather than read past or short. A mismatch means the slave and
/// master disagree about the protocol and the bytes cannot be trusted.
///
/// # Errors
///
/// Returns [`FrameError::Length`] when the payload size does not match.
pub fn decode_report(payload: &[u8]) -> Result<RemoteNodeReport, FrameError> {
    if payload.len() != REPORT_FRAME_LEN {
        return Err(FrameError::Length {
            expected: REPORT_FRAME_LEN,
            actual: payload.len(),
        });
    }

    let node_id = u16::from_le_bytes([payload[0], payload[1]]);
    let echoed_count = u16::from_le_bytes([payload[2], payload[3]]);
    Ok(RemoteNodeReport::new(node_id, echoed_count))
}

/// Framing error for inbound payloads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Payload size does not match the agreed report layout
    Length {
        /// Expected payload size in bytes
        expected: usize,
        /// Size actually received
        actual: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { expected, actual } => {
                write!(f, "payload length {actual}, expected {expected}")
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FrameError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Length { expected, actual } => {
                defmt::write!(f, "payload length {}, expected {}", actual, expected);
            }
        }
    }
}
