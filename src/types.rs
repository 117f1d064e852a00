//! Shared types used across the master firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

/// Session counter carried in every outbound frame
///
/// Counts fully successful round-trips (transmit delivered AND ack-payload
/// read). The counter starts at zero before the first completed round-trip
/// and then stays inside the `[1, 500]` protocol band, wrapping from 500
/// back to 1 rather than 0. The 500→1 boundary is a protocol constant
/// shared with the remote node and must not be changed unilaterally.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionCounter(u16);

impl SessionCounter {
    /// Lowest value the counter takes after a completed round-trip
    pub const FLOOR: u16 = 1;

    /// Highest value the counter reaches before wrapping
    pub const CEILING: u16 = 500;

    /// Create a counter in its pre-first-success state (zero)
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create a counter holding an arbitrary value, `None` if above [`Self::CEILING`]
    #[must_use]
    pub const fn from_value(value: u16) -> Option<Self> {
        if value <= Self::CEILING {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the current counter value
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Check whether the next advance will wrap to [`Self::FLOOR`]
    #[must_use]
    pub const fn at_ceiling(self) -> bool {
        self.0 >= Self::CEILING
    }

    /// Advance after a fully successful round-trip (returns new counter)
    ///
    /// Increments by one, wrapping `CEILING` → `FLOOR` (500 → 1, skipping 0).
    #[must_use]
    pub const fn advance(self) -> Self {
        if self.0 < Self::CEILING {
            Self(self.0 + 1)
        } else {
            Self(Self::FLOOR)
        }
    }
}

impl Default for SessionCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionCounter({})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SessionCounter {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "count {}", self.0);
    }
}

/// State reported by the remote node in its ack-payload
///
/// Two consecutive integers, in the order the slave encodes them:
/// the node's identifier and the counter value it observed. The value is
/// overwritten on each successful cycle and retained unchanged (stale)
/// across failed or report-less cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoteNodeReport {
    /// Identifier of the reporting node
    pub node_id: u16,
    /// Counter value the node reports back
    pub echoed_count: u16,
}

impl RemoteNodeReport {
    /// Report value held before the first successful cycle
    ///
    /// Matches the initializer the slave side assumes on power-up.
    pub const INITIAL: Self = Self {
        node_id: 1,
        echoed_count: 1,
    };

    /// Create a report from its two fields
    #[must_use]
    pub const fn new(node_id: u16, echoed_count: u16) -> Self {
        Self {
            node_id,
            echoed_count,
        }
    }
}

impl Default for RemoteNodeReport {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RemoteNodeReport {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "node {} count {}", self.node_id, self.echoed_count);
    }
}
