//! Radio link contract and configuration
//!
//! The cycle controller never talks to hardware directly; it drives a
//! [`RadioLink`], the minimal contract an Enhanced ShockBurst transceiver
//! has to satisfy: a blocking transmit with link-layer retries below it,
//! and access to the ack-payload the slave piggy-backs onto a successful
//! transmission. The register-level implementation lives in
//! [`crate::drivers::nrf24l01`]; tests substitute scripted fakes.

/// Largest payload an nRF24L01+ FIFO entry can carry
pub const MAX_ACK_PAYLOAD_LEN: usize = 32;

/// Contract of the radio transceiver consumed by the cycle controller
pub trait RadioLink {
    /// Transport-level fault (SPI bus, control pins)
    type Error;

    /// Transmit `frame` to the bound node address.
    ///
    /// Blocks until the link layer resolves the attempt, performing its
    /// configured retransmissions internally. Returns `Ok(true)` when the
    /// node acknowledged delivery, `Ok(false)` when the retry budget was
    /// exhausted without an acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns a transport fault if the transceiver could not be reached.
    fn send(&mut self, frame: &[u8]) -> Result<bool, Self::Error>;

    /// Check whether the most recent acknowledged transmit left an
    /// ack-payload buffered and not yet consumed.
    ///
    /// # Errors
    ///
    /// Returns a transport fault if the transceiver could not be reached.
    fn ack_payload_available(&mut self) -> Result<bool, Self::Error>;

    /// Copy the buffered ack-payload into `buf`, returning its length.
    ///
    /// Callers must check [`RadioLink::ack_payload_available`] first; the
    /// returned length is whatever the slave loaded, which the caller
    /// validates against the agreed report layout.
    ///
    /// # Errors
    ///
    /// Returns a transport fault if the transceiver could not be reached.
    fn read_ack_payload(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// One-time link configuration, applied before the first cycle
///
/// Every field must match the slave's own radio setup; a disagreement shows
/// up as a steady stream of failed cycles, not as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    /// RF channel (offset in MHz from 2400)
    pub channel: u8,
    /// Power amplifier output level
    pub pa_level: PaLevel,
    /// Air data rate
    pub data_rate: DataRate,
    /// Link-layer retransmission policy
    pub retries: RetryPolicy,
    /// 5-byte address of the remote node's listening pipe
    pub node_address: [u8; 5],
}

/// Power amplifier output level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    #[default]
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PaLevel {
    /// RF_SETUP register bits (RF_PWR field, bits 2:1)
    #[must_use]
    pub const fn rf_setup_bits(self) -> u8 {
        match self {
            Self::Min => 0b0000_0000,
            Self::Low => 0b0000_0010,
            Self::High => 0b0000_0100,
            Self::Max => 0b0000_0110,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PaLevel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Min => defmt::write!(f, "-18 dBm"),
            Self::Low => defmt::write!(f, "-12 dBm"),
            Self::High => defmt::write!(f, "-6 dBm"),
            Self::Max => defmt::write!(f, "0 dBm"),
        }
    }
}

/// Air data rate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DataRate {
    /// 250 kbps (longest range)
    #[default]
    Kbps250,
    /// 1 Mbps
    Mbps1,
    /// 2 Mbps
    Mbps2,
}

impl DataRate {
    /// RF_SETUP register bits (RF_DR_LOW bit 5, RF_DR_HIGH bit 3)
    #[must_use]
    pub const fn rf_setup_bits(self) -> u8 {
        match self {
            Self::Kbps250 => 0b0010_0000,
            Self::Mbps1 => 0b0000_0000,
            Self::Mbps2 => 0b0000_1000,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DataRate {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Kbps250 => defmt::write!(f, "250 kbps"),
            Self::Mbps1 => defmt::write!(f, "1 Mbps"),
            Self::Mbps2 => defmt::write!(f, "2 Mbps"),
        }
    }
}

/// Link-layer retransmission policy
///
/// Both fields are 4-bit hardware values; out-of-range inputs are clamped.
/// The delay code is in units of 250 us, offset by one ((code + 1) * 250 us
/// between retransmissions).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    delay_code: u8,
    count: u8,
}

impl RetryPolicy {
    /// Create a retry policy, clamping each field to the hardware's 0-15 range
    #[must_use]
    pub const fn new(delay_code: u8, count: u8) -> Self {
        Self {
            delay_code: if delay_code > 15 { 15 } else { delay_code },
            count: if count > 15 { 15 } else { count },
        }
    }

    /// Delay code between retransmissions (units of 250 us, offset by one)
    #[must_use]
    pub const fn delay_code(self) -> u8 {
        self.delay_code
    }

    /// Maximum number of retransmissions
    #[must_use]
    pub const fn count(self) -> u8 {
        self.count
    }

    /// SETUP_RETR register encoding (ARD in the high nibble, ARC in the low)
    #[must_use]
    pub const fn setup_retr_bits(self) -> u8 {
        (self.delay_code << 4) | self.count
    }

    /// Worst-case time the link layer may spend on one transmit, in microseconds
    #[must_use]
    pub const fn budget_us(self) -> u32 {
        (self.delay_code as u32 + 1) * 250 * (self.count as u32 + 1)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RetryPolicy {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{} retries @ {} us",
            self.count,
            (self.delay_code as u32 + 1) * 250
        );
    }
}
