//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the master unit hardware
//! and the link parameters shared with the remote node. Channel, address,
//! retry timing and data rate must match the slave's configuration exactly.

use crate::link::{DataRate, LinkConfig, PaLevel, RetryPolicy};

/// Minimum interval between transmit cycles in milliseconds
pub const SEND_INTERVAL_MS: u64 = 1_000;

/// RF channel shared with the remote node (2400 + 0x66 MHz)
pub const RADIO_CHANNEL: u8 = 0x66;

/// Logical pipe address of the remote node's listening pipe
pub const NODE_ADDRESS: [u8; 5] = *b"NODE1";

/// Link-layer retry delay code (units of 250 us, so 4 = 1.25 ms)
pub const RETRY_DELAY_CODE: u8 = 4;

/// Maximum number of link-layer retransmissions per transmit
pub const RETRY_COUNT: u8 = 10;

/// Default RF power level (low: short range, clean bench signal)
pub const DEFAULT_PA_LEVEL: PaLevel = PaLevel::Low;

/// Default data rate (slowest rate for longest range capability)
pub const DEFAULT_DATA_RATE: DataRate = DataRate::Kbps250;

/// SPI clock frequency for the nRF24L01+ (8 MHz max per datasheet)
pub const RADIO_SPI_HZ: u32 = 1_000_000;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// SPI1 SCK to the radio
    pub const RADIO_SCK: &str = "PB3";

    /// SPI1 MISO from the radio
    pub const RADIO_MISO: &str = "PB4";

    /// SPI1 MOSI to the radio
    pub const RADIO_MOSI: &str = "PB5";

    /// Radio chip-select-not (CSN), active low
    pub const RADIO_CSN: &str = "PB6";

    /// Radio chip-enable (CE), pulsed to start a transmission
    pub const RADIO_CE: &str = "PB7";
}

/// Build the link configuration used at power-up
#[must_use]
pub const fn default_link_config() -> LinkConfig {
    LinkConfig {
        channel: RADIO_CHANNEL,
        pa_level: DEFAULT_PA_LEVEL,
        data_rate: DEFAULT_DATA_RATE,
        retries: RetryPolicy::new(RETRY_DELAY_CODE, RETRY_COUNT),
        node_address: NODE_ADDRESS,
    }
}
