//! nRF24L01+ Master Unit Firmware Library
//!
//! This library provides the core functionality for a master unit that
//! periodically transmits a session counter to a single remote slave node
//! over an nRF24L01+ packet radio and reads back the node's report from the
//! Enhanced ShockBurst acknowledgement payload.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        Cycle Controller  │  Diagnostics Formatting           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     PROTOCOL LAYER                           │
//! │  Counter / Report Framing  │  Session Counter Lifecycle      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │      RadioLink trait  │  nRF24L01+ SPI register driver       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single owner**: the cycle controller owns all session state; no
//!   ambient globals
//! - **Type-driven design**: custom types enforce invariants at compile time
//! - **No unsafe**: the driver is written against `embedded-hal` traits
//! - **Explicit error handling**: all fallible operations return `Result`
//! - **Host testable**: everything below the binary builds without a target

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Peripheral Drivers
///
/// Register-level driver for the nRF24L01+ transceiver.
pub mod drivers;

/// Radio Link Contract
///
/// The transceiver trait consumed by the cycle controller, plus the
/// one-time link configuration vocabulary.
pub mod link;

/// Transmit Cycle Controller
///
/// The rate-limited request/response cycle and its session state.
pub mod cycle;

/// Wire Framing
///
/// Fixed-width encoding of the outbound counter and the inbound report.
pub mod frame;

/// Diagnostics
///
/// Line-oriented status text for the serial/RTT console.
pub mod diag;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::cycle::{CycleController, CycleOutcome};
    pub use crate::link::RadioLink;
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::OutputPin;
    pub use embedded_hal::spi::SpiBus;

    // Embassy
    pub use embassy_time::{Duration, Instant, Ticker, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
