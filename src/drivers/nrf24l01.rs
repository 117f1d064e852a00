//! nRF24L01+ Transceiver Driver
//!
//! Register-level driver for the Nordic nRF24L01+ 2.4 GHz transceiver,
//! operated as an Enhanced ShockBurst primary transmitter with dynamic
//! payloads and ack-payloads enabled. Written against `embedded-hal` 1.0
//! traits (SPI bus plus CSN/CE pins and a delay provider) so it is
//! MCU-agnostic and exercisable on the host with a scripted bus.
//!
//! The driver implements the [`RadioLink`] contract: a blocking transmit
//! that resolves the chip's own retry budget, and access to the buffered
//! ack-payload of the most recent acknowledged transmission.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::link::{LinkConfig, RadioLink, MAX_ACK_PAYLOAD_LEN};

/// SPI command words
mod cmd {
    pub const R_REGISTER: u8 = 0x00;
    pub const W_REGISTER: u8 = 0x20;
    pub const R_RX_PL_WID: u8 = 0x60;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const NOP: u8 = 0xFF;
}

/// Register addresses
mod reg {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const TX_ADDR: u8 = 0x10;
    pub const FIFO_STATUS: u8 = 0x11;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// Bit masks within the registers above
mod bits {
    /// CONFIG: enable CRC
    pub const EN_CRC: u8 = 0x08;
    /// CONFIG: 2-byte CRC
    pub const CRCO: u8 = 0x04;
    /// CONFIG: power up
    pub const PWR_UP: u8 = 0x02;
    /// STATUS: payload arrived in the RX FIFO
    pub const RX_DR: u8 = 0x40;
    /// STATUS: transmit acknowledged
    pub const TX_DS: u8 = 0x20;
    /// STATUS: retry budget exhausted
    pub const MAX_RT: u8 = 0x10;
    /// FIFO_STATUS: RX FIFO empty
    pub const RX_EMPTY: u8 = 0x01;
    /// FEATURE: enable dynamic payload length
    pub const EN_DPL: u8 = 0x04;
    /// FEATURE: enable ack-payloads
    pub const EN_ACK_PAY: u8 = 0x02;
}

/// CE pulse width to latch a transmission (datasheet minimum is 10 us)
const CE_PULSE_US: u32 = 15;

/// Power-up settling time after PWR_UP is set
const POWER_UP_US: u32 = 5_000;

/// Step between transmit-completion polls
const TX_POLL_STEP_US: u32 = 250;

/// Extra polls granted beyond the configured retry budget
const TX_POLL_MARGIN: u32 = 16;

/// Driver error: transport faults between MCU and transceiver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nrf24Error<SE, PE> {
    /// SPI bus fault
    Spi(SE),
    /// CE/CSN control pin fault
    Pin(PE),
}

#[cfg(feature = "embedded")]
impl<SE, PE> defmt::Format for Nrf24Error<SE, PE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Spi(_) => defmt::write!(f, "SPI bus fault"),
            Self::Pin(_) => defmt::write!(f, "control pin fault"),
        }
    }
}

/// nRF24L01+ driver over an exclusive SPI bus
///
/// The driver owns the bus, both control pins and a delay provider; CSN is
/// asserted around every command frame and CE is pulsed to launch a
/// transmission.
pub struct Nrf24l01<SPI, CSN, CE, D> {
    spi: SPI,
    csn: CSN,
    ce: CE,
    delay: D,
    /// Transmit-completion poll budget, sized from the retry policy
    tx_poll_budget: u32,
}

impl<SPI, CSN, CE, D, SE, PE> Nrf24l01<SPI, CSN, CE, D>
where
    SPI: SpiBus<u8, Error = SE>,
    CSN: OutputPin<Error = PE>,
    CE: OutputPin<Error = PE>,
    D: DelayNs,
{
    /// Create a driver; the radio stays down until [`Self::configure`]
    pub fn new(spi: SPI, csn: CSN, ce: CE, delay: D) -> Self {
        Self {
            spi,
            csn,
            ce,
            delay,
            tx_poll_budget: TX_POLL_MARGIN,
        }
    }

    /// One-time radio setup: power, channel, addressing, retry timing
    ///
    /// Brings the chip up as a primary transmitter with CRC16, dynamic
    /// payloads and ack-payloads on pipe 0, and both the write pipe and the
    /// ack-receive pipe bound to the remote node address.
    ///
    /// # Errors
    ///
    /// Returns a transport fault if the transceiver could not be reached.
    pub fn configure(&mut self, config: &LinkConfig) -> Result<(), Nrf24Error<SE, PE>> {
        self.ce.set_low().map_err(Nrf24Error::Pin)?;
        self.csn.set_high().map_err(Nrf24Error::Pin)?;
        self.delay.delay_us(POWER_UP_US);

        self.write_register(reg::CONFIG, bits::EN_CRC | bits::CRCO | bits::PWR_UP)?;
        self.delay.delay_us(POWER_UP_US);

        self.write_register(reg::EN_AA, 0x01)?;
        self.write_register(reg::EN_RXADDR, 0x01)?;
        // 0b11 = 5-byte addresses
        self.write_register(reg::SETUP_AW, 0x03)?;
        self.write_register(reg::SETUP_RETR, config.retries.setup_retr_bits())?;
        self.write_register(reg::RF_CH, config.channel)?;
        self.write_register(
            reg::RF_SETUP,
            config.data_rate.rf_setup_bits() | config.pa_level.rf_setup_bits(),
        )?;
        self.write_register(reg::FEATURE, bits::EN_DPL | bits::EN_ACK_PAY)?;
        self.write_register(reg::DYNPD, 0x01)?;

        // Ack-payloads come back on pipe 0, which must carry the TX address
        self.write_register_buf(reg::TX_ADDR, &config.node_address)?;
        self.write_register_buf(reg::RX_ADDR_P0, &config.node_address)?;

        self.command(cmd::FLUSH_TX)?;
        self.command(cmd::FLUSH_RX)?;
        self.write_register(reg::STATUS, bits::RX_DR | bits::TX_DS | bits::MAX_RT)?;

        let polls = config.retries.budget_us() / TX_POLL_STEP_US;
        self.tx_poll_budget = polls + TX_POLL_MARGIN;

        Ok(())
    }

    /// Release the bus, pins and delay provider
    pub fn release(self) -> (SPI, CSN, CE, D) {
        (self.spi, self.csn, self.ce, self.delay)
    }

    fn with_csn<F>(&mut self, f: F) -> Result<(), Nrf24Error<SE, PE>>
    where
        F: FnOnce(&mut SPI) -> Result<(), SE>,
    {
        self.csn.set_low().map_err(Nrf24Error::Pin)?;
        let result = f(&mut self.spi).and_then(|()| self.spi.flush());
        self.csn.set_high().map_err(Nrf24Error::Pin)?;
        result.map_err(Nrf24Error::Spi)
    }

    fn command(&mut self, op: u8) -> Result<(), Nrf24Error<SE, PE>> {
        self.with_csn(|spi| spi.write(&[op]))
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Nrf24Error<SE, PE>> {
        self.with_csn(|spi| spi.write(&[cmd::W_REGISTER | register, value]))
    }

    fn write_register_buf(&mut self, register: u8, buf: &[u8]) -> Result<(), Nrf24Error<SE, PE>> {
        self.with_csn(|spi| {
            spi.write(&[cmd::W_REGISTER | register])?;
            spi.write(buf)
        })
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Nrf24Error<SE, PE>> {
        let mut frame = [cmd::R_REGISTER | register, cmd::NOP];
        self.with_csn(|spi| spi.transfer_in_place(&mut frame))?;
        Ok(frame[1])
    }

    /// Read the STATUS register off the command byte of a NOP
    fn status(&mut self) -> Result<u8, Nrf24Error<SE, PE>> {
        let mut frame = [cmd::NOP];
        self.with_csn(|spi| spi.transfer_in_place(&mut frame))?;
        Ok(frame[0])
    }
}

impl<SPI, CSN, CE, D, SE, PE> RadioLink for Nrf24l01<SPI, CSN, CE, D>
where
    SPI: SpiBus<u8, Error = SE>,
    CSN: OutputPin<Error = PE>,
    CE: OutputPin<Error = PE>,
    D: DelayNs,
{
    type Error = Nrf24Error<SE, PE>;

    fn send(&mut self, frame: &[u8]) -> Result<bool, Self::Error> {
        self.write_register(reg::STATUS, bits::TX_DS | bits::MAX_RT)?;

        self.with_csn(|spi| {
            spi.write(&[cmd::W_TX_PAYLOAD])?;
            spi.write(frame)
        })?;

        self.ce.set_high().map_err(Nrf24Error::Pin)?;
        self.delay.delay_us(CE_PULSE_US);
        self.ce.set_low().map_err(Nrf24Error::Pin)?;

        for _ in 0..self.tx_poll_budget {
            let status = self.status()?;
            if status & bits::MAX_RT != 0 {
                self.write_register(reg::STATUS, bits::MAX_RT)?;
                // Drop the unsent payload so it is not retried next cycle
                self.command(cmd::FLUSH_TX)?;
                return Ok(false);
            }
            if status & bits::TX_DS != 0 {
                self.write_register(reg::STATUS, bits::TX_DS)?;
                return Ok(true);
            }
            self.delay.delay_us(TX_POLL_STEP_US);
        }

        // Chip never resolved the attempt; treat as a failed delivery
        self.command(cmd::FLUSH_TX)?;
        Ok(false)
    }

    fn ack_payload_available(&mut self) -> Result<bool, Self::Error> {
        let fifo = self.read_register(reg::FIFO_STATUS)?;
        Ok(fifo & bits::RX_EMPTY == 0)
    }

    fn read_ack_payload(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut wid_frame = [cmd::R_RX_PL_WID, cmd::NOP];
        self.with_csn(|spi| spi.transfer_in_place(&mut wid_frame))?;
        let width = wid_frame[1] as usize;

        // Width outside 1..=32 flags a corrupt FIFO entry per the datasheet
        if width == 0 || width > MAX_ACK_PAYLOAD_LEN {
            self.command(cmd::FLUSH_RX)?;
            return Ok(0);
        }

        let mut payload = [0u8; MAX_ACK_PAYLOAD_LEN];
        self.with_csn(|spi| {
            spi.write(&[cmd::R_RX_PAYLOAD])?;
            spi.read(&mut payload[..width])
        })?;
        self.write_register(reg::STATUS, bits::RX_DR)?;

        let copied = width.min(buf.len());
        buf[..copied].copy_from_slice(&payload[..copied]);
        Ok(width)
    }
}
