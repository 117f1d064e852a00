//! Master Unit Main Application
//!
//! Entry point for the STM32G474-based nRF24L01+ master unit.
//! Initializes the radio link and runs the transmit cycle loop.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::spi;
use embassy_stm32::time::Hertz;
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use nodelink_firmware::config;
use nodelink_firmware::cycle::CycleController;
use nodelink_firmware::diag;
use nodelink_firmware::drivers::nrf24l01::Nrf24l01;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nodelink master firmware v{}", env!("CARGO_PKG_VERSION"));
    info!("{=str}", diag::banner().as_str());

    // Initialize STM32G474 peripherals with default clock configuration
    let p = embassy_stm32::init(embassy_stm32::Config::default());

    info!("Peripherals initialized");

    // Initialize status LED (typically on PA5 for Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // SPI1 to the radio: PB3 = SCK, PB4 = MISO, PB5 = MOSI
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(config::RADIO_SPI_HZ);
    let spi_bus = spi::Spi::new_blocking(p.SPI1, p.PB3, p.PB5, p.PB4, spi_config);

    let csn = Output::new(p.PB6, Level::High, Speed::VeryHigh);
    let ce = Output::new(p.PB7, Level::Low, Speed::VeryHigh);

    let mut radio = Nrf24l01::new(spi_bus, csn, ce, Delay);
    if radio.configure(&config::default_link_config()).is_err() {
        defmt::panic!("nRF24L01+ did not respond during setup");
    }

    info!("Radio configured on channel {=u8}", config::RADIO_CHANNEL);

    spawner.spawn(heartbeat_task(led)).unwrap();

    let mut controller = CycleController::new(config::SEND_INTERVAL_MS);
    let mut ticker = Ticker::every(Duration::from_millis(config::SEND_INTERVAL_MS));

    // One full synchronous round-trip per tick; the controller's own clock
    // still enforces the minimum interval against the monotonic time base.
    loop {
        ticker.next().await;

        info!("{=str}", diag::cycle_header(controller.counter()).as_str());

        let now_ms = Instant::now().as_millis();
        match controller.poll(&mut radio, now_ms) {
            None => {}
            Some(Ok(outcome)) => {
                info!("{=str}", diag::outcome_line(&outcome).as_str());
                info!("{=str}", diag::stats_line(&controller.stats()).as_str());
            }
            Some(Err(e)) => warn!("transceiver unreachable: {}", e),
        }

        info!("{=str}", diag::RULE);
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
