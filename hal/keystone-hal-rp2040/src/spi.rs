//! Blocking SPI master
//!
//! The expanders are accessed from the tick task in short frames, so the
//! blocking driver is used; a 4-byte frame at 1 MHz takes ~32 µs.

use embassy_rp::spi::{Config, Phase, Polarity};
use keystone_hal::spi::SpiConfig;

/// Convert the shared SPI settings into embassy-rp's config
pub fn rp_config(settings: SpiConfig) -> Config {
    let mut config = Config::default();
    config.frequency = settings.frequency;
    config.polarity = if settings.idle_high() {
        Polarity::IdleHigh
    } else {
        Polarity::IdleLow
    };
    config.phase = if settings.capture_on_second_edge() {
        Phase::CaptureOnSecondTransition
    } else {
        Phase::CaptureOnFirstTransition
    };
    config
}

/// Any embedded-hal SPI bus, seen through the `keystone-hal` trait
pub struct RpSpi<B>(B);

impl<B: embedded_hal::spi::SpiBus<u8>> RpSpi<B> {
    pub fn new(bus: B) -> Self {
        Self(bus)
    }
}

impl<B: embedded_hal::spi::SpiBus<u8>> keystone_hal::SpiBus for RpSpi<B> {
    type Error = B::Error;

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.0.transfer_in_place(data)?;
        self.0.flush()
    }
}
