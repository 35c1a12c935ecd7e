//! SPI bus abstractions
//!
//! Blocking SPI master operations. Chip select is handled by the device
//! driver, so one bus can be shared between several devices.

/// SPI bus master
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Transfer data in place
    ///
    /// Each byte of `data` is clocked out and replaced with the byte
    /// clocked in at the same time.
    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error>;
}

/// SPI clock mode (polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock mode
    pub mode: Mode,
}

impl SpiConfig {
    /// Settings used for the MCP23S17 expanders (mode 0, MSB first)
    pub const EXPANDER: Self = Self {
        frequency: 1_000_000,
        mode: Mode::Mode0,
    };

    /// Clock idles high
    pub fn idle_high(&self) -> bool {
        matches!(self.mode, Mode::Mode2 | Mode::Mode3)
    }

    /// Data captured on the second clock transition
    pub fn capture_on_second_edge(&self) -> bool {
        matches!(self.mode, Mode::Mode1 | Mode::Mode3)
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::EXPANDER
    }
}
