//! GPIO port expander abstraction
//!
//! The panel reads its encoders and button matrix through two 16-bit
//! expanders. Logic above this layer only needs register-level access by
//! chip and register address.

/// Errors from expander register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpanderError {
    /// Underlying bus transfer failed
    Bus,
    /// Chip address not wired on this board
    InvalidChip(u8),
}

/// Register-level access to a set of port expander chips
pub trait PortExpander {
    /// Read one 8-bit register
    fn read_register(&mut self, chip: u8, register: u8) -> Result<u8, ExpanderError>;

    /// Read two consecutive registers as a 16-bit value
    ///
    /// The register at `register` lands in the low byte, the one after it
    /// in the high byte.
    fn read_register16(&mut self, chip: u8, register: u8) -> Result<u16, ExpanderError>;

    /// Write one 8-bit register
    fn write_register(&mut self, chip: u8, register: u8, value: u8) -> Result<(), ExpanderError>;
}
