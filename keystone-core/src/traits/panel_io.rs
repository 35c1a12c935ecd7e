//! Raw panel input/output

use crate::encoder::EncoderSamples;

/// Access to the panel's expanders and direct pins
///
/// One call of each kind is made per tick, in the order the tick scheduler
/// documents. Implementations should not block for longer than a bus
/// transfer.
pub trait PanelIo {
    /// Error type for expander access
    type Error;

    /// Sample every polled encoder line
    fn read_encoders(&mut self) -> Result<EncoderSamples, Self::Error>;

    /// Read the raw (active-low) row port for the driven column
    fn read_rows(&mut self) -> Result<u8, Self::Error>;

    /// Drive one matrix column together with the expander-hosted LEDs
    ///
    /// `led_bits` is already positioned in the upper nibble of the column
    /// port.
    fn drive_column(&mut self, column: u8, led_bits: u8) -> Result<(), Self::Error>;

    /// Set the directly wired LEDs; bit 0 of `mask` is LED 4
    fn write_direct_leds(&mut self, mask: u8);
}
