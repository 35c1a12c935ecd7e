//! MCP23S17 16-bit SPI port expanders
//!
//! The panel carries two MCP23S17s on one SPI bus, each with its own chip
//! select. Every access is a single chip-select frame:
//!
//! ```text
//! ┌────────┬──────────┬──────────┬──────────────┐
//! │ OPCODE │ REGISTER │ DATA     │ DATA (next)  │
//! │ 0x4n   │ 1B       │ 1B       │ 1B, optional │
//! └────────┴──────────┴──────────┴──────────────┘
//! ```
//!
//! The opcode is `0x40 | address << 1 | read`. In the default bank mode
//! the register pointer auto-increments, so a 16-bit read of port A
//! returns port B in the second data byte.

use keystone_hal::{ExpanderError, OutputPin, PortExpander, SpiBus};

/// MCP23S17 register addresses (IOCON.BANK = 0)
pub mod reg {
    /// Port A direction (1 = input)
    pub const IODIRA: u8 = 0x00;
    /// Port B direction (1 = input)
    pub const IODIRB: u8 = 0x01;
    /// Port A pull-ups
    pub const GPPUA: u8 = 0x0C;
    /// Port B pull-ups
    pub const GPPUB: u8 = 0x0D;
    /// Port A pin state / output latch
    pub const GPIOA: u8 = 0x12;
    /// Port B pin state / output latch
    pub const GPIOB: u8 = 0x13;
}

/// Chip reading the eight mechanical encoders on both ports
pub const ENCODER_CHIP: u8 = 0;

/// Chip driving matrix columns and LEDs on port A, rows on port B
pub const MATRIX_CHIP: u8 = 1;

const OPCODE_WRITE: u8 = 0x40;
const OPCODE_READ: u8 = 0x41;

/// Matrix port A output latch: LED bits high, column bits low
///
/// Outputs are enabled per bit through IODIRA, so a column is only ever
/// pulled low (never driven high) and an LED only lights when enabled.
pub const MATRIX_PORT_A_LATCH: u8 = 0b1111_0000;

/// Bits of matrix port A wired to columns
pub const COLUMN_MASK: u8 = 0b0000_1111;

/// Matrix IODIRA value enabling one column plus the LED outputs in `led_bits`
pub fn column_direction(column: u8, led_bits: u8) -> u8 {
    let outputs = ((1u8 << (column & 0x07)) & COLUMN_MASK) | (led_bits & !COLUMN_MASK);
    !outputs
}

/// The panel's pair of expanders on a shared bus
pub struct Mcp23s17Pair<S, CS> {
    spi: S,
    chip_selects: [CS; 2],
}

impl<S: SpiBus, CS: OutputPin> Mcp23s17Pair<S, CS> {
    /// Create the driver; both chips start deselected
    pub fn new(spi: S, mut chip_selects: [CS; 2]) -> Self {
        for cs in chip_selects.iter_mut() {
            cs.set_high();
        }
        Self { spi, chip_selects }
    }

    /// Put both chips into the panel's power-on configuration
    ///
    /// Encoder chip: every pin an input with pull-up. Matrix chip: port A
    /// all inputs for now (columns are enabled one at a time through
    /// [`column_direction`]) with the LED latch preset, port B rows as
    /// inputs with pull-ups.
    pub fn init(&mut self) -> Result<(), ExpanderError> {
        self.write_register(ENCODER_CHIP, reg::IODIRA, 0xFF)?;
        self.write_register(ENCODER_CHIP, reg::IODIRB, 0xFF)?;
        self.write_register(ENCODER_CHIP, reg::GPPUA, 0xFF)?;
        self.write_register(ENCODER_CHIP, reg::GPPUB, 0xFF)?;
        self.write_register(MATRIX_CHIP, reg::IODIRA, 0xFF)?;
        self.write_register(MATRIX_CHIP, reg::IODIRB, 0xFF)?;
        self.write_register(MATRIX_CHIP, reg::GPIOA, MATRIX_PORT_A_LATCH)?;
        self.write_register(MATRIX_CHIP, reg::GPPUB, 0xFF)?;
        Ok(())
    }

    fn opcode(chip: u8, read: bool) -> u8 {
        let base = if read { OPCODE_READ } else { OPCODE_WRITE };
        base | (chip << 1)
    }

    fn frame(&mut self, chip: u8, bytes: &mut [u8]) -> Result<(), ExpanderError> {
        let cs = self
            .chip_selects
            .get_mut(chip as usize)
            .ok_or(ExpanderError::InvalidChip(chip))?;
        cs.set_low();
        let result = self.spi.transfer_in_place(bytes);
        cs.set_high();
        result.map_err(|_| ExpanderError::Bus)
    }
}

impl<S: SpiBus, CS: OutputPin> PortExpander for Mcp23s17Pair<S, CS> {
    fn read_register(&mut self, chip: u8, register: u8) -> Result<u8, ExpanderError> {
        let mut frame = [Self::opcode(chip, true), register, 0];
        self.frame(chip, &mut frame)?;
        Ok(frame[2])
    }

    fn read_register16(&mut self, chip: u8, register: u8) -> Result<u16, ExpanderError> {
        let mut frame = [Self::opcode(chip, true), register, 0, 0];
        self.frame(chip, &mut frame)?;
        Ok(u16::from_le_bytes([frame[2], frame[3]]))
    }

    fn write_register(&mut self, chip: u8, register: u8, value: u8) -> Result<(), ExpanderError> {
        let mut frame = [Self::opcode(chip, false), register, value];
        self.frame(chip, &mut frame)
    }
}
