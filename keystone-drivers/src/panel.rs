//! Panel I/O over the expanders and direct pins
//!
//! Binds the core's [`PanelIo`] to the board: the encoder chip's two ports
//! as one 16-bit word, the matrix chip's port B as rows, the matrix chip's
//! port A direction register as column drive, and two groups of direct
//! pins for the last two encoders and LEDs 4..10.

use keystone_core::encoder::EncoderSamples;
use keystone_core::traits::PanelIo;
use keystone_hal::{ExpanderError, InputPin, OutputPin, PortExpander};

use crate::expander::mcp23s17::{column_direction, reg, ENCODER_CHIP, MATRIX_CHIP};

/// Direct encoder lines, in sample bit order: 8B, 8A, 9B, 9A
pub const DIRECT_ENCODER_LINES: usize = 4;

/// Directly wired LEDs (4..10)
pub const DIRECT_LEDS: usize = 7;

pub struct ExpanderPanel<E, I, O> {
    expander: E,
    encoder_lines: [I; DIRECT_ENCODER_LINES],
    leds: [O; DIRECT_LEDS],
}

impl<E: PortExpander, I: InputPin, O: OutputPin> ExpanderPanel<E, I, O> {
    pub fn new(expander: E, encoder_lines: [I; DIRECT_ENCODER_LINES], leds: [O; DIRECT_LEDS]) -> Self {
        Self {
            expander,
            encoder_lines,
            leds,
        }
    }

    fn read_direct(&self) -> u8 {
        self.encoder_lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_high())
            .fold(0, |bits, (bit, _)| bits | (1 << bit))
    }
}

impl<E: PortExpander, I: InputPin, O: OutputPin> PanelIo for ExpanderPanel<E, I, O> {
    type Error = ExpanderError;

    fn read_encoders(&mut self) -> Result<EncoderSamples, ExpanderError> {
        Ok(EncoderSamples {
            expander: self.expander.read_register16(ENCODER_CHIP, reg::GPIOA)?,
            direct: self.read_direct(),
        })
    }

    fn read_rows(&mut self) -> Result<u8, ExpanderError> {
        self.expander.read_register(MATRIX_CHIP, reg::GPIOB)
    }

    fn drive_column(&mut self, column: u8, led_bits: u8) -> Result<(), ExpanderError> {
        self.expander
            .write_register(MATRIX_CHIP, reg::IODIRA, column_direction(column, led_bits))
    }

    fn write_direct_leds(&mut self, mask: u8) {
        for (bit, led) in self.leds.iter_mut().enumerate() {
            led.set_state(mask & (1 << bit) != 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::mcp23s17::tests::{pair, Wires};
    use core::cell::Cell;

    struct Line<'a>(&'a Cell<bool>);

    impl InputPin for Line<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    struct Led<'a>(&'a Cell<bool>);

    impl OutputPin for Led<'_> {
        fn set_high(&mut self) {
            self.0.set(true);
        }

        fn set_low(&mut self) {
            self.0.set(false);
        }

        fn is_set_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_reads_encoders_and_direct_lines() {
        let wires = Wires::default();
        wires.responses[0].set([0xCD, 0xAB]);
        let lines: [Cell<bool>; 4] = [
            Cell::new(true),
            Cell::new(false),
            Cell::new(false),
            Cell::new(true),
        ];
        let leds: [Cell<bool>; 7] = Default::default();
        let mut panel = ExpanderPanel::new(
            pair(&wires),
            [Line(&lines[0]), Line(&lines[1]), Line(&lines[2]), Line(&lines[3])],
            leds.each_ref().map(Led),
        );

        let samples = panel.read_encoders().unwrap();
        assert_eq!(samples.expander, 0xABCD);
        assert_eq!(samples.direct, 0b1001);
    }

    #[test]
    fn test_rows_and_columns_use_matrix_chip() {
        let wires = Wires::default();
        wires.responses[1].set([0xF7, 0x00]);
        let lines: [Cell<bool>; 4] = Default::default();
        let leds: [Cell<bool>; 7] = Default::default();
        let mut panel = ExpanderPanel::new(
            pair(&wires),
            lines.each_ref().map(Line),
            leds.each_ref().map(Led),
        );

        assert_eq!(panel.read_rows(), Ok(0xF7));
        panel.drive_column(1, 0x40).unwrap();

        let frames = wires.frames.borrow();
        assert_eq!(frames[0].chip, Some(MATRIX_CHIP));
        assert_eq!(&frames[0].bytes[..2], &[0x43, reg::GPIOB]);
        assert_eq!(frames[1].chip, Some(MATRIX_CHIP));
        assert_eq!(frames[1].bytes.as_slice(), &[0x42, reg::IODIRA, !0x42]);
    }

    #[test]
    fn test_direct_leds() {
        let wires = Wires::default();
        let lines: [Cell<bool>; 4] = Default::default();
        let leds: [Cell<bool>; 7] = Default::default();
        let mut panel = ExpanderPanel::new(
            pair(&wires),
            lines.each_ref().map(Line),
            leds.each_ref().map(Led),
        );

        panel.write_direct_leds(0b100_0101);
        let lit: [bool; 7] = leds.each_ref().map(Cell::get);
        assert_eq!(lit, [true, false, true, false, false, false, true]);
    }
}
