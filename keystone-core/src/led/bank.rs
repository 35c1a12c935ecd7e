//! LED output state and its projection onto the hardware
//!
//! LEDs 0..3 hang off the upper nibble of the matrix expander's column
//! port, so they are written together with the column drive word. LEDs
//! 4..10 are wired to direct pins.

use keystone_protocol::led::{BAND_SHIFT_LED, ENCODER_SHIFT_LED, LED_COUNT};
use keystone_protocol::LedWord;

use crate::matrix::ShiftState;

/// LEDs driven through the matrix expander
pub const EXPANDER_LEDS: u8 = 4;

/// Column port bit for each expander LED
const EXPANDER_LED_BITS: [u8; EXPANDER_LEDS as usize] = [7, 6, 5, 4];

/// Column port bits that may carry LEDs
pub const EXPANDER_LED_MASK: u8 = 0xF0;

const ALL_LEDS: u16 = (1 << LED_COUNT) - 1;

/// Current state of every panel LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedBank {
    lit: u16,
}

impl LedBank {
    pub const fn new() -> Self {
        Self { lit: 0 }
    }

    /// Set one LED; indices past the last LED are ignored
    pub fn set(&mut self, index: u8, on: bool) {
        if index >= LED_COUNT {
            return;
        }
        if on {
            self.lit |= 1 << index;
        } else {
            self.lit &= !(1 << index);
        }
    }

    pub fn clear_all(&mut self) {
        self.lit = 0;
    }

    pub fn is_lit(&self, index: u8) -> bool {
        index < LED_COUNT && self.lit & (1 << index) != 0
    }

    /// All LED states, LED 0 in bit 0
    pub fn bits(&self) -> u16 {
        self.lit & ALL_LEDS
    }

    /// Expander LED bits, positioned for the column port
    pub fn expander_bits(&self) -> u8 {
        EXPANDER_LED_BITS
            .iter()
            .enumerate()
            .filter(|(led, _)| self.is_lit(*led as u8))
            .fold(0, |bits, (_, &bit)| bits | (1 << bit))
            & EXPANDER_LED_MASK
    }

    /// Direct pin LEDs, LED 4 in bit 0
    pub fn direct_mask(&self) -> u8 {
        (self.bits() >> EXPANDER_LEDS) as u8
    }

    /// Take the host's LED word, with the shift indicators from local
    /// state unless the host has claimed them
    pub fn project(&mut self, host: LedWord, shift: ShiftState) {
        for index in 0..host.driven_count() {
            self.set(index, host.led(index));
        }
        if !host.is_override() {
            self.set(BAND_SHIFT_LED, shift.band);
            self.set(ENCODER_SHIFT_LED, shift.encoder);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_protocol::led::OVERRIDE_BIT;

    #[test]
    fn test_expander_bit_order() {
        let mut leds = LedBank::new();
        leds.set(0, true);
        assert_eq!(leds.expander_bits(), 0x80);
        leds.set(3, true);
        assert_eq!(leds.expander_bits(), 0x90);
        assert_eq!(leds.direct_mask(), 0);
    }

    #[test]
    fn test_direct_mask() {
        let mut leds = LedBank::new();
        leds.set(4, true);
        leds.set(10, true);
        assert_eq!(leds.direct_mask(), 0b100_0001);
        assert_eq!(leds.expander_bits(), 0);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut leds = LedBank::new();
        leds.set(11, true);
        leds.set(15, true);
        assert_eq!(leds.bits(), 0);
    }

    #[test]
    fn test_projection_keeps_local_shift_leds() {
        let mut leds = LedBank::new();
        let shift = ShiftState {
            band: true,
            encoder: false,
        };
        // Host asks for everything but does not own the shift indicators
        leds.project(LedWord(0x07FF), shift);
        assert_eq!(leds.bits(), 0x01FF | (1 << BAND_SHIFT_LED));
    }

    #[test]
    fn test_projection_override() {
        let mut leds = LedBank::new();
        let shift = ShiftState {
            band: true,
            encoder: true,
        };
        leds.project(LedWord(OVERRIDE_BIT | (1 << ENCODER_SHIFT_LED) | 1), shift);
        assert!(leds.is_lit(0));
        assert!(!leds.is_lit(BAND_SHIFT_LED));
        assert!(leds.is_lit(ENCODER_SHIFT_LED));
    }
}
