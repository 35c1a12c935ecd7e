//! LED register word

/// Number of LED indicators on the panel
pub const LED_COUNT: u8 = 11;

/// Bit 15: host takes over the shift indicators and shift buttons
pub const OVERRIDE_BIT: u16 = 1 << 15;

/// Indicator lit while band shift is active
pub const BAND_SHIFT_LED: u8 = 9;

/// Indicator lit while encoder shift is active
pub const ENCODER_SHIFT_LED: u8 = 10;

/// LEDs the host always controls (bits 0..8)
pub const HOST_LED_COUNT: u8 = LED_COUNT - 2;

/// LED word as written to and read from the LED register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedWord(pub u16);

impl LedWord {
    pub const fn new(word: u16) -> Self {
        Self(word)
    }

    /// Host has claimed the shift indicators
    pub fn is_override(&self) -> bool {
        self.0 & OVERRIDE_BIT != 0
    }

    /// State the host requested for one LED
    pub fn led(&self, index: u8) -> bool {
        index < LED_COUNT && self.0 & (1 << index) != 0
    }

    /// Number of low bits the host word drives
    ///
    /// Without override the two shift indicators stay under local control.
    pub fn driven_count(&self) -> u8 {
        if self.is_override() {
            LED_COUNT
        } else {
            HOST_LED_COUNT
        }
    }
}

impl From<u16> for LedWord {
    fn from(word: u16) -> Self {
        Self(word)
    }
}
