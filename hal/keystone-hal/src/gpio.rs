//! GPIO pin abstractions
//!
//! Digital pins plus the "signal line" view used for out-of-band
//! notifications to the host.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// A line with an asserted/deasserted meaning independent of its polarity
pub trait SignalLine {
    /// Drive the line to its asserted or released level
    fn set_asserted(&mut self, asserted: bool);

    /// Check whether the line is currently asserted
    fn is_asserted(&self) -> bool;
}

/// Signal line asserted by pulling the pin low
///
/// The host-facing ready line is wired this way so several panels can
/// share one host interrupt input.
pub struct ActiveLow<P> {
    pin: P,
}

impl<P: OutputPin> ActiveLow<P> {
    /// Wrap a pin; the line starts released
    pub fn new(mut pin: P) -> Self {
        pin.set_high();
        Self { pin }
    }

    /// Recover the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> SignalLine for ActiveLow<P> {
    fn set_asserted(&mut self, asserted: bool) {
        self.pin.set_state(!asserted);
    }

    fn is_asserted(&self) -> bool {
        !self.pin.is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePin {
        high: bool,
    }

    impl OutputPin for FakePin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_low_starts_released() {
        let line = ActiveLow::new(FakePin { high: false });
        assert!(!line.is_asserted());
        assert!(line.into_inner().high);
    }

    #[test]
    fn test_active_low_polarity() {
        let mut line = ActiveLow::new(FakePin { high: true });
        line.set_asserted(true);
        assert!(line.is_asserted());
        assert!(!line.pin.high);

        line.set_asserted(false);
        assert!(!line.is_asserted());
        assert!(line.pin.high);
    }
}
