//! Panel LEDs: output state, host projection and the power-on self test

pub mod bank;

pub use bank::{LedBank, EXPANDER_LEDS, EXPANDER_LED_MASK};
pub use self_test::{LedSelfTest, SELF_TEST_DWELL_TICKS, SELF_TEST_ORDER};
