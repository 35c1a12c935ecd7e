//! Board-agnostic core logic for the front panel controller
//!
//! Everything here runs on the host as well as on the target:
//!
//! - Quadrature decoding for the polled encoders and the VFO knob
//! - The button matrix scan sequencer, keymap and shift handling
//! - The event queue shared with the host bus handler
//! - The host register file
//! - LED projection and the power-on self test
//! - Persisted divisor settings
//! - The tick scheduler tying it together
//!
//! Hardware is reached only through the [`traits::PanelIo`] and
//! [`keystone_hal`] traits.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod encoder;
pub mod led;
pub mod matrix;
pub mod queue;
pub mod scheduler;
pub mod traits;
pub mod transport;

pub use queue::{EventQueue, QUEUE_SLOTS};
pub use scheduler::Panel;
pub use transport::HostRegisters;
