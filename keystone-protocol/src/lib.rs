//! Keystone Host Link Protocol
//!
//! This crate defines the register-mapped protocol between the front panel
//! controller (I2C target at [`PANEL_I2C_ADDRESS`]) and the radio host (bus
//! master). Every exchange is a register select followed by either a 16-bit
//! little-endian write or a 16-bit little-endian read:
//!
//! ```text
//! write:  ┌──────────┬─────────┬──────────┐
//!         │ REGISTER │ VALUE_L │ VALUE_H  │   (value bytes optional)
//!         │ 1B       │ 1B      │ 1B       │
//!         └──────────┴─────────┴──────────┘
//! read:   ┌──────────┐ ┌─────────┬─────────┐
//!         │ REGISTER │ │ WORD_L  │ WORD_H  │
//!         └──────────┘ └─────────┴─────────┘
//! ```
//!
//! The panel asserts an active-low ready line while it holds input events.
//! The host polls (or waits on) that line and drains the event register.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod events;
pub mod led;
pub mod registers;
pub mod transaction;

pub use events::{EncoderStep, EventKind, EventResponse, PanelEvent};
pub use led::LedWord;
pub use registers::{
    Register, HW_VERSION, PANEL_I2C_ADDRESS, PRODUCT_ID, SW_VERSION,
};
pub use transaction::{HostWrite, ProtocolError, WriteParser};
