//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in keystone-core and keystone-hal for the panel's hardware:
//!
//! - MCP23S17 SPI port expanders
//! - The panel I/O binding (expanders plus direct pins)

#![no_std]
#![deny(unsafe_code)]

pub mod expander;
pub mod panel;

pub use expander::mcp23s17::{Mcp23s17Pair, ENCODER_CHIP, MATRIX_CHIP};
pub use panel::ExpanderPanel;
