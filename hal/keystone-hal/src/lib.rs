//! Keystone Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the panel logic is written
//! against. Chip-specific crates implement them, and host tests implement
//! them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  keystone-core / keystone-firmware      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keystone-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │ keystone-hal-   │     │ keystone-drivers│
//! │    rp2040       │     │  (MCP23S17)     │
//! └─────────────────┘     └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SpiBus`] - SPI bus operations
//! - [`expander::PortExpander`] - Register access to GPIO expander chips
//! - [`flash::FlashStorage`] - Persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod expander;
pub mod flash;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use expander::{ExpanderError, PortExpander};
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{ActiveLow, InputPin, OutputPin, SignalLine};
pub use spi::SpiBus;
