//! RP2040-specific HAL for the front panel firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `keystone-hal` traits:
//!
//! - GPIO wrappers (`OutputPin`, `InputPin`)
//! - Blocking SPI master for the port expanders
//! - Flash-backed settings storage (implements `keystone_hal::FlashStorage`)

#![no_std]

pub mod flash;
pub mod gpio;
pub mod spi;

// Re-export shared traits from keystone-hal for convenience
pub use keystone_hal::{FlashStorage as FlashStorageTrait, StorageKey};
