//! Host-addressable register map

/// 7-bit I2C address the panel answers on
pub const PANEL_I2C_ADDRESS: u8 = 0x15;

/// Product identifier reported in the high byte of the ID register
pub const PRODUCT_ID: u8 = 5;

/// Firmware version reported in the low byte of the ID register
pub const SW_VERSION: u8 = 7;

/// Hardware revision reported by the HW-version register
pub const HW_VERSION: u8 = 2;

// Wire addresses
const REG_LED: u8 = 0x0A;
const REG_EVENT: u8 = 0x0B;
const REG_ID: u8 = 0x0C;
const REG_HW_VERSION: u8 = 0x0D;

/// Registers the host can select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// LED state word (read/write)
    Led,
    /// Next queued input event (read)
    Event,
    /// Product ID and firmware version (read)
    Id,
    /// Hardware revision (read)
    HwVersion,
}

impl Register {
    /// Parse a register from its wire address
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            REG_LED => Some(Register::Led),
            REG_EVENT => Some(Register::Event),
            REG_ID => Some(Register::Id),
            REG_HW_VERSION => Some(Register::HwVersion),
            _ => None,
        }
    }

    /// Convert to wire address
    pub fn to_byte(self) -> u8 {
        match self {
            Register::Led => REG_LED,
            Register::Event => REG_EVENT,
            Register::Id => REG_ID,
            Register::HwVersion => REG_HW_VERSION,
        }
    }

    /// Returns true if the host may write this register
    pub fn is_writable(&self) -> bool {
        matches!(self, Register::Led)
    }

    /// Returns true if reading this register releases the ready line
    ///
    /// The identification registers are what a host reads while probing the
    /// bus, so they clear any stale ready indication left from before it
    /// attached.
    pub fn clears_ready_line(&self) -> bool {
        matches!(self, Register::Id | Register::HwVersion)
    }
}

/// The constant word returned by the ID register
pub const fn id_word() -> u16 {
    ((PRODUCT_ID as u16) << 8) | SW_VERSION as u16
}

/// The constant word returned by the HW-version register
pub const fn hw_version_word() -> u16 {
    HW_VERSION as u16
}
