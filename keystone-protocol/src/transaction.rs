//! Host write transaction parsing
//!
//! A host write is delivered as one bus transaction:
//! - REGISTER (1 byte): selects the register for this and later reads
//! - VALUE_L (1 byte, optional): low byte of the new register value
//! - VALUE_H (1 byte, optional): high byte of the new register value
//!
//! A register-only write is how the host selects a register before a read.
//! The parser is fed one byte at a time from the bus handler and finished
//! at the STOP condition, so it never needs the full transaction buffered.

use crate::registers::Register;

/// Errors that can occur while parsing a host write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Transaction ended before the register byte
    Empty,
    /// Register byte does not name a known register
    UnknownRegister(u8),
    /// Value written to a read-only register
    ReadOnly(Register),
}

/// A completed host write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HostWrite {
    /// Raw register byte (unknown registers still become the read target)
    pub address: u8,
    /// Value bytes, if any were sent
    pub value: Option<u16>,
}

impl HostWrite {
    /// Build a write from a complete byte buffer
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut parser = WriteParser::new();
        for &byte in bytes {
            parser.feed(byte);
        }
        parser.finish()
    }

    /// The register selected by this write, if known
    pub fn register(&self) -> Option<Register> {
        Register::from_byte(self.address)
    }

    /// Value to store, if this write carries one for a writable register
    pub fn checked_value(&self) -> Result<Option<(Register, u16)>, ProtocolError> {
        let value = match self.value {
            Some(value) => value,
            None => return Ok(None),
        };
        let register = self
            .register()
            .ok_or(ProtocolError::UnknownRegister(self.address))?;
        if !register.is_writable() {
            return Err(ProtocolError::ReadOnly(register));
        }
        Ok(Some((register, value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for the register byte
    WaitingForRegister,
    /// Got register, waiting for the first value byte
    WaitingForLow,
    /// Got the low byte; every later byte replaces the high byte
    WaitingForHigh,
}

/// Byte-at-a-time parser for host writes
#[derive(Debug, Clone)]
pub struct WriteParser {
    state: ParseState,
    address: u8,
    value: u16,
}

impl Default for WriteParser {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteParser {
    /// Create a new write parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForRegister,
            address: 0,
            value: 0,
        }
    }

    /// Reset the parser state (START condition)
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForRegister;
        self.address = 0;
        self.value = 0;
    }

    /// Feed a single byte received from the host
    pub fn feed(&mut self, byte: u8) {
        match self.state {
            ParseState::WaitingForRegister => {
                self.address = byte;
                self.state = ParseState::WaitingForLow;
            }
            ParseState::WaitingForLow => {
                // A lone value byte is taken as the whole value
                self.value = byte as u16;
                self.state = ParseState::WaitingForHigh;
            }
            ParseState::WaitingForHigh => {
                self.value = (self.value & 0x00FF) | ((byte as u16) << 8);
            }
        }
    }

    /// Complete the transaction (STOP condition) and reset for the next one
    pub fn finish(&mut self) -> Result<HostWrite, ProtocolError> {
        let result = match self.state {
            ParseState::WaitingForRegister => Err(ProtocolError::Empty),
            ParseState::WaitingForLow => Ok(HostWrite {
                address: self.address,
                value: None,
            }),
            ParseState::WaitingForHigh => Ok(HostWrite {
                address: self.address,
                value: Some(self.value),
            }),
        };
        self.reset();
        result
    }
}
