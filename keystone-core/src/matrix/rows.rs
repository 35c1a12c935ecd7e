//! Row port interpretation
//!
//! Rows have pull-ups and the driven column pulls a pressed switch low, so
//! a 0 bit in the raw port value is a closed switch.

/// Rows in the button matrix
pub const ROWS: u8 = 8;

/// Columns in the button matrix
pub const COLUMNS: u8 = 4;

/// What the row port shows for the current column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RowReading {
    /// No switch closed
    Clear,
    /// Exactly one switch closed, on this row
    Single(u8),
    /// More than one switch closed
    Multiple,
}

impl RowReading {
    /// Interpret a raw (active-low) row port value
    pub fn from_raw(raw: u8) -> Self {
        let pressed = !raw;
        match pressed.count_ones() {
            0 => RowReading::Clear,
            1 => RowReading::Single(pressed.trailing_zeros() as u8),
            _ => RowReading::Multiple,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, RowReading::Clear)
    }
}

/// Linear scan code for a matrix position
#[inline]
pub fn scan_code(column: u8, row: u8) -> u8 {
    column * ROWS + row
}
