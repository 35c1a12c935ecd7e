//! Scan code to report code lookup
//!
//! The table has two halves of [`SCAN_CODES`] entries: the first is used
//! normally, the second while band shift is active. Band shift only moves
//! the band buttons (report codes 14..25 become 27..38); everything else
//! is the same in both halves.

use super::rows::{COLUMNS, ROWS};

/// Positions in the matrix
pub const SCAN_CODES: usize = (COLUMNS * ROWS) as usize;

/// Report code that means "no event"
pub const NO_REPORT: u8 = 0;

/// Scan code marking an invalid or ambiguous scan
pub const INVALID_SCAN: u8 = 0xFF;

/// Report code of the encoder 5 push button
pub const ENCODER5_BUTTON: u8 = 13;

/// Report code encoder 5's button takes while encoder shift is active
pub const ENCODER5_SHIFTED_BUTTON: u8 = 41;

#[rustfmt::skip]
pub const REPORT_CODES: [u8; SCAN_CODES * 2] = [
    // unshifted
    4, 5, 6, 7, 1, 2, 3, 0,
    8, 39, 23, 20, 17, 14, 0, 0,
    24, 25, 21, 22, 18, 19, 15, 16,
    9, 10, 11, 40, 12, 13, 0, 0,
    // band shift
    4, 5, 6, 7, 1, 2, 3, 0,
    8, 39, 36, 33, 30, 27, 0, 0,
    37, 38, 34, 35, 31, 32, 28, 29,
    9, 10, 11, 40, 12, 13, 0, 0,
];

/// Look up the report code for a scan code
///
/// Returns `None` for invalid scan codes and for positions with no button.
pub fn report_code(scan_code: u8, band_shift: bool, encoder_shift: bool) -> Option<u8> {
    if scan_code as usize >= SCAN_CODES {
        return None;
    }
    let index = scan_code as usize + if band_shift { SCAN_CODES } else { 0 };
    match REPORT_CODES[index] {
        NO_REPORT => None,
        ENCODER5_BUTTON if encoder_shift => Some(ENCODER5_SHIFTED_BUTTON),
        code => Some(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unshifted_lookup() {
        assert_eq!(report_code(0, false, false), Some(4));
        assert_eq!(report_code(3, false, false), Some(7));
        assert_eq!(report_code(10, false, false), Some(23));
        assert_eq!(report_code(31, false, false), None);
    }

    #[test]
    fn test_band_shift_moves_band_buttons_only() {
        assert_eq!(report_code(10, true, false), Some(36));
        assert_eq!(report_code(16, true, false), Some(37));
        for scan in [0u8, 1, 2, 3, 4, 5, 6, 8, 24, 25, 26, 28, 29] {
            assert_eq!(report_code(scan, true, false), report_code(scan, false, false));
        }
    }

    #[test]
    fn test_unmapped_positions() {
        for scan in [7u8, 14, 15, 30, 31] {
            assert_eq!(report_code(scan, false, false), None);
            assert_eq!(report_code(scan, true, false), None);
        }
    }

    #[test]
    fn test_encoder5_button_remap() {
        assert_eq!(report_code(29, false, false), Some(ENCODER5_BUTTON));
        assert_eq!(report_code(29, false, true), Some(ENCODER5_SHIFTED_BUTTON));
        assert_eq!(report_code(29, true, true), Some(ENCODER5_SHIFTED_BUTTON));
    }

    #[test]
    fn test_invalid_scan_code() {
        assert_eq!(report_code(INVALID_SCAN, false, false), None);
        assert_eq!(report_code(32, false, false), None);
    }
}
