//! Button matrix scanning and classification

pub mod keymap;
pub mod rows;
pub mod sequencer;
pub mod shift;

pub use keymap::{report_code, REPORT_CODES, SCAN_CODES};
pub use rows::{scan_code, RowReading, COLUMNS, ROWS};
pub use sequencer::{
    ButtonAction, ButtonEdge, ScanSequencer, ScanState, DEBOUNCE_TICKS, LONG_PRESS_TICKS,
};
pub use shift::{ShiftState, BAND_SHIFT_SCAN_CODE, ENCODER_SHIFT_SCAN_CODE};
