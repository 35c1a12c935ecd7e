//! Shift buttons and event classification
//!
//! Two matrix positions act as local toggles instead of ordinary buttons:
//! band shift swaps in the second half of the report table, encoder shift
//! renumbers the direct encoders and encoder 5's button. Both toggle on
//! press and never reach the host, unless the host has set the override
//! bit and taken them over as plain buttons.

use keystone_protocol::PanelEvent;

use super::keymap::report_code;
use super::sequencer::{ButtonAction, ButtonEdge};

/// Scan code of the band shift button
pub const BAND_SHIFT_SCAN_CODE: u8 = 9;

/// Scan code of the encoder shift button
pub const ENCODER_SHIFT_SCAN_CODE: u8 = 27;

/// Local shift toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftState {
    pub band: bool,
    pub encoder: bool,
}

impl ShiftState {
    pub const fn new() -> Self {
        Self {
            band: false,
            encoder: false,
        }
    }

    /// Turn a sequencer action into the event for the host, if any
    ///
    /// Shift buttons update the toggles here and produce no event.
    pub fn classify(&mut self, action: ButtonAction, host_override: bool) -> Option<PanelEvent> {
        if host_override {
            return to_event(action, report_code(action.scan_code, false, self.encoder)?);
        }

        match action.scan_code {
            BAND_SHIFT_SCAN_CODE => {
                if action.edge == ButtonEdge::Press {
                    self.band = !self.band;
                }
                None
            }
            ENCODER_SHIFT_SCAN_CODE => {
                if action.edge == ButtonEdge::Press {
                    self.encoder = !self.encoder;
                }
                None
            }
            scan => to_event(action, report_code(scan, self.band, self.encoder)?),
        }
    }
}

fn to_event(action: ButtonAction, code: u8) -> Option<PanelEvent> {
    Some(match action.edge {
        ButtonEdge::Press => PanelEvent::press(code),
        ButtonEdge::LongPress => PanelEvent::long_press(code),
        ButtonEdge::Release => PanelEvent::release(code),
    })
}
