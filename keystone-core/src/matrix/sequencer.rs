//! Matrix scan sequencer
//!
//! Scans one column per tick and debounces what it finds. Only a single
//! closed switch is ever reported; anything involving two switches is
//! swallowed until the whole matrix reads clear twice, a debounce apart.
//!
//! ```text
//!            single                  same row
//!   Idle ──────────────► WaitPressed ─────────► Pressed ──┐ same row:
//!    ▲ │                      │ changed            │  │   │ long-press countdown
//!    │ │ multiple             ▼                    │  └───┘
//!    │ └──────────────► MultiPressed ◄─────────────┤ other row (Release)
//!    │                   │     ▲                   │ clear
//!    │              clear▼     │ not clear         ▼
//!    └──── clear ── WaitMultiReleased        WaitReleased ── clear (Release) ──► Idle
//! ```
//!
//! Column advance only happens from `Idle` on a clear reading, so a held
//! button keeps the scan parked on its column.

use super::rows::{scan_code, RowReading, COLUMNS};

/// Ticks to wait after any state change before looking again
pub const DEBOUNCE_TICKS: u8 = 10;

/// Ticks a button must stay held to count as a long press (2 s)
pub const LONG_PRESS_TICKS: u16 = 1000;

/// Sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanState {
    /// Nothing pressed; scanning columns
    Idle,
    /// One switch seen, waiting out the debounce
    WaitPressed,
    /// One switch confirmed and held
    Pressed,
    /// Held switch opened, waiting out the debounce
    WaitReleased,
    /// More than one switch closed; reporting suppressed
    MultiPressed,
    /// Matrix read clear once after a multi-press
    WaitMultiReleased,
}

/// Button transition reported by the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    Press,
    LongPress,
    Release,
}

/// A button transition at a matrix position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonAction {
    pub edge: ButtonEdge,
    pub scan_code: u8,
}

/// Column-at-a-time debounce state machine
#[derive(Debug, Clone)]
pub struct ScanSequencer {
    state: ScanState,
    column: u8,
    found_row: u8,
    debounce: u8,
    long_press: u16,
}

impl Default for ScanSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSequencer {
    pub const fn new() -> Self {
        Self {
            state: ScanState::Idle,
            column: 0,
            found_row: 0,
            debounce: 0,
            long_press: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Column the row reading is expected to come from
    pub fn column(&self) -> u8 {
        self.column
    }

    /// Advance one tick with the raw (active-low) row port value
    pub fn tick(&mut self, raw_rows: u8) -> Option<ButtonAction> {
        let reading = RowReading::from_raw(raw_rows);

        if self.debounce != 0 {
            self.debounce -= 1;
            return None;
        }

        match self.state {
            ScanState::Idle => match reading {
                RowReading::Clear => {
                    self.column = (self.column + 1) % COLUMNS;
                    None
                }
                RowReading::Multiple => {
                    self.enter(ScanState::MultiPressed);
                    None
                }
                RowReading::Single(row) => {
                    self.found_row = row;
                    self.enter(ScanState::WaitPressed);
                    None
                }
            },

            ScanState::WaitPressed => {
                if self.is_found_row(reading) {
                    self.state = ScanState::Pressed;
                    self.long_press = LONG_PRESS_TICKS;
                    Some(self.action(ButtonEdge::Press))
                } else {
                    self.enter(ScanState::MultiPressed);
                    None
                }
            }

            ScanState::Pressed => {
                if reading.is_clear() {
                    self.enter(ScanState::WaitReleased);
                    None
                } else if !self.is_found_row(reading) {
                    self.enter(ScanState::MultiPressed);
                    Some(self.action(ButtonEdge::Release))
                } else if self.long_press != 0 {
                    self.long_press -= 1;
                    (self.long_press == 0).then(|| self.action(ButtonEdge::LongPress))
                } else {
                    None
                }
            }

            ScanState::WaitReleased => {
                if reading.is_clear() {
                    self.enter(ScanState::Idle);
                    Some(self.action(ButtonEdge::Release))
                } else {
                    if !self.is_found_row(reading) {
                        self.enter(ScanState::MultiPressed);
                    }
                    None
                }
            }

            ScanState::MultiPressed => {
                if reading.is_clear() {
                    self.enter(ScanState::WaitMultiReleased);
                }
                None
            }

            ScanState::WaitMultiReleased => {
                if reading.is_clear() {
                    self.enter(ScanState::Idle);
                } else {
                    self.enter(ScanState::MultiPressed);
                }
                None
            }
        }
    }

    fn enter(&mut self, state: ScanState) {
        self.state = state;
        self.debounce = DEBOUNCE_TICKS;
    }

    fn is_found_row(&self, reading: RowReading) -> bool {
        reading == RowReading::Single(self.found_row)
    }

    fn action(&self, edge: ButtonEdge) -> ButtonAction {
        ButtonAction {
            edge,
            scan_code: scan_code(self.column, self.found_row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: u8 = 0xFF;

    fn row(row: u8) -> u8 {
        !(1 << row)
    }

    /// Run until the sequencer is looking at `column`
    fn park_on(seq: &mut ScanSequencer, column: u8) {
        while seq.column() != column {
            assert_eq!(seq.tick(CLEAR), None);
        }
    }

    fn run(seq: &mut ScanSequencer, raw: u8, ticks: usize, out: &mut heapless::Vec<ButtonAction, 8>) {
        for _ in 0..ticks {
            if let Some(action) = seq.tick(raw) {
                out.push(action).unwrap();
            }
        }
    }

    #[test]
    fn test_idle_advances_columns() {
        let mut seq = ScanSequencer::new();
        for expected in [1, 2, 3, 0, 1] {
            seq.tick(CLEAR);
            assert_eq!(seq.column(), expected);
        }
    }

    #[test]
    fn test_press_after_debounce() {
        let mut seq = ScanSequencer::new();
        park_on(&mut seq, 2);

        assert_eq!(seq.tick(row(5)), None);
        assert_eq!(seq.state(), ScanState::WaitPressed);
        for _ in 0..DEBOUNCE_TICKS {
            assert_eq!(seq.tick(row(5)), None);
        }
        assert_eq!(
            seq.tick(row(5)),
            Some(ButtonAction {
                edge: ButtonEdge::Press,
                scan_code: 21
            })
        );
        assert_eq!(seq.state(), ScanState::Pressed);
        assert_eq!(seq.column(), 2);
    }

    #[test]
    fn test_bounce_during_debounce_is_ignored() {
        let mut seq = ScanSequencer::new();
        seq.tick(row(1));
        // Contacts chatter while the counter runs
        for i in 0..DEBOUNCE_TICKS {
            let raw = if i % 2 == 0 { CLEAR } else { row(1) };
            assert_eq!(seq.tick(raw), None);
        }
        assert_eq!(seq.tick(row(1)).map(|a| a.edge), Some(ButtonEdge::Press));
    }

    #[test]
    fn test_glitch_goes_to_multi_pressed() {
        let mut seq = ScanSequencer::new();
        seq.tick(row(1));
        for _ in 0..DEBOUNCE_TICKS {
            seq.tick(CLEAR);
        }
        assert_eq!(seq.tick(CLEAR), None);
        assert_eq!(seq.state(), ScanState::MultiPressed);
    }

    #[test]
    fn test_full_press_release_cycle() {
        let mut seq = ScanSequencer::new();
        let mut actions = heapless::Vec::new();
        run(&mut seq, row(3), 30, &mut actions);
        run(&mut seq, CLEAR, 30, &mut actions);

        let edges: heapless::Vec<ButtonEdge, 8> = actions.iter().map(|a| a.edge).collect();
        assert_eq!(edges.as_slice(), &[ButtonEdge::Press, ButtonEdge::Release]);
        assert!(actions.iter().all(|a| a.scan_code == 3));
        assert_eq!(seq.state(), ScanState::Idle);
    }

    #[test]
    fn test_long_press_fires_once() {
        let mut seq = ScanSequencer::new();
        let mut actions = heapless::Vec::new();
        run(&mut seq, row(0), 3 * LONG_PRESS_TICKS as usize, &mut actions);
        run(&mut seq, CLEAR, 30, &mut actions);

        let edges: heapless::Vec<ButtonEdge, 8> = actions.iter().map(|a| a.edge).collect();
        assert_eq!(
            edges.as_slice(),
            &[ButtonEdge::Press, ButtonEdge::LongPress, ButtonEdge::Release]
        );
    }

    #[test]
    fn test_long_press_threshold() {
        let mut seq = ScanSequencer::new();
        // Reach Pressed: one tick to see it, debounce, one tick to confirm
        let mut actions = heapless::Vec::new();
        run(&mut seq, row(0), 2 + DEBOUNCE_TICKS as usize, &mut actions);
        assert_eq!(seq.state(), ScanState::Pressed);

        run(&mut seq, row(0), LONG_PRESS_TICKS as usize - 1, &mut actions);
        assert_eq!(actions.len(), 1);
        run(&mut seq, row(0), 1, &mut actions);
        assert_eq!(actions[1].edge, ButtonEdge::LongPress);
    }

    #[test]
    fn test_second_button_releases_held_one() {
        let mut seq = ScanSequencer::new();
        let mut actions = heapless::Vec::new();
        run(&mut seq, row(2), 20, &mut actions);
        run(&mut seq, row(2) & row(6), 1, &mut actions);

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1].edge, ButtonEdge::Release);
        assert_eq!(actions[1].scan_code, 2);
        assert_eq!(seq.state(), ScanState::MultiPressed);

        // Nothing more until everything is released
        run(&mut seq, row(6), 50, &mut actions);
        run(&mut seq, CLEAR, 50, &mut actions);
        assert_eq!(actions.len(), 2);
        assert_eq!(seq.state(), ScanState::Idle);
    }

    #[test]
    fn test_multi_press_is_silent() {
        let mut seq = ScanSequencer::new();
        let mut actions = heapless::Vec::new();
        run(&mut seq, row(1) & row(4), 100, &mut actions);
        run(&mut seq, CLEAR, 100, &mut actions);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_multi_release_needs_two_clear_readings() {
        let mut seq = ScanSequencer::new();
        seq.tick(0x00);
        assert_eq!(seq.state(), ScanState::MultiPressed);
        for _ in 0..DEBOUNCE_TICKS {
            seq.tick(0x00);
        }
        seq.tick(CLEAR);
        assert_eq!(seq.state(), ScanState::WaitMultiReleased);
        for _ in 0..DEBOUNCE_TICKS {
            seq.tick(CLEAR);
        }
        // Still pressed on the confirming read: back to waiting
        seq.tick(row(0));
        assert_eq!(seq.state(), ScanState::MultiPressed);
    }

    #[test]
    fn test_release_bounce_to_other_row_suppresses_release() {
        let mut seq = ScanSequencer::new();
        let mut actions = heapless::Vec::new();
        run(&mut seq, row(2), 20, &mut actions);
        run(&mut seq, CLEAR, 1, &mut actions);
        assert_eq!(seq.state(), ScanState::WaitReleased);
        run(&mut seq, row(5), DEBOUNCE_TICKS as usize + 1, &mut actions);
        assert_eq!(seq.state(), ScanState::MultiPressed);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_held_row_during_release_debounce_stays() {
        let mut seq = ScanSequencer::new();
        let mut actions = heapless::Vec::new();
        run(&mut seq, row(2), 20, &mut actions);
        run(&mut seq, CLEAR, 1, &mut actions);
        run(&mut seq, row(2), DEBOUNCE_TICKS as usize + 5, &mut actions);
        assert_eq!(seq.state(), ScanState::WaitReleased);
        run(&mut seq, CLEAR, 1, &mut actions);
        assert_eq!(actions.last().map(|a| a.edge), Some(ButtonEdge::Release));
    }
}
