//! The 2 ms panel tick
//!
//! Each tick runs in a fixed order:
//!
//! 1. Sample the encoder lines and the row port (driving the scanned
//!    column first if the last drive failed)
//! 2. Service the encoders and drain their steps into the sink
//! 3. Run the scan sequencer and classify what it reports
//! 4. Advance the LED self test, or project the host LED word
//! 5. Write the direct LEDs
//! 6. Drive the next column with the expander LEDs
//!
//! The column is written last so the rows have the whole tick period to
//! settle before they are read again.

use keystone_protocol::LedWord;

use crate::config::PanelSettings;
use crate::encoder::{EncoderBank, EncoderSamples, VfoEncoder};
use crate::led::{LedBank, LedSelfTest};
use crate::matrix::{ScanSequencer, ShiftState};
use crate::traits::{EventSink, PanelIo};

/// Tick period
pub const TICK_PERIOD_MS: u64 = 2;

/// All tick-owned panel state
pub struct Panel {
    encoders: EncoderBank,
    sequencer: ScanSequencer,
    shift: ShiftState,
    leds: LedBank,
    self_test: LedSelfTest,
    /// Column known to be on the expander, if the last drive succeeded
    driven_column: Option<u8>,
}

impl Panel {
    /// Create the panel state, priming the encoders with their current lines
    pub fn new(settings: PanelSettings, initial: EncoderSamples) -> Self {
        Self {
            encoders: EncoderBank::new(settings.encoder_divisor, initial),
            sequencer: ScanSequencer::new(),
            shift: ShiftState::new(),
            leds: LedBank::new(),
            self_test: LedSelfTest::new(),
            driven_column: None,
        }
    }

    /// Apply divisor settings to the polled encoders and the VFO
    pub fn apply_settings(&mut self, settings: PanelSettings, vfo: &VfoEncoder) {
        self.encoders.set_divisor(settings.encoder_divisor);
        vfo.set_divisor(settings.vfo_divisor);
    }

    /// Run one tick
    ///
    /// An error while sampling aborts the tick before any state changes.
    /// A failed column drive at the end of the tick leaves the sequencer's
    /// column undriven; the next tick drives it again before reading rows,
    /// so the rows are never credited to the wrong column.
    pub fn tick<IO: PanelIo, S: EventSink>(
        &mut self,
        io: &mut IO,
        vfo: &VfoEncoder,
        host: LedWord,
        sink: &S,
    ) -> Result<(), IO::Error> {
        let samples = io.read_encoders()?;
        let column = self.sequencer.column();
        if self.driven_column != Some(column) {
            io.drive_column(column, self.leds.expander_bits())?;
            self.driven_column = Some(column);
        }
        let rows = io.read_rows()?;

        self.encoders.service(samples);
        self.encoders.drain(self.shift.encoder, vfo, sink);

        if let Some(action) = self.sequencer.tick(rows) {
            if let Some(event) = self.shift.classify(action, host.is_override()) {
                sink.push(event);
            }
        }

        if self.self_test.is_complete() {
            self.leds.project(host, self.shift);
        } else {
            self.self_test.tick(&mut self.leds);
        }

        io.write_direct_leds(self.leds.direct_mask());

        let column = self.sequencer.column();
        self.driven_column = None;
        io.drive_column(column, self.leds.expander_bits())?;
        self.driven_column = Some(column);
        Ok(())
    }

    pub fn shift(&self) -> ShiftState {
        self.shift
    }

    pub fn leds(&self) -> &LedBank {
        &self.leds
    }

    pub fn sequencer(&self) -> &ScanSequencer {
        &self.sequencer
    }

    pub fn self_test_complete(&self) -> bool {
        self.self_test.is_complete()
    }

    /// Skip the power-on LED sequence
    pub fn skip_self_test(&mut self) {
        while !self.self_test.tick(&mut self.leds) {}
    }
}
