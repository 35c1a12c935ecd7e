//! Polled encoder bank
//!
//! Eight mechanical encoders are read through the encoder expander as one
//! 16-bit word, two bits per encoder. Two more are wired to direct pins.
//! The bank is sampled every tick and drained into the event sink right
//! after, so each tick produces at most one step event per encoder.

use keystone_protocol::PanelEvent;

use super::quadrature::{Divisor, QuadratureChannel};
use super::vfo::VfoEncoder;
use crate::traits::EventSink;

/// Channels served from the expander word
pub const EXPANDER_ENCODERS: usize = 8;

/// Channels served from direct pins
pub const DIRECT_ENCODERS: usize = 2;

/// Total polled channels
pub const ENCODER_COUNT: usize = EXPANDER_ENCODERS + DIRECT_ENCODERS;

/// Channel for each bit pair of the expander word, starting at the LSB
pub const EXPANDER_PAIR_CHANNELS: [usize; EXPANDER_ENCODERS] = [3, 2, 1, 0, 7, 6, 5, 4];

/// Ticks between VFO reports (20 ms at the 2 ms tick)
pub const VFO_REPORT_TICKS: u8 = 10;

/// Report numbers used by the direct encoders while encoder shift is active
const SHIFTED_DIRECT_BASE: u8 = 10;

/// Raw encoder line state for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSamples {
    /// Both ports of the encoder expander, port A in the low byte
    pub expander: u16,
    /// Direct encoder pins, channel 8 in bits 1:0 and channel 9 in bits 3:2
    pub direct: u8,
}

impl EncoderSamples {
    /// Phase sample for one channel
    pub fn channel(&self, channel: usize) -> u8 {
        if channel >= EXPANDER_ENCODERS {
            let shift = (channel - EXPANDER_ENCODERS) * 2;
            return (self.direct >> shift) & 0b11;
        }
        let pair = EXPANDER_PAIR_CHANNELS
            .iter()
            .position(|&c| c == channel)
            .unwrap_or(0);
        ((self.expander >> (pair * 2)) & 0b11) as u8
    }
}

/// The polled encoders plus the VFO report countdown
pub struct EncoderBank {
    channels: [QuadratureChannel; ENCODER_COUNT],
    vfo_countdown: u8,
}

impl EncoderBank {
    /// Create the bank, priming every channel with the current line state
    pub fn new(divisor: Divisor, initial: EncoderSamples) -> Self {
        Self {
            channels: core::array::from_fn(|channel| {
                QuadratureChannel::new(divisor, initial.channel(channel))
            }),
            vfo_countdown: VFO_REPORT_TICKS,
        }
    }

    /// Feed one tick's samples to every channel
    pub fn service(&mut self, samples: EncoderSamples) {
        for (pair, &channel) in EXPANDER_PAIR_CHANNELS.iter().enumerate() {
            let sample = ((samples.expander >> (pair * 2)) & 0b11) as u8;
            self.channels[channel].service(sample);
        }
        for direct in 0..DIRECT_ENCODERS {
            let sample = (samples.direct >> (direct * 2)) & 0b11;
            self.channels[EXPANDER_ENCODERS + direct].service(sample);
        }
    }

    pub fn set_divisor(&mut self, divisor: Divisor) {
        for channel in self.channels.iter_mut() {
            channel.set_divisor(divisor);
        }
    }

    /// Push a step event for every channel that moved a whole step
    ///
    /// The VFO is only consumed every [`VFO_REPORT_TICKS`] calls so the host
    /// sees batched steps instead of one event per tick.
    pub fn drain<S: EventSink>(&mut self, encoder_shift: bool, vfo: &VfoEncoder, sink: &S) {
        for (channel, state) in self.channels.iter_mut().enumerate() {
            let steps = state.consume();
            if steps != 0 {
                sink.push(PanelEvent::encoder_step(
                    report_number(channel, encoder_shift),
                    steps,
                ));
            }
        }

        self.vfo_countdown = self.vfo_countdown.saturating_sub(1);
        if self.vfo_countdown == 0 {
            self.vfo_countdown = VFO_REPORT_TICKS;
            let steps = vfo.consume();
            if steps != 0 {
                sink.push(PanelEvent::vfo_step(steps));
            }
        }
    }

    pub fn channel(&self, channel: usize) -> Option<&QuadratureChannel> {
        self.channels.get(channel)
    }
}

/// Encoder number reported to the host for a channel
///
/// Encoder shift turns the two direct encoders into logical encoders 10
/// and 11, so one pair of knobs can drive two sets of host controls.
pub fn report_number(channel: usize, encoder_shift: bool) -> u8 {
    if encoder_shift && channel >= EXPANDER_ENCODERS {
        SHIFTED_DIRECT_BASE + (channel - EXPANDER_ENCODERS) as u8
    } else {
        channel as u8
    }
}
