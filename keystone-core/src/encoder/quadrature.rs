//! Table-driven quadrature decoding
//!
//! Each new 2-bit phase sample is combined with the previous one into a
//! 4-bit transition index:
//!
//! ```text
//! bit:   3     2     1     0
//!      new_a new_b old_a old_b
//! ```
//!
//! Valid Gray-code transitions count ±1. Transitions where both lines
//! changed at once mean a state was skipped (bounce, or sampling too slow);
//! they count ±2 so the direction survives even if the magnitude is a guess.

/// Step contribution for each transition index
pub const STEP_TABLE: [i8; 16] = [
    0, 1, -1, 2, //
    -1, 0, -2, 1, //
    1, -2, 0, -1, //
    2, -1, 1, 0,
];

/// Look up the step for a transition between two phase samples
#[inline]
pub fn transition_step(previous: u8, sample: u8) -> i8 {
    STEP_TABLE[(((sample & 0b11) << 2) | (previous & 0b11)) as usize]
}

/// Raw edges that make up one reported step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Divisor {
    One,
    Two,
    Four,
}

impl Divisor {
    /// Parse a stored divisor; only 1, 2 and 4 are meaningful
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Divisor::One),
            2 => Some(Divisor::Two),
            4 => Some(Divisor::Four),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Divisor::One => 1,
            Divisor::Two => 2,
            Divisor::Four => 4,
        }
    }
}

/// Split an accumulated edge count into whole steps and the residue left over
///
/// Truncates toward zero, so the residue keeps the sign of the count and
/// the next call picks up where this one left off in either direction.
#[inline]
pub fn split_steps(count: i32, divisor: Divisor) -> (i32, i32) {
    let d = divisor.as_u8() as i32;
    (count / d, count % d)
}

/// One polled encoder channel
#[derive(Debug, Clone)]
pub struct QuadratureChannel {
    /// Last phase sample (bits 1:0)
    phase: u8,
    /// Edges accumulated since the last consume
    delta: i16,
    divisor: Divisor,
}

impl QuadratureChannel {
    /// Create a channel primed with the current pin state
    ///
    /// Priming avoids a spurious step on the first sample after boot.
    pub fn new(divisor: Divisor, initial_sample: u8) -> Self {
        Self {
            phase: initial_sample & 0b11,
            delta: 0,
            divisor,
        }
    }

    /// Fold a new phase sample into the accumulated delta
    pub fn service(&mut self, sample: u8) {
        let step = transition_step(self.phase, sample);
        self.delta = self.delta.saturating_add(step as i16);
        self.phase = sample & 0b11;
    }

    /// Take the whole steps accumulated so far, at most ±127 per call
    ///
    /// The residue and any steps past the clamp stay in the accumulator.
    pub fn consume(&mut self) -> i8 {
        let count = self.delta as i32;
        let (steps, _) = split_steps(count, self.divisor);
        let taken = steps.clamp(i8::MIN as i32, i8::MAX as i32);
        self.delta = (count - taken * self.divisor.as_u8() as i32) as i16;
        taken as i8
    }

    /// Change the divisor; pending edges are kept
    pub fn set_divisor(&mut self, divisor: Divisor) {
        self.divisor = divisor;
    }

    pub fn divisor(&self) -> Divisor {
        self.divisor
    }

    /// Edges accumulated but not yet consumed
    pub fn pending(&self) -> i16 {
        self.delta
    }
}
