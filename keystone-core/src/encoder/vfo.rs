//! Optical VFO encoder channel
//!
//! The VFO knob is a high-resolution encoder whose edges are captured in an
//! interrupt-priority task, while steps are consumed from the tick loop.
//! All state shared between the two sides lives in atomics, so the channel
//! can sit in a `static` and be used from both executors without a lock.

use portable_atomic::{AtomicI32, AtomicU8, Ordering};

use super::quadrature::{split_steps, transition_step, Divisor};

/// How the VFO lines are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VfoMode {
    /// Every edge on either line goes through the transition table
    BothEdges,
    /// Only edges on line A count; line B gives the direction
    SingleEdge,
}

/// Edge-fed VFO channel
pub struct VfoEncoder {
    mode: VfoMode,
    /// Last phase sample, (a << 1) | b
    phase: AtomicU8,
    /// Edges accumulated since the last consume
    delta: AtomicI32,
    divisor: AtomicU8,
}

impl VfoEncoder {
    pub const fn new(mode: VfoMode) -> Self {
        Self {
            mode,
            phase: AtomicU8::new(0),
            delta: AtomicI32::new(0),
            divisor: AtomicU8::new(1),
        }
    }

    pub fn mode(&self) -> VfoMode {
        self.mode
    }

    /// Record the line state at startup so the first edge decodes cleanly
    pub fn prime(&self, sample: u8) {
        self.phase.store(sample & 0b11, Ordering::Relaxed);
    }

    /// Both-edges path: a change on either line
    pub fn on_phase_change(&self, sample: u8) {
        let previous = self.phase.swap(sample & 0b11, Ordering::Relaxed);
        let step = transition_step(previous, sample);
        if step != 0 {
            self.delta.fetch_add(step as i32, Ordering::AcqRel);
        }
    }

    /// Single-edge path: an edge on line A, with both levels sampled after it
    ///
    /// Line A leads line B when turning forward, so just after an A edge the
    /// lines differ going forward and match going backward.
    pub fn on_edge(&self, a: bool, b: bool) {
        let step = if a != b { 1 } else { -1 };
        self.phase
            .store(((a as u8) << 1) | b as u8, Ordering::Relaxed);
        self.delta.fetch_add(step, Ordering::AcqRel);
    }

    pub fn set_divisor(&self, divisor: Divisor) {
        self.divisor.store(divisor.as_u8(), Ordering::Relaxed);
    }

    pub fn divisor(&self) -> Divisor {
        Divisor::from_u8(self.divisor.load(Ordering::Relaxed)).unwrap_or(Divisor::One)
    }

    /// Take whole steps, handing the rest back to the accumulator
    ///
    /// At most ±127 steps come out per call; the excess and the residue go
    /// back for later calls. The swap-then-add pair never loses an edge:
    /// anything the edge task adds in between lands on top of the carry.
    pub fn consume(&self) -> i8 {
        let count = self.delta.swap(0, Ordering::AcqRel);
        let divisor = self.divisor();
        let (steps, _) = split_steps(count, divisor);
        let taken = steps.clamp(i8::MIN as i32, i8::MAX as i32);
        let carry = count - taken * divisor.as_u8() as i32;
        if carry != 0 {
            self.delta.fetch_add(carry, Ordering::AcqRel);
        }
        taken as i8
    }

    /// Edges accumulated but not yet consumed
    pub fn pending(&self) -> i32 {
        self.delta.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORWARD: [u8; 4] = [0b00, 0b10, 0b11, 0b01];

    #[test]
    fn test_single_edge_direction() {
        let vfo = VfoEncoder::new(VfoMode::SingleEdge);
        // Forward: A rises while B is low, A falls while B is high
        vfo.on_edge(true, false);
        vfo.on_edge(false, true);
        assert_eq!(vfo.consume(), 2);

        // Backward: A rises with B already high
        vfo.on_edge(true, true);
        vfo.on_edge(false, false);
        vfo.on_edge(true, true);
        assert_eq!(vfo.consume(), -3);
    }

    #[test]
    fn test_both_edges_uses_table() {
        let vfo = VfoEncoder::new(VfoMode::BothEdges);
        vfo.prime(FORWARD[0]);
        for sample in FORWARD.iter().cycle().skip(1).take(8) {
            vfo.on_phase_change(*sample);
        }
        assert_eq!(vfo.consume(), 8);
    }

    #[test]
    fn test_consume_keeps_residue() {
        let vfo = VfoEncoder::new(VfoMode::SingleEdge);
        vfo.set_divisor(Divisor::Four);
        for _ in 0..7 {
            vfo.on_edge(true, false);
        }
        assert_eq!(vfo.consume(), 1);
        assert_eq!(vfo.pending(), 3);
        vfo.on_edge(true, false);
        assert_eq!(vfo.consume(), 1);
        assert_eq!(vfo.pending(), 0);
    }

    #[test]
    fn test_fast_spin_is_deferred_not_dropped() {
        let vfo = VfoEncoder::new(VfoMode::SingleEdge);
        for _ in 0..300 {
            vfo.on_edge(true, false);
        }
        assert_eq!(vfo.consume(), 127);
        assert_eq!(vfo.pending(), 173);
        assert_eq!(vfo.consume(), 127);
        assert_eq!(vfo.consume(), 46);
        assert_eq!(vfo.pending(), 0);
    }

    #[test]
    fn test_fast_spin_keeps_residue_at_divisor() {
        let vfo = VfoEncoder::new(VfoMode::SingleEdge);
        vfo.set_divisor(Divisor::Two);
        for _ in 0..301 {
            vfo.on_edge(false, false);
        }
        // -150 steps and one odd edge
        assert_eq!(vfo.consume(), -127);
        assert_eq!(vfo.pending(), -47);
        assert_eq!(vfo.consume(), -23);
        assert_eq!(vfo.pending(), -1);
    }

    #[test]
    fn test_default_divisor_is_one() {
        let vfo = VfoEncoder::new(VfoMode::SingleEdge);
        assert_eq!(vfo.divisor(), Divisor::One);
    }
}
