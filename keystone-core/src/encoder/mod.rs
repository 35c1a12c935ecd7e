//! Rotary encoder decoding
//!
//! Polled mechanical encoders go through [`EncoderBank`]; the optical VFO
//! knob is edge-driven and lives in [`VfoEncoder`] so it can be shared with
//! an interrupt-priority task.

pub mod bank;
pub mod quadrature;
pub mod vfo;

pub use bank::{report_number, EncoderBank, EncoderSamples, ENCODER_COUNT, VFO_REPORT_TICKS};
pub use quadrature::{split_steps, transition_step, Divisor, QuadratureChannel, STEP_TABLE};
pub use vfo::{VfoEncoder, VfoMode};
