//! Periodic panel scheduler

pub mod tick;

pub use tick::{Panel, TICK_PERIOD_MS};
