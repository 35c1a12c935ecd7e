//! Configuration persistence

pub mod settings;

pub use settings::load_settings;
