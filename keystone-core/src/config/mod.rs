//! Persisted panel settings

pub mod settings;

pub use settings::{
    load_or_init, save, PanelSettings, SettingsError, SettingsRecord, SettingsSource,
    SETTINGS_MARKER,
};
