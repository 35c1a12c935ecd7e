//! Divisor settings persistence
//!
//! Loads the encoder divisors from flash at boot, writing factory defaults
//! on a blank device.

use defmt::*;

use keystone_core::config::{load_or_init, PanelSettings, SettingsSource};
use keystone_hal_rp2040::flash::FlashStorage;

/// Load settings from flash
///
/// Falls back to defaults (without touching flash) if the storage itself
/// fails, so a flash fault never keeps the panel from starting.
pub async fn load_settings(storage: &mut FlashStorage<'_>) -> PanelSettings {
    match load_or_init(storage).await {
        Ok((settings, SettingsSource::Stored)) => {
            info!(
                "Loaded settings: encoder divisor {}, VFO divisor {}",
                settings.encoder_divisor.as_u8(),
                settings.vfo_divisor.as_u8()
            );
            settings
        }
        Ok((settings, SettingsSource::Defaults)) => {
            info!("No settings in flash, wrote factory defaults");
            settings
        }
        Err(e) => {
            warn!("Failed to load settings: {:?}, using defaults", e);
            PanelSettings::DEFAULT
        }
    }
}
