//! Encoder divisor settings
//!
//! Stored as a three-byte record: an initialization marker followed by the
//! divisor for the polled encoders and the divisor for the VFO. A record
//! without the marker is treated as blank flash and replaced with factory
//! defaults.

use keystone_hal::{FlashError, FlashStorage, StorageKey};
use serde::{Deserialize, Serialize};

use crate::encoder::Divisor;

/// First byte of a valid settings record
pub const SETTINGS_MARKER: u8 = 0x6E;

/// Largest serialized record
const MAX_RECORD_SIZE: usize = 8;

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Flash operation failed
    Flash(FlashError),
    /// Serialization failed
    Serialize,
}

impl From<FlashError> for SettingsError {
    fn from(e: FlashError) -> Self {
        SettingsError::Flash(e)
    }
}

/// Runtime settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelSettings {
    pub encoder_divisor: Divisor,
    pub vfo_divisor: Divisor,
}

impl PanelSettings {
    /// Mechanical encoders give two edges per detent; the optical VFO
    /// counts every edge
    pub const DEFAULT: Self = Self {
        encoder_divisor: Divisor::Two,
        vfo_divisor: Divisor::One,
    };

    /// Build settings from a record, falling back per field on bad divisors
    pub fn from_record(record: &SettingsRecord) -> Self {
        Self {
            encoder_divisor: Divisor::from_u8(record.encoder_divisor)
                .unwrap_or(Self::DEFAULT.encoder_divisor),
            vfo_divisor: Divisor::from_u8(record.vfo_divisor)
                .unwrap_or(Self::DEFAULT.vfo_divisor),
        }
    }

    pub fn to_record(&self) -> SettingsRecord {
        SettingsRecord {
            marker: SETTINGS_MARKER,
            encoder_divisor: self.encoder_divisor.as_u8(),
            vfo_divisor: self.vfo_divisor.as_u8(),
        }
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// On-flash layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub marker: u8,
    pub encoder_divisor: u8,
    pub vfo_divisor: u8,
}

impl SettingsRecord {
    pub fn is_initialized(&self) -> bool {
        self.marker == SETTINGS_MARKER
    }
}

/// Where the loaded settings came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsSource {
    /// Read from an initialized record
    Stored,
    /// Flash was blank; defaults were written
    Defaults,
}

/// Load settings, writing factory defaults if none are stored
pub async fn load_or_init<S: FlashStorage>(
    storage: &mut S,
) -> Result<(PanelSettings, SettingsSource), SettingsError> {
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let stored = match storage.read(StorageKey::PanelSettings, &mut buffer).await {
        Ok(len) => postcard::from_bytes::<SettingsRecord>(&buffer[..len])
            .ok()
            .filter(SettingsRecord::is_initialized),
        Err(FlashError::NotFound) => None,
        Err(e) => return Err(e.into()),
    };

    match stored {
        Some(record) => Ok((PanelSettings::from_record(&record), SettingsSource::Stored)),
        None => {
            save(storage, &PanelSettings::DEFAULT).await?;
            Ok((PanelSettings::DEFAULT, SettingsSource::Defaults))
        }
    }
}

/// Store settings
pub async fn save<S: FlashStorage>(
    storage: &mut S,
    settings: &PanelSettings,
) -> Result<(), SettingsError> {
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let bytes = postcard::to_slice(&settings.to_record(), &mut buffer)
        .map_err(|_| SettingsError::Serialize)?;
    storage.write(StorageKey::PanelSettings, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use heapless::Vec;

    /// Single-record in-memory store
    #[derive(Default)]
    struct MemoryStorage {
        record: Option<Vec<u8, MAX_RECORD_SIZE>>,
        writes: usize,
        fail: bool,
    }

    impl FlashStorage for MemoryStorage {
        async fn read(&mut self, _key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
            if self.fail {
                return Err(FlashError::Flash);
            }
            let record = self.record.as_ref().ok_or(FlashError::NotFound)?;
            let target = buffer
                .get_mut(..record.len())
                .ok_or(FlashError::BufferTooSmall)?;
            target.copy_from_slice(record);
            Ok(record.len())
        }

        async fn write(&mut self, _key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
            self.record = Some(Vec::from_slice(data).map_err(|_| FlashError::BufferTooSmall)?);
            self.writes += 1;
            Ok(())
        }
    }

    fn stored(bytes: &[u8]) -> MemoryStorage {
        MemoryStorage {
            record: Some(Vec::from_slice(bytes).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_record_layout() {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes = postcard::to_slice(&PanelSettings::DEFAULT.to_record(), &mut buffer).unwrap();
        assert_eq!(bytes, &[0x6E, 2, 1]);
    }

    #[test]
    fn test_blank_flash_gets_defaults() {
        let mut storage = MemoryStorage::default();
        let (settings, source) = block_on(load_or_init(&mut storage)).unwrap();
        assert_eq!(settings, PanelSettings::DEFAULT);
        assert_eq!(source, SettingsSource::Defaults);
        assert_eq!(storage.record.as_deref(), Some(&[0x6E, 2, 1][..]));
    }

    #[test]
    fn test_stored_record_is_used() {
        let mut storage = stored(&[0x6E, 4, 2]);
        let (settings, source) = block_on(load_or_init(&mut storage)).unwrap();
        assert_eq!(source, SettingsSource::Stored);
        assert_eq!(settings.encoder_divisor, Divisor::Four);
        assert_eq!(settings.vfo_divisor, Divisor::Two);
        assert_eq!(storage.writes, 0);
    }

    #[test]
    fn test_wrong_marker_reinitializes() {
        let mut storage = stored(&[0xFF, 4, 4]);
        let (settings, source) = block_on(load_or_init(&mut storage)).unwrap();
        assert_eq!(settings, PanelSettings::DEFAULT);
        assert_eq!(source, SettingsSource::Defaults);
        assert_eq!(storage.writes, 1);
    }

    #[test]
    fn test_bad_divisor_falls_back_per_field() {
        let mut storage = stored(&[0x6E, 3, 4]);
        let (settings, _) = block_on(load_or_init(&mut storage)).unwrap();
        assert_eq!(settings.encoder_divisor, Divisor::Two);
        assert_eq!(settings.vfo_divisor, Divisor::Four);
    }

    #[test]
    fn test_flash_fault_is_reported() {
        let mut storage = MemoryStorage {
            fail: true,
            ..Default::default()
        };
        assert_eq!(
            block_on(load_or_init(&mut storage)),
            Err(SettingsError::Flash(FlashError::Flash))
        );
    }
}
