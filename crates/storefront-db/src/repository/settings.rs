//! # Settings Repository
//!
//! Persists the shopper's language and currency under `settings-storage`.

use tracing::debug;

use storefront_core::{Settings, SETTINGS_STORAGE_KEY};

use super::kv::KeyValueRepository;
use super::{load_document, save_document};
use crate::error::DbResult;

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    kv: KeyValueRepository,
}

impl SettingsRepository {
    pub fn new(kv: KeyValueRepository) -> Self {
        SettingsRepository { kv }
    }

    pub async fn load(&self) -> DbResult<Option<Settings>> {
        load_document(&self.kv, SETTINGS_STORAGE_KEY).await
    }

    pub async fn save(&self, settings: &Settings) -> DbResult<()> {
        debug!(
            language = %settings.language,
            currency = %settings.currency,
            "Saving settings"
        );
        save_document(&self.kv, SETTINGS_STORAGE_KEY, settings).await
    }
}
