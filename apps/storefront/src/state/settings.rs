//! # Settings State
//!
//! Owns the shopper's language / currency preferences and writes them
//! through to storage. Same write-through rules as the cart: validate and
//! save a copy, commit only when the save succeeded.

use storefront_core::{CoreError, Language, Settings};
use storefront_db::{DbError, SettingsRepository};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::ApiError;

#[derive(Debug)]
pub struct SettingsState {
    settings: Mutex<Settings>,
    repo: SettingsRepository,
}

impl SettingsState {
    pub fn new(settings: Settings, repo: SettingsRepository) -> Self {
        SettingsState {
            settings: Mutex::new(settings),
            repo,
        }
    }

    /// Rehydrates settings. Without a stored document the shopper gets
    /// English and `default_currency` (falling back to USD when that is not
    /// a supported currency).
    pub async fn load(repo: SettingsRepository, default_currency: &str) -> Result<Self, DbError> {
        let settings = match repo.load().await? {
            Some(settings) => settings,
            None => {
                let mut settings = Settings::default();
                if let Err(e) = settings.set_currency(default_currency) {
                    warn!(currency = %default_currency, error = %e, "Ignoring default currency");
                }
                settings
            }
        };

        info!(
            language = %settings.language,
            currency = %settings.currency,
            "Settings rehydrated"
        );
        Ok(SettingsState::new(settings, repo))
    }

    pub async fn get(&self) -> Settings {
        self.settings.lock().await.clone()
    }

    async fn update<F>(&self, change: F) -> Result<Settings, ApiError>
    where
        F: FnOnce(&mut Settings) -> Result<(), CoreError>,
    {
        let mut settings = self.settings.lock().await;

        let mut next = settings.clone();
        change(&mut next)?;
        if next == *settings {
            return Ok(next);
        }

        self.repo.save(&next).await?;
        *settings = next.clone();
        Ok(next)
    }

    pub async fn set_language(&self, code: &str) -> Result<Settings, ApiError> {
        self.update(|s| s.set_language(code).map(|_: Language| ()))
            .await
    }

    pub async fn set_currency(&self, code: &str) -> Result<Settings, ApiError> {
        self.update(|s| s.set_currency(code)).await
    }
}
