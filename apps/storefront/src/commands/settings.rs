//! # Settings Commands
//!
//! Language and currency preferences. Both survive restarts.

use serde::Serialize;
use storefront_core::currency::currency_symbol;
use storefront_core::{Language, Settings, TextDirection};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SettingsState;

/// One entry of the language menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub direction: TextDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub language: Language,
    pub direction: TextDirection,
    pub currency: String,
    pub currency_symbol: String,
    pub available_currencies: Vec<&'static str>,
    pub available_languages: Vec<LanguageOption>,
}

impl From<&Settings> for SettingsResponse {
    fn from(settings: &Settings) -> Self {
        SettingsResponse {
            language: settings.language,
            direction: settings.direction(),
            currency: settings.currency.clone(),
            currency_symbol: currency_symbol(&settings.currency).to_string(),
            available_currencies: Settings::available_currencies().to_vec(),
            available_languages: Language::ALL
                .iter()
                .map(|l| LanguageOption {
                    code: l.code(),
                    name: l.display_name(),
                    direction: l.direction(),
                })
                .collect(),
        }
    }
}

pub async fn get_settings(settings: &SettingsState) -> SettingsResponse {
    SettingsResponse::from(&settings.get().await)
}

/// Switches the interface language (`en`, `fr` or `ar`).
pub async fn set_language(
    settings: &SettingsState,
    code: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(code = %code, "set_language command");
    let updated = settings.set_language(code).await?;
    Ok(SettingsResponse::from(&updated))
}

/// Switches the display currency. Prices are reformatted, never converted.
pub async fn set_currency(
    settings: &SettingsState,
    code: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(code = %code, "set_currency command");
    let updated = settings.set_currency(code).await?;
    Ok(SettingsResponse::from(&updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape() {
        let mut settings = Settings::default();
        settings.set_language("ar").unwrap();
        settings.set_currency("EGP").unwrap();

        let json = serde_json::to_value(SettingsResponse::from(&settings)).unwrap();

        assert_eq!(json["language"], "ar");
        assert_eq!(json["direction"], "rtl");
        assert_eq!(json["currencySymbol"], "E£");
        assert_eq!(json["availableCurrencies"], serde_json::json!(["USD", "EGP"]));
        assert_eq!(json["availableLanguages"].as_array().unwrap().len(), 3);
    }
}
