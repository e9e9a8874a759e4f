//! # Storefront Settings
//!
//! Shopper preferences: display language and currency.
//!
//! ## Rules
//! - Defaults: English, USD
//! - Arabic renders right-to-left; everything else left-to-right
//! - Codes outside the supported lists are rejected and leave the settings
//!   unchanged

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::{self, DEFAULT_CURRENCY, SUPPORTED_CURRENCIES};
use crate::error::{CoreError, CoreResult};
use crate::validation::validate_currency_code;

/// Storage key the settings document is persisted under.
pub const SETTINGS_STORAGE_KEY: &str = "settings-storage";

// =============================================================================
// Language
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Fr, Language::Ar];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Ar => "ar",
        }
    }

    /// Name shown in the language menu, in the language itself for Arabic.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "French",
            Language::Ar => "العربيه",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Language::Ar => TextDirection::Rtl,
            Language::En | Language::Fr => TextDirection::Ltr,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| CoreError::UnsupportedLanguage(s.to_string()))
    }
}

// =============================================================================
// Settings
// =============================================================================

/// The settings document: the unit of persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settings {
    pub language: Language,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: Language::default(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Settings {
    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    /// Switches the display language by code (`en`, `fr`, `ar`).
    pub fn set_language(&mut self, code: &str) -> CoreResult<Language> {
        let language = code.parse::<Language>()?;
        self.language = language;
        Ok(language)
    }

    /// Switches the display currency. The code must be well formed and one
    /// of [`SUPPORTED_CURRENCIES`].
    pub fn set_currency(&mut self, code: &str) -> CoreResult<()> {
        validate_currency_code(code)?;
        if !currency::is_supported(code) {
            return Err(CoreError::UnsupportedCurrency(code.to_string()));
        }
        self.currency = code.to_string();
        Ok(())
    }

    /// Currencies the settings menu offers.
    pub fn available_currencies() -> &'static [&'static str] {
        &SUPPORTED_CURRENCIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.direction(), TextDirection::Ltr);
    }

    #[test]
    fn test_set_language() {
        let mut settings = Settings::default();

        assert_eq!(settings.set_language("ar").unwrap(), Language::Ar);
        assert_eq!(settings.direction(), TextDirection::Rtl);

        settings.set_language("fr").unwrap();
        assert_eq!(settings.direction(), TextDirection::Ltr);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let mut settings = Settings::default();

        let err = settings.set_language("de").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedLanguage(code) if code == "de"));
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn test_set_currency() {
        let mut settings = Settings::default();
        settings.set_currency("EGP").unwrap();
        assert_eq!(settings.currency, "EGP");

        assert!(matches!(
            settings.set_currency("SAR"),
            Err(CoreError::UnsupportedCurrency(_))
        ));
        assert!(matches!(
            settings.set_currency("egp"),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(settings.currency, "EGP");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json, serde_json::json!({"language": "en", "currency": "USD"}));
    }
}
