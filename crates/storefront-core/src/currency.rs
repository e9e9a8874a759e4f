//! # Currency Display
//!
//! Symbol lookup and price formatting for the storefront's currencies.
//!
//! Amounts are never converted between currencies: the shopper's currency
//! choice only changes the symbol in front of the number.

use crate::money::Money;

/// Currencies the settings menu offers, first is the default.
pub const SUPPORTED_CURRENCIES: [&str; 2] = ["USD", "EGP"];

/// Default storefront currency.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Returns the display symbol for a currency code, or the code itself when
/// no symbol is known.
///
/// ```rust
/// use storefront_core::currency::currency_symbol;
///
/// assert_eq!(currency_symbol("USD"), "$");
/// assert_eq!(currency_symbol("EGP"), "E£");
/// assert_eq!(currency_symbol("JPY"), "JPY");
/// ```
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EGP" => "E£",
        // Saudi riyal, Arabic abbreviation
        "SAR" => "ر.س",
        other => other,
    }
}

/// Formats an amount as `{symbol}{major}.{minor:02}`.
///
/// ```rust
/// use storefront_core::currency::format_price;
/// use storefront_core::money::Money;
///
/// assert_eq!(format_price(Money::from_cents(4000), "USD"), "$40.00");
/// assert_eq!(format_price(Money::from_cents(-550), "EGP"), "-E£5.50");
/// ```
pub fn format_price(amount: Money, code: &str) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        currency_symbol(code),
        amount.major().abs(),
        amount.minor()
    )
}

/// Whether `code` is offered in the settings menu.
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_CURRENCIES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symbols() {
        assert_eq!(currency_symbol("SAR"), "ر.س");
        assert_eq!(currency_symbol(""), "");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Money::from_cents(15500), "USD"), "$155.00");
        assert_eq!(format_price(Money::from_cents(1099), "GBP"), "GBP10.99");
        assert_eq!(format_price(Money::from_cents(5), "USD"), "$0.05");
        assert_eq!(format_price(Money::from_cents(-5), "USD"), "-$0.05");
        assert_eq!(format_price(Money::zero(), "EGP"), "E£0.00");
    }

    #[test]
    fn test_supported_currencies() {
        assert!(is_supported("USD"));
        assert!(is_supported("EGP"));
        assert!(!is_supported("SAR"));
        assert!(!is_supported("usd"));
    }
}
