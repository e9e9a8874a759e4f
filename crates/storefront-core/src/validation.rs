//! # Validation Module
//!
//! Input checks applied by the command layer before a state owner runs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Rendering layer                                              │
//! │  ├── Quantity stepper bounds                                           │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (Rust)                                               │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: slug / quantity / currency code rules                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engines                                                      │
//! │  └── Total functions: bad ids are no-ops, no match resolves to None    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_quantity, validate_slug};
//!
//! validate_slug("Sneakers12").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product slug the product API accepts.
pub const MAX_SLUG_LENGTH: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product slug before it is placed in a request path.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_slug;
///
/// assert!(validate_slug("Sneakers12").is_ok());
/// assert!(validate_slug("").is_err());
/// assert!(validate_slug("../admin").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<()> {
    let slug = slug.trim();

    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "slug".to_string(),
        });
    }

    if slug.chars().count() > MAX_SLUG_LENGTH {
        return Err(ValidationError::TooLong {
            field: "slug".to_string(),
            max: MAX_SLUG_LENGTH,
        });
    }

    if !slug
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an ISO-4217 style currency code: exactly three ASCII
/// uppercase letters.
///
/// Membership in the supported list is checked separately by
/// [`crate::settings::Settings::set_currency`].
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be three uppercase letters".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity the shopper typed into the stepper.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// Cart updates that should *remove* a line pass 0 straight to the
/// aggregator and skip this check.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("Sneakers12").is_ok());
        assert!(validate_slug("summer-dress_2").is_ok());

        assert!(matches!(
            validate_slug("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("a/b").is_err());
        assert!(validate_slug(&"a".repeat(200)).is_ok());
        assert!(matches!(
            validate_slug(&"a".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("EGP").is_ok());

        assert!(validate_currency_code("").is_err());
        assert!(validate_currency_code("usd").is_err());
        assert!(validate_currency_code("US").is_err());
        assert!(validate_currency_code("USDT").is_err());
        assert!(validate_currency_code("U5D").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }
}
