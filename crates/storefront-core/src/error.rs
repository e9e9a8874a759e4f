//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Settings / domain rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-db errors      └── DbError      - storage failures         │
//! │  storefront-client errors  └── ClientError  - product fetch failures   │
//! │  app errors                └── ApiError     - what the UI sees         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Rendering layer        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The variant resolver and the cart aggregator never return errors: a
//! selection that matches nothing resolves to `None` and mutations on an
//! absent line item are no-ops. These types cover the surrounding helpers.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Language code is not one of the supported storefront languages.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Currency code is not offered by the storefront.
    ///
    /// ## When This Occurs
    /// - Settings menu sends a code outside the supported list
    /// - Rehydrated settings were written by a build with more currencies
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before state engines run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed price, bad slug characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnsupportedCurrency("JPY".to_string());
        assert_eq!(err.to_string(), "Unsupported currency: JPY");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "slug".to_string(),
        };
        assert_eq!(err.to_string(), "slug is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "slug".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
