//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The product API sends prices as JSON numbers:  "sale_price": 19.99    │
//! │                                                                         │
//! │  Summing floats across a cart drifts:                                   │
//! │    19.99 × 3 = 59.97000000000001  ❌                                    │
//! │                                                                         │
//! │  OUR SOLUTION: parse once at the edge into integer cents               │
//! │    1999 cents × 3 = 5997 cents  ✅                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(1999); // 19.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 5997);
//!
//! let parsed = Money::parse_decimal("19.99").unwrap();
//! assert_eq!(parsed, price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents, piastres, halalas).
///
/// ## Where Money is Used
/// ```text
/// Variant.sale_price ──► LineItem.unit_sale_price ──► Cart::total_price
///         │
///         └──► format_price(money, "USD") ──► "$19.99" in the UI
/// ```
///
/// Persisted state and DTOs serialize `Money` as plain integer cents.
/// Backend product documents use major units; see [`major_units`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(40, 0).cents(), 4000);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal amount in major units ("19.99", "-5.5", "40").
    ///
    /// ## Rounding
    /// Digits past the second decimal place are rounded half away from zero,
    /// so "0.005" becomes 1 cent.
    pub fn parse_decimal(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("empty amount"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a decimal number"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount out of range"))?
        };

        let digits: Vec<i64> = fraction
            .bytes()
            .map(|b| i64::from(b - b'0'))
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|d| *d >= 5);

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(|| invalid("amount out of range"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64`
    /// bounds.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit = Money::from_cents(2500);
    /// assert_eq!(unit.multiply_quantity(3).cents(), 7500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Percentage saved when paying `sale` instead of `regular`, rounded to
    /// the nearest whole percent.
    ///
    /// Returns 0 when there is no discount (sale >= regular) or the regular
    /// price is not positive.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let regular = Money::from_cents(5000);
    /// let sale = Money::from_cents(4000);
    /// assert_eq!(Money::discount_percent(regular, sale), 20);
    /// ```
    pub fn discount_percent(regular: Money, sale: Money) -> u32 {
        if regular.0 <= 0 || sale.0 >= regular.0 {
            return 0;
        }
        let saved = (regular.0 - sale.0) as i128;
        let regular = regular.0 as i128;
        // round half up: (2 * saved * 100 + regular) / (2 * regular)
        ((saved * 200 + regular) / (regular * 2)) as u32
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates so cart totals stay total functions.

/// Debug-friendly rendering. Use [`crate::currency::format_price`] for UI text.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Backend Representation
// =============================================================================

/// Serde adapter for prices expressed in major units.
///
/// The product API sends `"price": 120` or `"sale_price": 99.99` (and
/// occasionally a quoted string). Use on backend document fields:
///
/// ```rust,ignore
/// #[serde(with = "crate::money::major_units")]
/// pub sale_price: Money,
/// ```
pub mod major_units {
    use super::Money;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // display-only path back to the rendering layer
        serializer.serialize_f64(money.cents() as f64 / 100.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Int(major) => major
                .checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| de::Error::custom("amount out of range")),
            RawAmount::Float(value) => {
                if !value.is_finite() {
                    return Err(de::Error::custom("amount is not finite"));
                }
                Money::parse_decimal(&value.to_string()).map_err(de::Error::custom)
            }
            RawAmount::Text(text) => Money::parse_decimal(&text).map_err(de::Error::custom),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
