//! Currency code type and price formatting.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Currency`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CurrencyError {
    /// The input string is empty.
    #[error("currency code cannot be empty")]
    Empty,
    /// The input is not exactly three uppercase ASCII letters.
    #[error("currency code must be exactly 3 uppercase ASCII letters, got {0:?}")]
    Malformed(String),
}

/// An ISO-4217-style currency code.
///
/// The storefront API reports prices in a single currency per cart; the code
/// is carried as data rather than a closed enum because the backend decides
/// which currencies exist. Anything that is not exactly three uppercase
/// ASCII letters is rejected by [`Currency::parse`]; the lenient
/// [`Currency::parse_or_default`] falls back to the store default (`LKR`)
/// instead, matching how the cart formatter must never fail.
///
/// ## Examples
///
/// ```
/// use thambili_core::Currency;
///
/// assert!(Currency::parse("LKR").is_ok());
/// assert!(Currency::parse("usd").is_err());
/// assert_eq!(Currency::parse_or_default("??").as_str(), "LKR");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// The store default currency (Sri Lankan rupee).
    pub const DEFAULT_CODE: &'static str = "LKR";

    /// Parse a `Currency` from a string.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or is not exactly
    /// three uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, CurrencyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CurrencyError::Empty);
        }
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CurrencyError::Malformed(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parse a `Currency`, falling back to the store default on any failure.
    ///
    /// `None`, empty, and malformed codes all yield `LKR`.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Returns the currency code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Format an amount for display, e.g. `LKR 4,500.00`.
    ///
    /// The amount is rounded half-away-from-zero to two decimal places and
    /// the integer part is grouped with thousands separators. Total for any
    /// `Decimal`, including the numeric bounds.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let magnitude = rounded.abs();
        // Units and cents are split rather than scaled into one cent count;
        // multiplying by 100 overflows near Decimal::MAX.
        let units = magnitude.trunc().to_i128().unwrap_or(0);
        let cents = (magnitude.fract() * Decimal::ONE_HUNDRED)
            .to_i128()
            .unwrap_or(0);
        let sign = if negative { "-" } else { "" };
        format!("{} {sign}{}.{cents:02}", self.0, group_thousands(units))
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self(Self::DEFAULT_CODE.to_owned())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Insert `,` separators into a non-negative integer's decimal digits.
fn group_thousands(value: i128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
