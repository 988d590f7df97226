//! # Money Module
//!
//! Provides the `Money` type used for every amount the client displays or
//! totals locally.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The backend sends amounts as JSON numbers (f64):                       │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  Summing a draft of 20 lines in f64 drifts the last digit.             │
//! │                                                                         │
//! │  OUR SOLUTION: convert once at the edge, then integer poisha            │
//! │    12.345 → 1235 poisha → "TK12.35"                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bizdesk_core::money::Money;
//!
//! let rate = Money::from_amount(12.5);
//! let line = Money::line_total(4.0, 12.5);
//! assert_eq!(line, rate * 4);
//! assert_eq!(line.to_string(), "TK50.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::CURRENCY_PREFIX;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (poisha, 1/100 taka).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from poisha.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Converts a wire amount (major units, f64) into Money.
    ///
    /// Rounds half away from zero to the nearest poisha. Non-finite input
    /// (NaN from a blank form field) becomes zero.
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Total for one order line: quantity × rate, rounded once.
    pub fn line_total(quantity: f64, rate: f64) -> Self {
        Money::from_amount(quantity * rate)
    }

    /// Returns the value in poisha.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units (for sending back to the API).
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Formats with an explicit currency prefix, e.g. `"TK"` → `TK10.50`.
    ///
    /// The sign goes before the prefix: `-TK3.00`.
    pub fn format_with(&self, prefix: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, prefix, abs / 100, abs % 100)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Uses the default `TK` prefix.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(CURRENCY_PREFIX))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_amount_rounds_to_poisha() {
        assert_eq!(Money::from_amount(10.5).minor(), 1050);
        assert_eq!(Money::from_amount(0.125).minor(), 13);
        assert_eq!(Money::from_amount(-2.5).minor(), -250);
        assert_eq!(Money::from_amount(f64::NAN), Money::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1099).to_string(), "TK10.99");
        assert_eq!(Money::from_minor(5).to_string(), "TK0.05");
        assert_eq!(Money::from_minor(-300).to_string(), "-TK3.00");
        assert_eq!(Money::zero().to_string(), "TK0.00");
    }

    #[test]
    fn test_format_with_custom_prefix() {
        assert_eq!(Money::from_minor(123456).format_with("৳"), "৳1234.56");
        assert_eq!(Money::from_minor(100).format_with(""), "1.00");
    }

    #[test]
    fn test_sum_avoids_float_drift() {
        let total: Money = std::iter::repeat(Money::from_amount(0.1)).take(3).sum();
        assert_eq!(total, Money::from_amount(0.3));
        assert_eq!(total.amount(), 0.3);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(Money::line_total(3.0, 2.5).minor(), 750);
        assert_eq!(Money::line_total(0.0, 99.0), Money::zero());
    }
}
