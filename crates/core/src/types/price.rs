//! Whole-rupee price representation.
//!
//! Prices in the catalog are whole rupees with no minor unit, so they are
//! stored as a plain unsigned integer. Display follows the `en-IN` locale:
//! the last three digits form one group and the rest are grouped in pairs
//! (`₹1,23,456`).

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A price in whole rupees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero rupees.
    pub const ZERO: Self = Self(0);

    /// Currency symbol used for display.
    pub const SYMBOL: &'static str = "\u{20b9}";

    /// Create a new price from a whole-rupee amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in whole rupees.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Amount with `en-IN` digit grouping and no currency symbol.
    #[must_use]
    pub fn grouped(self) -> String {
        let digits = self.0.to_string();
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 2);

        for (i, c) in digits.chars().enumerate() {
            out.push(c);
            let after = len - i - 1;
            if after >= 3 && (after - 3) % 2 == 0 {
                out.push(',');
            }
        }

        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::SYMBOL, self.grouped())
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_short_amounts() {
        assert_eq!(Price::new(0).grouped(), "0");
        assert_eq!(Price::new(899).grouped(), "899");
    }

    #[test]
    fn test_grouped_indian_style() {
        assert_eq!(Price::new(2400).grouped(), "2,400");
        assert_eq!(Price::new(15_999).grouped(), "15,999");
        assert_eq!(Price::new(123_456).grouped(), "1,23,456");
        assert_eq!(Price::new(12_345_678).grouped(), "1,23,45,678");
    }

    #[test]
    fn test_display_has_rupee_symbol() {
        assert_eq!(Price::new(5699).to_string(), "\u{20b9}5,699");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::new(2400).times(2), Price::new(899).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(5699));
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }
}
