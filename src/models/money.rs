//! Money type for representing expense amounts
//!
//! Internally stores amounts in cents (i64) so repeated aggregation of
//! currency values never drifts. Addition saturates at the `i64` bounds.
//! The type is currency-agnostic: symbols are added by the display layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use controlfast::models::Money;
    /// let amount = Money::from_cents(2550); // 25.50
    /// assert_eq!(amount.to_string(), "25.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// The amount in major units as a float, for ratios and averages
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Share of `total` this amount represents, in percent (0 when total is zero)
    pub fn percentage_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            0.0
        } else {
            (self.0 as f64 / total.0 as f64) * 100.0
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "25.50", "-25.50", "$25.50", "25", "25.5". Digits beyond the
    /// second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        // Any leading currency symbol is ignored
        let s = s.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.');

        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let cents = match s.split_once('.') {
            Some((units_str, cents_str)) => {
                if cents_str.contains('.') {
                    return Err(invalid());
                }
                let units: i64 = if units_str.is_empty() {
                    0
                } else {
                    units_str.parse().map_err(|_| invalid())?
                };

                if !cents_str.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                let cents: i64 = match cents_str.len() {
                    0 => 0,
                    1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => cents_str[..2].parse().map_err(|_| invalid())?,
                };

                units
                    .checked_mul(100)
                    .and_then(|c| c.checked_add(cents))
                    .ok_or_else(invalid)?
            }
            None => s
                .parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(100))
                .ok_or_else(invalid)?,
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol, e.g. `S/ 25.50` with symbol "S/ "
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol(""))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(2550);
        assert_eq!(m.cents(), 2550);
        assert_eq!(m.units(), 25);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display_has_no_symbol() {
        assert_eq!(Money::from_cents(2550).to_string(), "25.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(format!("{:>8}", Money::from_cents(100)), "    1.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(9050).format_with_symbol("$"), "$90.50");
        assert_eq!(Money::from_cents(1500).format_with_symbol("S/ "), "S/ 15.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("25.50").unwrap().cents(), 2550);
        assert_eq!(Money::parse("$25.50").unwrap().cents(), 2550);
        assert_eq!(Money::parse("S/ 25.50").unwrap().cents(), 2550);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("15").unwrap().cents(), 1500);
        assert_eq!(Money::parse("15.5").unwrap().cents(), 1550);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("1.999").unwrap().cents(), 199);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("12x").is_err());
        assert!(Money::parse("1.x5").is_err());
    }

    #[test]
    fn test_percentage_of() {
        let total = Money::from_cents(9050);
        let part = Money::from_cents(5000);
        assert!((part.percentage_of(total) - 55.248_618).abs() < 1e-4);
        assert_eq!(part.percentage_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(2550),
            Money::from_cents(1500),
            Money::from_cents(5000),
        ];
        let by_ref: Money = amounts.iter().sum();
        let by_value: Money = amounts.into_iter().sum();
        assert_eq!(by_ref.cents(), 9050);
        assert_eq!(by_ref, by_value);
    }

    #[test]
    fn test_repeated_addition_does_not_drift() {
        let total: Money = std::iter::repeat(Money::from_cents(10)).take(1000).sum();
        assert_eq!(total, Money::from_cents(10_000));
    }

    #[test]
    fn test_addition_saturates() {
        let big = Money::from_cents(i64::MAX - 10);
        assert_eq!(big + Money::from_cents(100), Money::from_cents(i64::MAX));

        let mut total = big;
        total += big;
        assert_eq!(total.cents(), i64::MAX);

        let summed: Money = [big, big, big].iter().sum();
        assert!(summed.is_positive());
    }
}
