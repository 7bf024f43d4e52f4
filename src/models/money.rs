//! Money type for currency amounts
//!
//! Amounts are stored as `f64` so the ledger document keeps plain JSON
//! numbers. NaN and infinities can arise from arithmetic but are never valid
//! JSON, so serialization writes them as `0`.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in currency units (e.g. dollars)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    pub const fn new(amount: f64) -> Self {
        Self(amount)
    }

    pub const fn zero() -> Self {
        Self(0.0)
    }

    pub const fn value(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// A valid transaction amount is finite and strictly positive
    pub fn is_valid_amount(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// This amount, or zero if it is NaN or infinite
    pub fn sanitized(self) -> Self {
        if self.0.is_finite() {
            self
        } else {
            Self::zero()
        }
    }

    /// Value rounded to whole cents
    pub fn cents(&self) -> i64 {
        (self.sanitized().0 * 100.0).round() as i64
    }

    /// Parse an amount from user input
    ///
    /// Accepts formats: "10", "10.5", "$10.50", "-3.25"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let (negative, rest) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest).replace(',', "");

        let value: f64 = rest
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.abs();
        format!("{}{}{}.{:02}", sign, symbol, cents / 100, cents % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.sanitized().0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + *m)
    }
}

/// Error parsing a money amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::new(15.0).to_string(), "$15.00");
        assert_eq!(Money::new(-3.5).to_string(), "-$3.50");
        assert_eq!(Money::new(0.1 + 0.2).to_string(), "$0.30");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::new(1234.5).format_with_symbol("€"), "€1234.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10").unwrap(), Money::new(10.0));
        assert_eq!(Money::parse("10.5").unwrap(), Money::new(10.5));
        assert_eq!(Money::parse("$10.50").unwrap(), Money::new(10.5));
        assert_eq!(Money::parse("-3.25").unwrap(), Money::new(-3.25));
        assert_eq!(Money::parse("1,000").unwrap(), Money::new(1000.0));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_valid_amount() {
        assert!(Money::new(0.01).is_valid_amount());
        assert!(!Money::zero().is_valid_amount());
        assert!(!Money::new(-1.0).is_valid_amount());
        assert!(!Money::new(f64::NAN).is_valid_amount());
        assert!(!Money::new(f64::INFINITY).is_valid_amount());
    }

    #[test]
    fn test_non_finite_serializes_as_zero() {
        assert_eq!(serde_json::to_string(&Money::new(f64::NAN)).unwrap(), "0.0");
        assert_eq!(
            serde_json::to_string(&Money::new(f64::NEG_INFINITY)).unwrap(),
            "0.0"
        );
        assert_eq!(serde_json::to_string(&Money::new(2.5)).unwrap(), "2.5");
    }

    #[test]
    fn test_arithmetic() {
        let mut m = Money::new(20.0);
        m -= Money::new(5.0);
        assert_eq!(m, Money::new(15.0));
        m += Money::new(1.0);
        assert_eq!(m, Money::new(16.0));
        assert_eq!(-m, Money::new(-16.0));

        let total: Money = vec![Money::new(1.0), Money::new(2.0)].into_iter().sum();
        assert_eq!(total, Money::new(3.0));
    }
}
