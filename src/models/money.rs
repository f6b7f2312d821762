//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that debit/credit totals are
//! summed and compared exactly. The backend speaks floating-point JSON
//! numbers; conversion happens only at that boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest magnitude accepted from outside, in cents (ten trillion units)
const LIMIT_CENTS: i64 = 1_000_000_000_000_000;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// Arithmetic saturates at the `i64` range; amounts past [`Money::LIMIT`]
/// are refused at the input boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted from the wire or from user input
    pub const LIMIT: Money = Money(LIMIT_CENTS);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use ledgerdesk::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a decimal amount received over the wire, rounding to the nearest cent
    ///
    /// `None` for NaN, infinities and anything past [`Money::LIMIT`].
    pub fn from_decimal(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() > LIMIT_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Whole units to cents, `None` past [`Money::LIMIT`]
    pub fn from_units(units: i64) -> Option<Self> {
        units
            .checked_mul(100)
            .map(Self)
            .filter(Money::is_within_limit)
    }

    /// True when the magnitude does not exceed [`Money::LIMIT`]
    pub const fn is_within_limit(&self) -> bool {
        self.0 >= -LIMIT_CENTS && self.0 <= LIMIT_CENTS
    }

    /// Decimal representation for the wire
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
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

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parse a money amount typed by a user
    ///
    /// Accepts "2500", "2,500.00", "-10.5", "MYR 10.50", "RM10.50" and "$10".
    /// Digits past the second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, s),
        };

        let s = strip_currency_prefix(s);
        let cleaned: String = s.chars().filter(|c| *c != ',').collect();
        let invalid = || MoneyParseError::InvalidFormat(original.trim().to_string());

        if cleaned.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (cleaned.as_str(), ""),
        };

        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && fraction.is_empty())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction[..2].parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .filter(|v| *v <= LIMIT_CENTS)
            .ok_or_else(|| MoneyParseError::OutOfRange(original.trim().to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a leading currency code, e.g. `MYR 2,500.00`
    pub fn format_with_currency(&self, code: &str) -> String {
        if code.is_empty() {
            return self.to_string();
        }
        if self.is_negative() {
            format!("-{} {}", code, self.abs())
        } else {
            format!("{} {}", code, self)
        }
    }
}

fn strip_currency_prefix(s: &str) -> &str {
    for prefix in ["MYR", "RM", "$"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            return rest.trim_start();
        }
    }
    s
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            group_thousands(self.units().abs()),
            self.cents_part()
        )
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
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
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
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(250_000).to_string(), "2,500.00");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "1,234,567.89");
    }

    #[test]
    fn test_format_with_currency() {
        assert_eq!(
            Money::from_cents(250_000).format_with_currency("MYR"),
            "MYR 2,500.00"
        );
        assert_eq!(
            Money::from_cents(-500).format_with_currency("MYR"),
            "-MYR 5.00"
        );
        assert_eq!(Money::from_cents(500).format_with_currency(""), "5.00");
    }

    #[test]
    fn test_from_decimal_rounds_to_cent() {
        assert_eq!(Money::from_decimal(2500.0), Some(Money::from_cents(250_000)));
        assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_decimal(19.999), Some(Money::from_cents(2000)));
        assert_eq!(Money::from_decimal(f64::NAN), None);
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_amounts_past_limit_are_refused() {
        assert_eq!(Money::from_decimal(1e17), None);
        assert_eq!(Money::from_units(100_000_000_000_000_000), None);
        assert_eq!(Money::from_units(i64::MAX), None);
        assert_eq!(Money::from_units(2500), Some(Money::from_cents(250_000)));
        assert!(Money::LIMIT.is_within_limit());
        assert!(!(Money::LIMIT + Money::from_cents(1)).is_within_limit());
        assert!(matches!(
            Money::parse("99999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + max, max);
        assert_eq!(-max - max, Money::from_cents(i64::MIN));
        assert_eq!(Money::from_cents(i64::MIN).abs(), max);
        let total: Money = [max, max].iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(1050).to_decimal(), 10.5);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("2,500.00").unwrap().cents(), 250_000);
        assert_eq!(Money::parse("MYR 10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("RM10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("0.059").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse(".").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
    }
}
