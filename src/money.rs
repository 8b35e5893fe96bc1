use std::fmt;
use thiserror::Error;

/// Errors raised when converting external decimal input into [`Money`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("malformed amount '{0}'")]
    Malformed(String),

    #[error("negative amount '{0}'")]
    Negative(String),

    #[error("amount '{0}' is not a whole number of minor units")]
    FractionalMinorUnit(String),
}

/// Non-negative monetary amount, stored as an integer count of minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(u64);

impl Money {
    const SCALE: u64 = 100;

    pub const ZERO: Money = Money(0);

    pub const fn from_minor(value: u64) -> Self {
        Money(value)
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Parse a decimal string in major units (`"1.25"`).
    ///
    /// Digits past the second decimal place must be zero: `"1.250"` is
    /// accepted, `"1.255"` is rejected instead of being truncated.
    pub fn from_decimal(input: &str) -> Result<Self, MoneyError> {
        let text = input.trim();
        if text.starts_with('-') {
            return Err(MoneyError::Negative(text.to_string()));
        }

        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
            return Err(MoneyError::Malformed(text.to_string()));
        }

        let (cents, rest) = frac.split_at(frac.len().min(2));
        if rest.bytes().any(|b| b != b'0') {
            return Err(MoneyError::FractionalMinorUnit(text.to_string()));
        }

        let malformed = || MoneyError::Malformed(text.to_string());
        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| malformed())?
        };
        let minor: u64 = match cents.len() {
            0 => 0,
            1 => cents.parse::<u64>().map_err(|_| malformed())? * 10,
            _ => cents.parse().map_err(|_| malformed())?,
        };

        whole
            .checked_mul(Self::SCALE)
            .and_then(|w| w.checked_add(minor))
            .map(Money)
            .ok_or_else(malformed)
    }

    /// Convert a floating major-unit value, rejecting anything that does not
    /// land on a whole minor unit.
    pub fn from_float(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::Malformed(value.to_string()));
        }
        if value < 0.0 {
            return Err(MoneyError::Negative(value.to_string()));
        }

        let scaled = value * Self::SCALE as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(MoneyError::FractionalMinorUnit(value.to_string()));
        }
        if rounded >= u64::MAX as f64 {
            return Err(MoneyError::Malformed(value.to_string()));
        }

        Ok(Money(rounded as u64))
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::SCALE;
        let frac = self.0 % Self::SCALE;
        write!(f, "{whole}.{frac:02}")
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}
