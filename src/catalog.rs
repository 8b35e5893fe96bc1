//! Denomination catalogs per currency profile.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::Denomination;

/// Errors when building a custom catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no denominations")]
    Empty,
    #[error("denomination must be positive")]
    ZeroDenomination,
    #[error("denomination {0} listed more than once")]
    Duplicate(Denomination),
}

/// Currency profiles with a built-in coin set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    BritishPound,
    UsDollar,
    NorwegianKrone,
}

impl Currency {
    fn coins(self) -> &'static [Denomination] {
        match self {
            Currency::BritishPound => &[50, 20, 10, 5, 2, 1],
            Currency::UsDollar => &[25, 10, 5, 1],
            Currency::NorwegianKrone => &[20, 10, 5, 1],
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gbp" => Ok(Currency::BritishPound),
            "usd" => Ok(Currency::UsDollar),
            "nok" => Ok(Currency::NorwegianKrone),
            other => Err(format!("unknown currency '{other}' (expected gbp, usd or nok)")),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::BritishPound => "gbp",
            Currency::UsDollar => "usd",
            Currency::NorwegianKrone => "nok",
        };
        f.write_str(code)
    }
}

/// Immutable set of denominations, strictly descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    denominations: Vec<Denomination>,
}

impl Catalog {
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            denominations: currency.coins().to_vec(),
        }
    }

    /// Build a catalog from arbitrary values; input order does not matter.
    pub fn new(values: impl IntoIterator<Item = Denomination>) -> Result<Self, CatalogError> {
        let mut denominations: Vec<Denomination> = values.into_iter().collect();
        if denominations.is_empty() {
            return Err(CatalogError::Empty);
        }
        if denominations.contains(&0) {
            return Err(CatalogError::ZeroDenomination);
        }

        denominations.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(pair) = denominations.windows(2).find(|w| w[0] == w[1]) {
            return Err(CatalogError::Duplicate(pair[0]));
        }

        Ok(Self { denominations })
    }

    pub fn denominations(&self) -> &[Denomination] {
        &self.denominations
    }

    pub fn contains(&self, denomination: Denomination) -> bool {
        self.denominations.contains(&denomination)
    }

    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }
}
