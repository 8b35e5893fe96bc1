//! Command line configuration for the `change-eng` binary.

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::Currency;
use crate::engine::DEFAULT_STOCK;
use crate::model::CoinCount;

pub const USAGE: &str =
    "usage: change-eng <requests.csv> [--currency gbp|usd|nok] [--stock N] [--restock stock.csv]";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing requests file\n{usage}", usage = USAGE)]
    MissingInput,

    #[error("unexpected argument '{0}'\n{usage}", usage = USAGE)]
    UnexpectedArgument(String),

    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("{0}")]
    Currency(String),

    #[error("invalid stock count '{0}'")]
    Stock(String),
}

/// Runtime configuration; everything except the input path has a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub currency: Currency,
    pub stock: CoinCount,
    pub restock: Option<PathBuf>,
}

impl Config {
    /// Parse arguments, not including the program name.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, ConfigError> {
        let mut input = None;
        let mut currency = Currency::default();
        let mut stock = DEFAULT_STOCK;
        let mut restock = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--currency" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--currency"))?;
                    currency = value.parse().map_err(ConfigError::Currency)?;
                }
                "--stock" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--stock"))?;
                    stock = value.parse().map_err(|_| ConfigError::Stock(value))?;
                }
                "--restock" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--restock"))?;
                    restock = Some(PathBuf::from(value));
                }
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnexpectedArgument(arg.clone()));
                }
                _ if input.is_none() => input = Some(PathBuf::from(&arg)),
                _ => return Err(ConfigError::UnexpectedArgument(arg.clone())),
            }
        }

        Ok(Self {
            input: input.ok_or(ConfigError::MissingInput)?,
            currency,
            stock,
            restock,
        })
    }
}
