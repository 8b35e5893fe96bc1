//! Error types for change dispensing.

use thiserror::Error;

use crate::Money;
use crate::model::{CoinCount, Denomination};

/// Top-level error returned by [`Engine::dispense`](super::Engine::dispense).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispenseError {
    #[error("insufficient tender: short by {shortfall}")]
    InsufficientTender { shortfall: Money },

    #[error("insufficient change in machine: missing {missing}")]
    InsufficientChangeInMachine { missing: Money },

    #[error("no combination of stocked coins makes exactly {change}")]
    InsufficientDenominationMix { change: Money },

    #[error("inventory invariant broken: {0}")]
    Inventory(#[from] InventoryError),
}

/// Error raised by inventory mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("denomination {denomination} exhausted: requested {requested}, remaining {remaining}")]
    Exhausted {
        denomination: Denomination,
        requested: CoinCount,
        remaining: CoinCount,
    },

    #[error("denomination {0} is not in the catalog")]
    UnknownDenomination(Denomination),

    #[error("denomination {0} listed more than once")]
    DuplicateDenomination(Denomination),
}

/// Error raised by the greedy allocator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("{remainder} left over after the smallest denomination")]
    InsufficientDenominationMix { remainder: Money },
}
