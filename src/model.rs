//! Core domain types for the change dispenser.

use crate::Money;
use crate::engine::DispenseError;

/// Coin face value in minor units.
pub type Denomination = u32;

/// Number of coins held in one stack.
pub type CoinCount = u32;

/// Caller-supplied request identifier.
pub type RequestId = u32;

/// Coins of one denomination currently held by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoinStack {
    pub denomination: Denomination,
    pub remaining: CoinCount,
}

impl CoinStack {
    pub fn new(denomination: Denomination, remaining: CoinCount) -> Self {
        Self {
            denomination,
            remaining,
        }
    }

    /// Face value of the whole stack.
    pub fn value(&self) -> Money {
        Money::from_minor(u64::from(self.denomination) * u64::from(self.remaining))
    }
}

/// A purchase paid with a tendered amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRequest {
    pub id: RequestId,
    pub purchase: Money,
    pub tender: Money,
}

impl ChangeRequest {
    pub fn new(id: RequestId, purchase: Money, tender: Money) -> Self {
        Self {
            id,
            purchase,
            tender,
        }
    }

    /// Change owed, or `None` if the tender does not cover the purchase.
    pub fn required_change(&self) -> Option<Money> {
        self.tender.checked_sub(self.purchase)
    }
}

/// Outcome of one request processed by [`Engine::run`](crate::Engine::run).
#[derive(Debug)]
pub struct Receipt {
    pub request: RequestId,
    pub change: Option<Money>,
    pub result: Result<Vec<Denomination>, DispenseError>,
}
