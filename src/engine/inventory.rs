use std::collections::HashSet;

use crate::Money;
use crate::catalog::Catalog;
use crate::model::{CoinCount, CoinStack, Denomination};

use super::allocator::Allocation;
use super::error::InventoryError;

/// Coin stacks held by the machine, ordered by descending denomination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    stacks: Vec<CoinStack>,
}

impl Inventory {
    /// One stack per catalog denomination, each holding `initial` coins.
    pub fn new(catalog: &Catalog, initial: CoinCount) -> Self {
        Self {
            stacks: catalog
                .denominations()
                .iter()
                .map(|&d| CoinStack::new(d, initial))
                .collect(),
        }
    }

    pub fn stacks(&self) -> &[CoinStack] {
        &self.stacks
    }

    pub fn total_value(&self) -> Money {
        self.stacks.iter().map(CoinStack::value).sum()
    }

    pub fn remaining(&self, denomination: Denomination) -> Option<CoinCount> {
        self.stack(denomination).map(|s| s.remaining)
    }

    pub fn decrement(
        &mut self,
        denomination: Denomination,
        by: CoinCount,
    ) -> Result<(), InventoryError> {
        let stack = self
            .stacks
            .iter_mut()
            .find(|s| s.denomination == denomination)
            .ok_or(InventoryError::UnknownDenomination(denomination))?;

        if by > stack.remaining {
            return Err(InventoryError::Exhausted {
                denomination,
                requested: by,
                remaining: stack.remaining,
            });
        }

        stack.remaining -= by;
        Ok(())
    }

    /// Overwrite the counts of the listed denominations.
    ///
    /// Denominations not listed keep their count. Nothing is written unless
    /// every entry is valid.
    pub fn replace_all(&mut self, stacks: &[CoinStack]) -> Result<(), InventoryError> {
        let mut seen = HashSet::with_capacity(stacks.len());
        for stack in stacks {
            if self.stack(stack.denomination).is_none() {
                return Err(InventoryError::UnknownDenomination(stack.denomination));
            }
            if !seen.insert(stack.denomination) {
                return Err(InventoryError::DuplicateDenomination(stack.denomination));
            }
        }

        for replacement in stacks {
            if let Some(stack) = self
                .stacks
                .iter_mut()
                .find(|s| s.denomination == replacement.denomination)
            {
                stack.remaining = replacement.remaining;
            }
        }
        Ok(())
    }

    /// Apply an allocation's decrements, all or nothing.
    pub fn commit(&mut self, allocation: &Allocation) -> Result<(), InventoryError> {
        for (&denomination, &count) in &allocation.mutations {
            let remaining = self
                .remaining(denomination)
                .ok_or(InventoryError::UnknownDenomination(denomination))?;
            if count > remaining {
                return Err(InventoryError::Exhausted {
                    denomination,
                    requested: count,
                    remaining,
                });
            }
        }

        for (&denomination, &count) in &allocation.mutations {
            self.decrement(denomination, count)?;
        }
        Ok(())
    }

    fn stack(&self, denomination: Denomination) -> Option<&CoinStack> {
        self.stacks.iter().find(|s| s.denomination == denomination)
    }
}
