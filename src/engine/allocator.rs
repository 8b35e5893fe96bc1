//! Greedy coin selection with per-denomination back-off.

use std::collections::BTreeMap;
use tracing::debug;

use crate::Money;
use crate::model::{CoinCount, CoinStack, Denomination};

use super::error::AllocationError;
use super::feasibility::can_exactly_cover;

/// Coins chosen by [`allocate`], not yet taken out of the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Allocation {
    /// Coins in allocation order, largest first.
    pub coins: Vec<Denomination>,
    /// Coins to remove per denomination.
    pub mutations: BTreeMap<Denomination, CoinCount>,
}

/// Pick coins for `amount` from `stacks`, which must be ordered by
/// descending denomination.
///
/// Each denomination takes as many coins as fit, backing off one coin at a
/// time while the leftover cannot be made exactly from the smaller stacks.
/// Works on a read-only view; nothing is removed until the caller commits.
pub fn allocate(amount: Money, stacks: &[CoinStack]) -> Result<Allocation, AllocationError> {
    let mut allocation = Allocation::default();
    let mut remaining_amount = amount.minor();

    for (idx, stack) in stacks.iter().enumerate() {
        if remaining_amount == 0 {
            break;
        }
        let value = u64::from(stack.denomination);
        if value == 0 || stack.remaining == 0 {
            continue;
        }

        let smaller = &stacks[idx + 1..];
        let greedy = u64::from(stack.remaining).min(remaining_amount / value);
        let mut count = greedy;
        while count > 0
            && !can_exactly_cover(Money::from_minor(remaining_amount - count * value), smaller)
        {
            count -= 1;
        }

        if count < greedy {
            debug!(
                denomination = stack.denomination,
                greedy,
                taken = count,
                "backed off greedy share to keep remainder coverable"
            );
        }
        if count == 0 {
            continue;
        }

        // count <= stack.remaining, so it fits in a CoinCount
        let taken = count as CoinCount;
        allocation
            .coins
            .extend(std::iter::repeat_n(stack.denomination, taken as usize));
        allocation.mutations.insert(stack.denomination, taken);
        remaining_amount -= count * value;
    }

    if remaining_amount > 0 {
        return Err(AllocationError::InsufficientDenominationMix {
            remainder: Money::from_minor(remaining_amount),
        });
    }

    Ok(allocation)
}
