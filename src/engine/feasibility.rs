//! Bounded exact-cover check.
//!
//! Each stack may contribute at most `remaining` coins. The sweep for one
//! denomination records how many of its coins every newly reached sum used,
//! so a sum is only extended while that count stays under the stack bound.

use crate::Money;
use crate::model::{CoinCount, CoinStack};

/// Whether some combination of coins from `stacks`, within their remaining
/// counts, sums to exactly `amount`.
pub fn can_exactly_cover(amount: Money, stacks: &[CoinStack]) -> bool {
    if amount == Money::ZERO {
        return true;
    }
    let available: Money = stacks.iter().map(CoinStack::value).sum();
    if amount > available {
        return false;
    }
    let Ok(target) = usize::try_from(amount.minor()) else {
        return false;
    };

    let mut reachable = vec![false; target + 1];
    reachable[0] = true;
    let mut used: Vec<CoinCount> = vec![0; target + 1];

    for stack in stacks {
        let denomination = stack.denomination as usize;
        if denomination == 0 || stack.remaining == 0 || denomination > target {
            continue;
        }

        used.fill(0);
        for sum in denomination..=target {
            let from = sum - denomination;
            if !reachable[sum] && reachable[from] && used[from] < stack.remaining {
                reachable[sum] = true;
                used[sum] = used[from] + 1;
            }
        }

        if reachable[target] {
            return true;
        }
    }

    reachable[target]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacks(pairs: &[(u32, u32)]) -> Vec<CoinStack> {
        pairs.iter().map(|&(d, n)| CoinStack::new(d, n)).collect()
    }

    fn cover(amount: u64, pairs: &[(u32, u32)]) -> bool {
        can_exactly_cover(Money::from_minor(amount), &stacks(pairs))
    }

    #[test]
    fn zero_is_always_coverable() {
        assert!(cover(0, &[]));
        assert!(cover(0, &[(25, 0)]));
    }

    #[test]
    fn empty_stacks_cover_nothing_positive() {
        assert!(!cover(1, &[]));
        assert!(!cover(5, &[(5, 0)]));
    }

    #[test]
    fn exact_single_denomination() {
        assert!(cover(50, &[(10, 5)]));
        assert!(!cover(60, &[(10, 5)]));
        assert!(!cover(15, &[(10, 5)]));
    }

    #[test]
    fn respects_stock_bounds() {
        // unbounded reachability would accept 6 = 2+2+2
        assert!(!cover(6, &[(2, 2)]));
        assert!(cover(6, &[(2, 2), (1, 2)]));
        assert!(!cover(7, &[(2, 2), (1, 2)]));
    }

    #[test]
    fn value_sufficient_but_mix_wrong() {
        // 255 in the machine, still no way to make 10
        assert!(!cover(10, &[(25, 10), (5, 1)]));
        assert!(cover(30, &[(25, 10), (5, 1)]));
    }

    #[test]
    fn non_canonical_sets() {
        assert!(cover(6, &[(5, 1), (2, 3)]));
        assert!(!cover(1, &[(5, 1), (2, 3)]));
        assert!(cover(12, &[(4, 3), (3, 0)]));
        assert!(cover(11, &[(4, 2), (3, 1)]));
        assert!(!cover(10, &[(4, 1), (3, 1)]));
    }

    #[test]
    fn british_pound_full_stock() {
        let full = [(50, 10), (20, 10), (10, 10), (5, 10), (2, 10), (1, 10)];
        assert!(cover(139, &full));
        // total value is 880
        assert!(cover(880, &full));
        assert!(!cover(881, &full));
    }
}
