//! Cashback and auto-stake calculation
//!
//! Every spend earns a fixed cashback percentage, all of which is auto-staked
//! into the vault. Gold accounts stake in unit-dollar increments ("micro-stake");
//! the increments always sum to the same total as a standard stake.

use std::iter;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use spend2earn_common::{BadgeTier, CreditError};

/// Default cashback rate (2.5%)
pub const DEFAULT_CASHBACK_RATE: Decimal = dec!(0.025);

/// Cashback earned and staked for a single spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendOutcome {
    pub cashback: Decimal,
    pub stake_amount: Decimal,
}

/// Compute cashback and auto-stake for a spend amount
pub fn apply_spend(amount: Decimal, rate: Decimal) -> Result<SpendOutcome, CreditError> {
    let cashback = amount.checked_mul(rate).ok_or(CreditError::Overflow)?;
    Ok(SpendOutcome {
        cashback,
        stake_amount: cashback,
    })
}

/// How the stake is deposited into the vault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeMode {
    Standard,
    Micro,
}

impl StakeMode {
    pub fn for_tier(tier: BadgeTier) -> Self {
        if tier.micro_stake_enabled() {
            StakeMode::Micro
        } else {
            StakeMode::Standard
        }
    }

    /// Number of vault deposits a stake is made in, saturating at `u64::MAX`
    pub fn deposit_count(&self, stake: Decimal) -> u64 {
        if stake <= Decimal::ZERO {
            return 0;
        }
        match self {
            StakeMode::Standard => 1,
            StakeMode::Micro => {
                let whole = stake.trunc();
                let partial = u64::from(stake > whole);
                whole.to_u64().unwrap_or(u64::MAX).saturating_add(partial)
            }
        }
    }
}

/// Whole-dollar increments followed by the fractional remainder.
///
/// Increments are produced lazily; a large stake costs nothing until iterated.
pub fn micro_stake_increments(stake: Decimal) -> impl Iterator<Item = Decimal> {
    let stake = stake.max(Decimal::ZERO);
    let whole = stake.trunc();
    let remainder = stake - whole;
    let count = whole.to_usize().unwrap_or(usize::MAX);

    iter::repeat(Decimal::ONE)
        .take(count)
        .chain((remainder > Decimal::ZERO).then_some(remainder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate_on_100() {
        let outcome = apply_spend(dec!(100), DEFAULT_CASHBACK_RATE).unwrap();
        assert_eq!(outcome.cashback, dec!(2.5));
        assert_eq!(outcome.stake_amount, dec!(2.5));
    }

    #[test]
    fn test_custom_rate() {
        let outcome = apply_spend(dec!(45.99), dec!(0.05)).unwrap();
        assert_eq!(outcome.cashback, dec!(2.2995));
        assert_eq!(outcome.stake_amount, outcome.cashback);
    }

    #[test]
    fn test_micro_stake_preserves_total() {
        let increments: Vec<Decimal> = micro_stake_increments(dec!(3.75)).collect();
        assert_eq!(increments, vec![dec!(1), dec!(1), dec!(1), dec!(0.75)]);
        assert_eq!(increments.iter().sum::<Decimal>(), dec!(3.75));
    }

    #[test]
    fn test_micro_stake_below_one_dollar() {
        let increments: Vec<Decimal> = micro_stake_increments(dec!(0.1125)).collect();
        assert_eq!(increments, vec![dec!(0.1125)]);
        assert_eq!(micro_stake_increments(dec!(0)).count(), 0);
    }

    #[test]
    fn test_stake_mode_for_tier() {
        assert_eq!(StakeMode::for_tier(BadgeTier::Gold), StakeMode::Micro);
        assert_eq!(StakeMode::for_tier(BadgeTier::Silver), StakeMode::Standard);
        assert_eq!(StakeMode::Standard.deposit_count(dec!(2.5)), 1);
        assert_eq!(StakeMode::Standard.deposit_count(dec!(0)), 0);
    }

    #[test]
    fn test_micro_deposit_count_matches_increments() {
        for stake in [dec!(0), dec!(0.4), dec!(1), dec!(3.75), dec!(25)] {
            let count = micro_stake_increments(stake).count() as u64;
            assert_eq!(StakeMode::Micro.deposit_count(stake), count);
        }
    }

    #[test]
    fn test_large_micro_stake_is_counted_without_allocating() {
        // 2.5% of 800 billion
        assert_eq!(StakeMode::Micro.deposit_count(dec!(20000000000)), 20_000_000_000);
        assert_eq!(StakeMode::Micro.deposit_count(Decimal::MAX), u64::MAX);

        let mut increments = micro_stake_increments(dec!(20000000000.5));
        assert_eq!(increments.next(), Some(Decimal::ONE));
    }

    #[test]
    fn test_apply_spend_overflow() {
        assert_eq!(apply_spend(Decimal::MAX, dec!(2)), Err(CreditError::Overflow));
        assert!(apply_spend(Decimal::MAX, DEFAULT_CASHBACK_RATE).is_ok());
    }
}
