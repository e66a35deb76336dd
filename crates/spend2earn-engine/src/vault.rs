//! Vault yield accrual and yield-funded repayment
//!
//! With auto-repay on, each day's yield is credited to the vault and then
//! applied to the loan:
//!
//! ```text
//! daily_yield        = vault_balance × apy / 100 / 365
//! days_to_full_repay = ceil(loan_balance / daily_yield)
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use spend2earn_common::CreditError;

/// Default vault APY in percent
pub const DEFAULT_VAULT_APY: Decimal = dec!(8.5);

const DAYS_PER_YEAR: Decimal = dec!(365);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// One day of yield on the vault balance at `apy_pct`
pub fn daily_yield(vault_balance: Decimal, apy_pct: Decimal) -> Result<Decimal, CreditError> {
    if vault_balance <= Decimal::ZERO || apy_pct <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let annual = vault_balance.checked_mul(apy_pct).ok_or(CreditError::Overflow)?;
    Ok(annual / dec!(100) / DAYS_PER_YEAR)
}

/// Yield-funded repayment schedule for an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoRepayPlan {
    pub enabled: bool,
    /// Amount the next daily accrual would apply to the loan
    pub next_repayment: Decimal,
    /// Days of yield needed to clear the loan at today's rate; `None` when
    /// the vault earns nothing
    pub days_to_full_repay: Option<u64>,
}

impl AutoRepayPlan {
    pub fn for_balances(
        enabled: bool,
        vault_balance: Decimal,
        loan_balance: Decimal,
        apy_pct: Decimal,
    ) -> Self {
        let loan = loan_balance.max(Decimal::ZERO);
        let daily = daily_yield(vault_balance, apy_pct).unwrap_or(Decimal::ZERO);

        let days_to_full_repay = if loan.is_zero() {
            Some(0)
        } else if daily.is_zero() {
            None
        } else {
            loan.checked_div(daily).and_then(|days| days.ceil().to_u64())
        };

        Self {
            enabled,
            next_repayment: if enabled { daily.min(loan) } else { Decimal::ZERO },
            days_to_full_repay,
        }
    }
}

/// How much of a loan principal vault yield covers over a horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentProjection {
    pub principal: Decimal,
    pub yield_rate_pct: Decimal,
    pub months: u32,
    pub monthly_yield: Decimal,
    pub total_yield: Decimal,
    /// Share of principal covered by yield, capped at 100
    pub coverage_pct: Decimal,
    pub remaining_balance: Decimal,
}

impl RepaymentProjection {
    pub fn simulate(
        principal: Decimal,
        yield_rate_pct: Decimal,
        months: u32,
    ) -> Result<Self, CreditError> {
        if principal <= Decimal::ZERO || yield_rate_pct < Decimal::ZERO {
            return Err(CreditError::InvalidAmount);
        }

        let monthly_yield = principal
            .checked_mul(yield_rate_pct)
            .ok_or(CreditError::Overflow)?
            / dec!(100)
            / MONTHS_PER_YEAR;
        let total_yield = monthly_yield
            .checked_mul(Decimal::from(months))
            .ok_or(CreditError::Overflow)?;
        let coverage_pct = total_yield
            .checked_div(principal)
            .and_then(|share| share.checked_mul(dec!(100)))
            .map_or(dec!(100), |pct| pct.min(dec!(100)));

        Ok(Self {
            principal,
            yield_rate_pct,
            months,
            monthly_yield,
            total_yield,
            coverage_pct,
            remaining_balance: (principal - total_yield).max(Decimal::ZERO),
        })
    }
}
