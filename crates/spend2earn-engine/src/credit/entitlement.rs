//! Credit entitlement: tiered borrowing limit over vault collateral
//!
//! ```text
//! limit     = vault_balance × access_rate(tier)     (0 when vault < $100)
//! available = max(0, limit − loan_balance)
//! ```
//!
//! Repayment is funded from vault principal/yield: the applied amount is
//! deducted from both the loan and the vault balance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use spend2earn_common::{Account, BadgeTier, CreditError};

/// Minimum vault balance before any credit is extended
pub const MIN_COLLATERAL: Decimal = dec!(100);

/// Fraction of vault balance borrowable at the given tier
#[inline]
pub fn access_rate(tier: BadgeTier) -> Decimal {
    tier.access_rate()
}

/// Borrowing limit for a tier and vault balance
pub fn credit_limit(tier: BadgeTier, vault_balance: Decimal) -> Decimal {
    if vault_balance < MIN_COLLATERAL {
        return Decimal::ZERO;
    }
    vault_balance * access_rate(tier)
}

/// Reject vault balances below the collateral floor
pub fn check_collateral(vault_balance: Decimal) -> Result<(), CreditError> {
    if vault_balance < MIN_COLLATERAL {
        return Err(CreditError::InsufficientCollateral {
            vault_balance,
            minimum: MIN_COLLATERAL,
        });
    }
    Ok(())
}

/// Credit still available under the limit
#[inline]
pub fn available_credit(limit: Decimal, loan_balance: Decimal) -> Decimal {
    (limit - loan_balance).max(Decimal::ZERO)
}

/// Draw on the credit line, returning the new loan balance
pub fn borrow(
    request: Decimal,
    limit: Decimal,
    loan_balance: Decimal,
) -> Result<Decimal, CreditError> {
    if request <= Decimal::ZERO {
        return Err(CreditError::InvalidAmount);
    }

    let available = available_credit(limit, loan_balance);
    if request > available {
        return Err(CreditError::InsufficientEntitlement {
            requested: request,
            available,
        });
    }

    Ok(loan_balance + request)
}

/// Result of a repayment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepayOutcome {
    /// Amount actually applied (request capped at the outstanding loan)
    pub applied: Decimal,
    pub loan_balance: Decimal,
    pub vault_balance: Decimal,
}

/// Repay the loan from the vault.
///
/// The applied amount is `min(request, loan_balance)` and is deducted from
/// both balances, each floored at zero.
pub fn repay(
    request: Decimal,
    loan_balance: Decimal,
    vault_balance: Decimal,
) -> Result<RepayOutcome, CreditError> {
    if request <= Decimal::ZERO {
        return Err(CreditError::InvalidAmount);
    }

    let applied = request.min(loan_balance).max(Decimal::ZERO);

    Ok(RepayOutcome {
        applied,
        loan_balance: (loan_balance - applied).max(Decimal::ZERO),
        vault_balance: (vault_balance - applied).max(Decimal::ZERO),
    })
}

/// Derived credit position for an account; never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditEntitlement {
    pub tier: BadgeTier,
    pub access_rate: Decimal,
    pub limit: Decimal,
    pub available: Decimal,
    pub loan_balance: Decimal,
    /// Loan as a percentage of the limit (0 when there is no limit)
    pub utilization_pct: Decimal,
    /// Whether the vault meets the collateral floor
    pub collateralized: bool,
}

impl CreditEntitlement {
    pub fn evaluate(account: &Account) -> Self {
        let tier = account.tier();
        let limit = credit_limit(tier, account.vault_balance);
        let utilization_pct = if limit > Decimal::ZERO {
            account
                .loan_balance
                .checked_div(limit)
                .and_then(|share| share.checked_mul(dec!(100)))
                .unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        };

        Self {
            tier,
            access_rate: access_rate(tier),
            limit,
            available: available_credit(limit, account.loan_balance),
            loan_balance: account.loan_balance,
            utilization_pct,
            collateralized: account.vault_balance >= MIN_COLLATERAL,
        }
    }
}
