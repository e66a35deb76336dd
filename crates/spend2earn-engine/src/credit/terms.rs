//! Tier-dependent loan terms and collateral health

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use spend2earn_common::{Account, BadgeTier};

/// Loan-to-vault ratio at which a loan stops being healthy
pub const AT_RISK_LTV: Decimal = dec!(0.8);

/// Quoted borrow APR (percent); Unverified accounts cannot borrow
pub fn borrow_apr(tier: BadgeTier) -> Option<Decimal> {
    match tier {
        BadgeTier::Unverified => None,
        BadgeTier::Verified => Some(dec!(3.2)),
        BadgeTier::Silver => Some(dec!(2.7)),
        BadgeTier::Gold => Some(dec!(2.5)),
    }
}

/// Annual rate used for the monthly interest estimate
fn interest_rate(tier: BadgeTier) -> Decimal {
    match tier {
        BadgeTier::Unverified | BadgeTier::Verified => dec!(0.045),
        BadgeTier::Silver => dec!(0.032),
        BadgeTier::Gold => dec!(0.021),
    }
}

/// Estimated monthly interest on the outstanding loan
pub fn monthly_interest(tier: BadgeTier, loan_balance: Decimal) -> Decimal {
    loan_balance * interest_rate(tier) / dec!(12)
}

/// Vault balance as a whole percentage of the loan, `None` without a loan.
///
/// Saturates at `u64::MAX` when the loan is dust next to the vault.
pub fn collateral_ratio(vault_balance: Decimal, loan_balance: Decimal) -> Option<u64> {
    if loan_balance <= Decimal::ZERO {
        return None;
    }
    if vault_balance <= Decimal::ZERO {
        return Some(0);
    }
    let ratio = vault_balance
        .checked_div(loan_balance)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .and_then(|pct| pct.floor().to_u64());
    Some(ratio.unwrap_or(u64::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanHealth {
    Healthy,
    AtRisk,
    NoCollateral,
}

impl LoanHealth {
    pub fn assess(vault_balance: Decimal, loan_balance: Decimal) -> Self {
        if vault_balance <= Decimal::ZERO {
            return LoanHealth::NoCollateral;
        }
        match loan_balance.checked_div(vault_balance) {
            Some(ltv) if ltv < AT_RISK_LTV => LoanHealth::Healthy,
            _ => LoanHealth::AtRisk,
        }
    }
}

/// Loan terms quoted for an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub borrow_apr: Option<Decimal>,
    pub monthly_interest: Decimal,
    pub collateral_ratio: Option<u64>,
    pub health: LoanHealth,
}

impl LoanTerms {
    pub fn for_account(account: &Account) -> Self {
        let tier = account.tier();
        Self {
            borrow_apr: borrow_apr(tier),
            monthly_interest: monthly_interest(tier, account.loan_balance),
            collateral_ratio: collateral_ratio(account.vault_balance, account.loan_balance),
            health: LoanHealth::assess(account.vault_balance, account.loan_balance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrow_apr() {
        assert_eq!(borrow_apr(BadgeTier::Unverified), None);
        assert_eq!(borrow_apr(BadgeTier::Verified), Some(dec!(3.2)));
        assert_eq!(borrow_apr(BadgeTier::Gold), Some(dec!(2.5)));
    }

    #[test]
    fn test_monthly_interest() {
        // 1200 * 0.021 / 12
        assert_eq!(monthly_interest(BadgeTier::Gold, dec!(1200)), dec!(2.1));
        assert_eq!(monthly_interest(BadgeTier::Silver, dec!(0)), dec!(0));
    }

    #[test]
    fn test_collateral_ratio() {
        assert_eq!(collateral_ratio(dec!(1000), dec!(600)), Some(166));
        assert_eq!(collateral_ratio(dec!(1000), dec!(0)), None);
        assert_eq!(collateral_ratio(dec!(0), dec!(50)), Some(0));
    }

    #[test]
    fn test_dust_loan_saturates_ratio() {
        let dust = Decimal::new(1, 28);
        assert_eq!(collateral_ratio(dec!(1000), dust), Some(u64::MAX));
        assert_eq!(LoanHealth::assess(dec!(1000), dust), LoanHealth::Healthy);

        let account = Account {
            total_spending: dec!(1500),
            vault_balance: dec!(1000),
            loan_balance: dust,
            ..Account::default()
        };
        let terms = LoanTerms::for_account(&account);
        assert_eq!(terms.collateral_ratio, Some(u64::MAX));
    }

    #[test]
    fn test_dust_vault_under_huge_loan_is_at_risk() {
        let dust = Decimal::new(1, 28);
        assert_eq!(LoanHealth::assess(dust, Decimal::MAX), LoanHealth::AtRisk);
        assert_eq!(collateral_ratio(dust, Decimal::MAX), Some(0));
    }

    #[test]
    fn test_loan_health() {
        assert_eq!(LoanHealth::assess(dec!(0), dec!(0)), LoanHealth::NoCollateral);
        assert_eq!(LoanHealth::assess(dec!(1000), dec!(700)), LoanHealth::Healthy);
        assert_eq!(LoanHealth::assess(dec!(1000), dec!(800)), LoanHealth::AtRisk);
    }
}
