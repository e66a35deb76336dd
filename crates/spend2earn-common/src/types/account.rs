//! Account - Per-user spend, cashback, vault and loan balances
//!
//! The account is a plain value record. It is mutated only in response to
//! discrete events (spend, deposit, borrow, repay, yield accrual) whose amounts
//! are computed by the calculators; persistence belongs to the account store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CreditError;
use crate::types::badge_tier::BadgeTier;

/// Spend2Earn account balances (all amounts in USDC-equivalent)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Lifetime card spend
    pub total_spending: Decimal,

    /// Lifetime cashback earned
    pub total_cashback: Decimal,

    /// Staked collateral backing the credit line
    pub vault_balance: Decimal,

    /// Outstanding borrowed amount
    pub loan_balance: Decimal,

    /// Whether daily vault yield is applied to the loan
    #[serde(default)]
    pub auto_repay: bool,

    /// Version for optimistic concurrency, bumped by the store on save
    #[serde(default)]
    pub version: u64,

    /// Timestamp of last modification (Unix milliseconds)
    #[serde(default)]
    pub updated_at: i64,
}

impl Account {
    /// Create a new empty account
    pub fn new() -> Self {
        Self {
            updated_at: chrono::Utc::now().timestamp_millis(),
            ..Self::default()
        }
    }

    /// Current badge tier, derived from lifetime spend
    #[inline]
    pub fn tier(&self) -> BadgeTier {
        BadgeTier::classify(self.total_spending)
    }

    /// Apply the caller-level side effect of a spend event.
    ///
    /// Either every balance is updated or none is.
    pub fn record_spend(
        &mut self,
        amount: Decimal,
        cashback: Decimal,
        staked: Decimal,
    ) -> Result<(), CreditError> {
        let total_spending = checked_add(self.total_spending, amount)?;
        let total_cashback = checked_add(self.total_cashback, cashback)?;
        let vault_balance = checked_add(self.vault_balance, staked)?;

        self.total_spending = total_spending;
        self.total_cashback = total_cashback;
        self.vault_balance = vault_balance;
        self.touch();
        Ok(())
    }

    /// Deposit principal into the vault
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), CreditError> {
        if amount <= Decimal::ZERO {
            return Err(CreditError::InvalidAmount);
        }

        self.vault_balance = checked_add(self.vault_balance, amount)?;
        self.touch();
        Ok(())
    }

    /// Credit accrued vault yield; non-positive amounts are ignored
    pub fn accrue(&mut self, amount: Decimal) -> Result<(), CreditError> {
        if amount <= Decimal::ZERO {
            return Ok(());
        }
        self.vault_balance = checked_add(self.vault_balance, amount)?;
        self.touch();
        Ok(())
    }

    /// Toggle yield-funded repayment
    pub fn set_auto_repay(&mut self, enabled: bool) {
        self.auto_repay = enabled;
        self.touch();
    }

    /// Replace loan and vault balances with calculator output
    pub fn settle(&mut self, loan_balance: Decimal, vault_balance: Decimal) {
        self.loan_balance = loan_balance;
        self.vault_balance = vault_balance;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

fn checked_add(balance: Decimal, amount: Decimal) -> Result<Decimal, CreditError> {
    balance.checked_add(amount).ok_or(CreditError::Overflow)
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Account(tier={}, spent={}, vault={}, loan={})",
            self.tier(),
            self.total_spending,
            self.vault_balance,
            self.loan_balance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_account() {
        let account = Account::new();
        assert_eq!(account.total_spending, Decimal::ZERO);
        assert_eq!(account.vault_balance, Decimal::ZERO);
        assert_eq!(account.tier(), BadgeTier::Unverified);
        assert_eq!(account.version, 0);
    }

    #[test]
    fn test_record_spend() {
        let mut account = Account::new();
        account.record_spend(dec!(100), dec!(2.5), dec!(2.5)).unwrap();

        assert_eq!(account.total_spending, dec!(100));
        assert_eq!(account.total_cashback, dec!(2.5));
        assert_eq!(account.vault_balance, dec!(2.5));
        assert_eq!(account.tier(), BadgeTier::Verified);
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut account = Account::new();
        assert_eq!(account.deposit(dec!(0)), Err(CreditError::InvalidAmount));
        assert_eq!(account.deposit(dec!(-10)), Err(CreditError::InvalidAmount));

        account.deposit(dec!(1000)).unwrap();
        assert_eq!(account.vault_balance, dec!(1000));
    }

    #[test]
    fn test_record_spend_overflow_leaves_account_untouched() {
        let mut account = Account::new();
        account.record_spend(Decimal::MAX, dec!(1), dec!(1)).unwrap();
        let before = account.clone();

        assert_eq!(
            account.record_spend(dec!(1), dec!(0.025), dec!(0.025)),
            Err(CreditError::Overflow)
        );
        assert_eq!(account, before);
    }

    #[test]
    fn test_deposit_and_accrue_overflow() {
        let mut account = Account::new();
        account.deposit(Decimal::MAX).unwrap();

        assert_eq!(account.deposit(dec!(1)), Err(CreditError::Overflow));
        assert_eq!(account.accrue(dec!(1)), Err(CreditError::Overflow));
        assert_eq!(account.accrue(dec!(0)), Ok(()));
        assert_eq!(account.vault_balance, Decimal::MAX);
    }

    #[test]
    fn test_auto_repay_defaults_off_for_stored_json() {
        let json = r#"{"totalSpending":"10","totalCashback":"0.25",
            "vaultBalance":"0.25","loanBalance":"0"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert!(!account.auto_repay);
    }

    #[test]
    fn test_json_field_names() {
        let account = Account::new();
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("totalSpending").is_some());
        assert!(json.get("loanBalance").is_some());
        assert!(json.get("autoRepay").is_some());
    }
}
