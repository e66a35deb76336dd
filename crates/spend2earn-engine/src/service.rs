//! Account service: calculators applied over an account store
//!
//! Every mutation is load → compute → save at the loaded version. A write
//! that races another writer fails with `VersionConflict` and nothing is
//! recorded. Successful mutations append to the per-address activity log and
//! are broadcast to subscribers.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spend2earn_common::{
    Account, ActivityEntry, ActivityKind, ActivityLog, BadgeProgress, BadgeTier, Result,
    Spend2EarnError, SpendEvent,
};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::adapters::fake_tx_hash;
use crate::cashback::{apply_spend, StakeMode, DEFAULT_CASHBACK_RATE};
use crate::credit::{self, CreditEntitlement, LoanTerms};
use crate::store::{account_key, AccountStore};
use crate::vault::{daily_yield, AutoRepayPlan, RepaymentProjection, DEFAULT_VAULT_APY};

/// Months used for the yield-repayment projection in snapshots
const PROJECTION_MONTHS: u32 = 12;

/// Activity broadcast buffer
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Account service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Cashback rate applied to every spend
    pub cashback_rate: Decimal,
    /// Vault APY in percent
    pub vault_apy: Decimal,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cashback_rate: DEFAULT_CASHBACK_RATE,
            vault_apy: DEFAULT_VAULT_APY,
        }
    }
}

/// Everything the dashboard shows for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub address: String,
    pub account: Account,
    pub tier: BadgeTier,
    pub progress: BadgeProgress,
    pub entitlement: CreditEntitlement,
    pub terms: LoanTerms,
    /// Yield coverage of the outstanding loan; `None` without a loan
    pub projection: Option<RepaymentProjection>,
    pub auto_repay: AutoRepayPlan,
}

impl AccountSnapshot {
    pub fn of(address: impl Into<String>, account: Account, vault_apy: Decimal) -> Self {
        let projection =
            RepaymentProjection::simulate(account.loan_balance, vault_apy, PROJECTION_MONTHS).ok();

        Self {
            address: address.into(),
            tier: account.tier(),
            progress: BadgeProgress::for_spending(account.total_spending),
            entitlement: CreditEntitlement::evaluate(&account),
            terms: LoanTerms::for_account(&account),
            projection,
            auto_repay: AutoRepayPlan::for_balances(
                account.auto_repay,
                account.vault_balance,
                account.loan_balance,
                vault_apy,
            ),
            account,
        }
    }
}

/// Result of a recorded spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendReceipt {
    pub event_id: Uuid,
    pub amount: Decimal,
    pub cashback: Decimal,
    pub stake_amount: Decimal,
    pub stake_mode: StakeMode,
    /// Number of vault deposits the stake was split into
    pub stake_deposits: u64,
    pub tier_before: BadgeTier,
    pub tier_changed: bool,
    pub tx_hash: String,
    pub snapshot: AccountSnapshot,
}

/// Result of a repayment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepayReceipt {
    pub requested: Decimal,
    pub applied: Decimal,
    pub tx_hash: String,
    pub snapshot: AccountSnapshot,
}

/// Account operations shared by the gateway and background tasks
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    activity: DashMap<String, ActivityLog>,
    events: broadcast::Sender<ActivityEntry>,
    config: ServiceConfig,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, config: ServiceConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            activity: DashMap::new(),
            events,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Current balances and derived credit position
    pub async fn snapshot(&self, address: &str) -> Result<AccountSnapshot> {
        let key = normalize_address(address)?;
        let account = self.store.load(&key).await?;
        Ok(self.snapshot_of(key, account))
    }

    /// Record a card purchase: cashback is earned and auto-staked
    #[instrument(skip(self, event), fields(amount = %event.amount()))]
    pub async fn spend(&self, address: &str, event: SpendEvent) -> Result<SpendReceipt> {
        let key = normalize_address(address)?;
        let mut account = self.store.load(&key).await?;

        let tier_before = account.tier();
        let outcome = apply_spend(event.amount(), self.config.cashback_rate)?;
        let stake_mode = StakeMode::for_tier(tier_before);
        let deposits = stake_mode.deposit_count(outcome.stake_amount);

        account.record_spend(event.amount(), outcome.cashback, outcome.stake_amount)?;
        let account = self.store.save(&key, account).await?;
        let tier = account.tier();
        let tx_hash = fake_tx_hash();

        let mut details = format!("Cashback {} auto-staked", outcome.cashback.round_dp(2));
        if stake_mode == StakeMode::Micro {
            details.push_str(&format!(" in {} micro deposits", deposits));
        }
        let description = format!("Purchase at {}", event.merchant());
        self.record(
            ActivityEntry::new(&key, ActivityKind::Spend, description)
                .with_amount(event.amount())
                .with_tx_hash(&tx_hash)
                .with_details(details),
        );

        if tier != tier_before {
            info!(address = %key, from = %tier_before, to = %tier, "Badge tier upgraded");
            self.record(ActivityEntry::new(
                &key,
                ActivityKind::Badge,
                format!("Reached {} badge", tier),
            ));
        }

        debug!(address = %key, cashback = %outcome.cashback, deposits, "Spend recorded");

        Ok(SpendReceipt {
            event_id: event.id(),
            amount: event.amount(),
            cashback: outcome.cashback,
            stake_amount: outcome.stake_amount,
            stake_mode,
            stake_deposits: deposits,
            tier_before,
            tier_changed: tier != tier_before,
            tx_hash,
            snapshot: self.snapshot_of(key, account),
        })
    }

    /// Deposit principal into the vault
    #[instrument(skip(self))]
    pub async fn deposit(&self, address: &str, amount: Decimal) -> Result<AccountSnapshot> {
        let key = normalize_address(address)?;
        let mut account = self.store.load(&key).await?;
        account.deposit(amount)?;
        let account = self.store.save(&key, account).await?;

        self.record(
            ActivityEntry::new(&key, ActivityKind::Deposit, "Vault deposit")
                .with_amount(amount)
                .with_tx_hash(fake_tx_hash()),
        );

        Ok(self.snapshot_of(key, account))
    }

    /// Draw on the credit line.
    ///
    /// The collateral floor is checked before the entitlement, so an
    /// undercollateralized vault reports `InsufficientCollateral` rather
    /// than a zero limit.
    #[instrument(skip(self))]
    pub async fn borrow(&self, address: &str, amount: Decimal) -> Result<AccountSnapshot> {
        let key = normalize_address(address)?;
        let mut account = self.store.load(&key).await?;

        if amount > Decimal::ZERO {
            credit::check_collateral(account.vault_balance)?;
        }
        let limit = credit::credit_limit(account.tier(), account.vault_balance);
        let loan_balance = credit::borrow(amount, limit, account.loan_balance)?;

        let vault_balance = account.vault_balance;
        account.settle(loan_balance, vault_balance);
        let account = self.store.save(&key, account).await?;

        info!(address = %key, amount = %amount, loan = %loan_balance, "Credit drawn");
        self.record(
            ActivityEntry::new(&key, ActivityKind::Credit, "Credit line draw")
                .with_amount(amount)
                .with_tx_hash(fake_tx_hash()),
        );

        Ok(self.snapshot_of(key, account))
    }

    /// Repay the loan from the vault
    #[instrument(skip(self))]
    pub async fn repay(&self, address: &str, amount: Decimal) -> Result<RepayReceipt> {
        let key = normalize_address(address)?;
        let mut account = self.store.load(&key).await?;

        let outcome = credit::repay(amount, account.loan_balance, account.vault_balance)?;
        account.settle(outcome.loan_balance, outcome.vault_balance);
        let account = self.store.save(&key, account).await?;
        let tx_hash = fake_tx_hash();

        if outcome.applied < amount {
            debug!(
                address = %key,
                requested = %amount,
                applied = %outcome.applied,
                "Repayment capped at loan balance"
            );
        }
        self.record(
            ActivityEntry::new(&key, ActivityKind::Repay, "Loan repayment from vault")
                .with_amount(outcome.applied)
                .with_tx_hash(&tx_hash),
        );

        Ok(RepayReceipt {
            requested: amount,
            applied: outcome.applied,
            tx_hash,
            snapshot: self.snapshot_of(key, account),
        })
    }

    /// Turn yield-funded repayment on or off
    #[instrument(skip(self))]
    pub async fn set_auto_repay(&self, address: &str, enabled: bool) -> Result<AccountSnapshot> {
        let key = normalize_address(address)?;
        let mut account = self.store.load(&key).await?;
        if account.auto_repay == enabled {
            return Ok(self.snapshot_of(key, account));
        }

        account.set_auto_repay(enabled);
        let account = self.store.save(&key, account).await?;

        info!(address = %key, enabled, "Auto-repay updated");
        let description = if enabled {
            "Auto-repay enabled"
        } else {
            "Auto-repay disabled"
        };
        self.record(ActivityEntry::new(&key, ActivityKind::Settings, description));

        Ok(self.snapshot_of(key, account))
    }

    /// Credit one day of vault yield; returns the amount accrued.
    ///
    /// With auto-repay on, the accrued yield is then applied to the loan.
    pub async fn accrue_yield(&self, address: &str) -> Result<Decimal> {
        let key = normalize_address(address)?;
        let mut account = self.store.load(&key).await?;

        let earned = daily_yield(account.vault_balance, self.config.vault_apy)?;
        if earned <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        account.accrue(earned)?;
        let repayment = if account.auto_repay && account.loan_balance > Decimal::ZERO {
            let outcome = credit::repay(earned, account.loan_balance, account.vault_balance)?;
            account.settle(outcome.loan_balance, outcome.vault_balance);
            Some(outcome.applied)
        } else {
            None
        };
        let account = self.store.save(&key, account).await?;

        self.record(
            ActivityEntry::new(&key, ActivityKind::Yield, "Vault yield accrued")
                .with_amount(earned)
                .with_details(format!("{}% APY", self.config.vault_apy)),
        );
        if let Some(applied) = repayment {
            debug!(address = %key, applied = %applied, loan = %account.loan_balance, "Auto-repaid");
            self.record(
                ActivityEntry::new(&key, ActivityKind::Repay, "Auto-repayment from vault yield")
                    .with_amount(applied)
                    .with_tx_hash(fake_tx_hash()),
            );
        }

        Ok(earned)
    }

    /// Accrue yield for every stored account.
    ///
    /// Failures are logged and skipped; the account is picked up on the next
    /// tick. Returns the number of accounts that earned yield.
    pub async fn accrue_all(&self) -> usize {
        let mut accrued = 0;
        for address in self.store.addresses().await {
            match self.accrue_yield(&address).await {
                Ok(earned) if earned > Decimal::ZERO => accrued += 1,
                Ok(_) => {}
                Err(e) => warn!(address = %address, error = %e, "Yield accrual skipped"),
            }
        }
        debug!(accrued, "Yield tick complete");
        accrued
    }

    /// Recent activity, newest first
    pub fn activity(&self, address: &str) -> Result<Vec<ActivityEntry>> {
        let key = normalize_address(address)?;
        Ok(self
            .activity
            .get(&key)
            .map(|log| log.entries())
            .unwrap_or_default())
    }

    /// Live feed of activity entries across all accounts
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityEntry> {
        self.events.subscribe()
    }

    fn snapshot_of(&self, address: String, account: Account) -> AccountSnapshot {
        AccountSnapshot::of(address, account, self.config.vault_apy)
    }

    fn record(&self, entry: ActivityEntry) {
        self.activity
            .entry(entry.address.clone())
            .or_default()
            .push(entry.clone());
        // No subscribers is fine
        let _ = self.events.send(entry);
    }
}

fn normalize_address(address: &str) -> Result<String> {
    let key = account_key(address);
    if key.is_empty() {
        return Err(Spend2EarnError::InvalidRequest(
            "address is required".to_string(),
        ));
    }
    Ok(key)
}
