//! # Spend2Earn Engine
//!
//! Spend-based credit entitlement for the Spend2Earn card.
//!
//! ## Flow
//!
//! ```text
//! spend ──► cashback (2.5%) ──► auto-stake ──► vault ──► credit limit
//!   │                                            ▲           │
//!   └──► lifetime spend ──► badge tier ──────────┘ (access)  ▼
//!                                                      borrow / repay
//! ```
//!
//! | Tier       | Lifetime spend | Access rate |
//! |------------|----------------|-------------|
//! | Unverified | < $100         | 0%          |
//! | Verified   | ≥ $100         | 30%         |
//! | Silver     | ≥ $500         | 50%         |
//! | Gold       | ≥ $1000        | 70%         |
//!
//! The calculators in [`credit`], [`cashback`] and [`vault`] are pure
//! functions. [`service::AccountService`] applies them over an
//! [`store::AccountStore`]. [`adapters`] and [`fixtures`] are simulated
//! integrations and dashboard mock data.

pub mod adapters;
pub mod cashback;
pub mod credit;
pub mod fixtures;
pub mod service;
pub mod store;
pub mod vault;

pub use cashback::{apply_spend, SpendOutcome, StakeMode, DEFAULT_CASHBACK_RATE};
pub use credit::{CreditEntitlement, LoanHealth, LoanTerms, RepayOutcome, MIN_COLLATERAL};
pub use service::{AccountService, AccountSnapshot, RepayReceipt, ServiceConfig, SpendReceipt};
pub use store::{AccountStore, InMemoryStore, JsonFileStore, StoreError};
pub use vault::{daily_yield, AutoRepayPlan, RepaymentProjection, DEFAULT_VAULT_APY};
