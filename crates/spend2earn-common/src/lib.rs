//! # Spend2Earn Common
//!
//! Shared types and errors for the Spend2Earn card-spending backend.
//!
//! ## Core Types
//!
//! - [`Account`]: spend, cashback, vault and loan balances
//! - [`BadgeTier`]: spend-based status ladder (Unverified → Gold)
//! - [`SpendEvent`]: immutable record of a card purchase
//! - [`ActivityEntry`]/[`ActivityLog`]: bounded dashboard activity feed
//!
//! ## Errors
//!
//! - [`CreditError`]: calculator rejections (invalid amount, entitlement, collateral)
//! - [`Spend2EarnError`]: unified error for services and adapters

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{CreditError, Result, Spend2EarnError, TierError};
pub use types::{
    account::Account,
    activity::{ActivityEntry, ActivityKind, ActivityLog, ActivityStatus, ACTIVITY_LOG_CAPACITY},
    badge_tier::{classify_tier, BadgeProgress, BadgeTier},
    spend_event::SpendEvent,
};

/// Spend2Earn version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
