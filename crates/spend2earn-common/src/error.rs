//! Error types for Spend2Earn
//!
//! Provides a unified error type and the calculator rejection taxonomy

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using Spend2EarnError
pub type Result<T> = std::result::Result<T, Spend2EarnError>;

/// Unified error type for Spend2Earn operations
#[derive(Debug, Error)]
pub enum Spend2EarnError {
    // Calculator rejections
    #[error("Credit error: {0}")]
    Credit(#[from] CreditError),

    // Badge tier encoding errors
    #[error("Tier error: {0}")]
    Tier(#[from] TierError),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Optimistic concurrency failures on account writes
    #[error("Version conflict for {address}: expected {expected}, found {found}")]
    VersionConflict {
        address: String,
        expected: u64,
        found: u64,
    },

    // External protocol adapter errors
    #[error("Integration error: {0}")]
    Integration(String),

    // Mock data generator input errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Local validation failures raised by the credit and cashback calculators.
///
/// All of these are deterministic functions of the input: retrying without
/// changing the input yields the same rejection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CreditError {
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Insufficient entitlement: requested {requested}, available {available}")]
    InsufficientEntitlement {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Insufficient collateral: vault balance {vault_balance} below minimum {minimum}")]
    InsufficientCollateral {
        vault_balance: Decimal,
        minimum: Decimal,
    },

    #[error("Amount exceeds the supported range")]
    Overflow,
}

impl CreditError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            CreditError::InvalidAmount => "invalid_amount",
            CreditError::InsufficientEntitlement { .. } => "insufficient_entitlement",
            CreditError::InsufficientCollateral { .. } => "insufficient_collateral",
            CreditError::Overflow => "amount_overflow",
        }
    }
}

/// Badge tier encoding errors (contract ABI / display name translation)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TierError {
    #[error("Unknown badge tier code: {0}")]
    UnknownCode(u8),

    #[error("Unknown badge tier name: {0}")]
    UnknownName(String),
}

impl From<serde_json::Error> for Spend2EarnError {
    fn from(err: serde_json::Error) -> Self {
        Spend2EarnError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for Spend2EarnError {
    fn from(err: std::io::Error) -> Self {
        Spend2EarnError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for Spend2EarnError {
    fn from(err: anyhow::Error) -> Self {
        Spend2EarnError::Internal(err.to_string())
    }
}
