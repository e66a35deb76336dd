//! Account storage
//!
//! Accounts are persisted behind [`AccountStore`] so the medium (memory, a
//! JSON file, a database row) can change without touching the calculators.
//! Writes are compare-and-swap on [`Account::version`].

pub mod file;
pub mod memory;

use async_trait::async_trait;
use spend2earn_common::{Account, Spend2EarnError};

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

/// Trait for account storage backends
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Load an account, or a fresh one (version 0) if none is stored
    async fn load(&self, address: &str) -> Result<Account, StoreError>;

    /// Save an account loaded at `account.version`.
    ///
    /// Fails with [`StoreError::VersionConflict`] if another writer saved in
    /// between. Returns the stored account with its bumped version.
    async fn save(&self, address: &str, account: Account) -> Result<Account, StoreError>;

    /// All addresses with a stored account
    async fn addresses(&self) -> Vec<String>;
}

/// Errors from account store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Version conflict for {address}: expected {expected}, found {found}")]
    VersionConflict {
        address: String,
        expected: u64,
        found: u64,
    },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<StoreError> for Spend2EarnError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict {
                address,
                expected,
                found,
            } => Spend2EarnError::VersionConflict {
                address,
                expected,
                found,
            },
            StoreError::StorageError(msg) => Spend2EarnError::Storage(msg),
            StoreError::SerializationError(msg) => Spend2EarnError::Serialization(msg),
        }
    }
}

/// Normalize an address used as a storage key
pub(crate) fn account_key(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}
