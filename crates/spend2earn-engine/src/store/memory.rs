//! In-memory account store

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use spend2earn_common::Account;

use super::{account_key, AccountStore, StoreError};

/// In-memory storage implementation
///
/// Uses DashMap so the version check and the write happen under one shard lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: DashMap<String, Account>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn load(&self, address: &str) -> Result<Account, StoreError> {
        Ok(self
            .accounts
            .get(&account_key(address))
            .map(|entry| entry.value().clone())
            .unwrap_or_else(Account::new))
    }

    async fn save(&self, address: &str, mut account: Account) -> Result<Account, StoreError> {
        let key = account_key(address);
        let expected = account.version;

        match self.accounts.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                let found = occupied.get().version;
                if found != expected {
                    return Err(StoreError::VersionConflict {
                        address: key,
                        expected,
                        found,
                    });
                }
                account.version = expected + 1;
                occupied.insert(account.clone());
            }
            Entry::Vacant(vacant) => {
                if expected != 0 {
                    return Err(StoreError::VersionConflict {
                        address: key,
                        expected,
                        found: 0,
                    });
                }
                account.version = 1;
                vacant.insert(account.clone());
            }
        }

        Ok(account)
    }

    async fn addresses(&self) -> Vec<String> {
        self.accounts.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_load_missing_is_fresh() {
        let store = InMemoryStore::new();
        let account = store.load("0xabc").await.unwrap();
        assert_eq!(account.version, 0);
        assert_eq!(account.vault_balance, dec!(0));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_bumps_version() {
        let store = InMemoryStore::new();
        let mut account = store.load("0xabc").await.unwrap();
        account.deposit(dec!(500)).unwrap();

        let saved = store.save("0xabc", account).await.unwrap();
        assert_eq!(saved.version, 1);

        let reloaded = store.load("0xABC").await.unwrap();
        assert_eq!(reloaded.vault_balance, dec!(500));
        assert_eq!(reloaded.version, 1);
    }

    #[tokio::test]
    async fn test_stale_write_conflicts() {
        let store = InMemoryStore::new();
        let first = store.load("0xabc").await.unwrap();
        let second = store.load("0xabc").await.unwrap();

        store.save("0xabc", first).await.unwrap();
        let result = store.save("0xabc", second).await;

        assert!(matches!(
            result,
            Err(StoreError::VersionConflict { expected: 0, found: 1, .. })
        ));
    }
}
