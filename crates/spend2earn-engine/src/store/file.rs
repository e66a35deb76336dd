//! JSON file account store
//!
//! Keeps every account in one JSON document keyed by address. Each save
//! rewrites the document through a temporary file and a rename.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use spend2earn_common::Account;
use tokio::sync::Mutex;
use tracing::debug;

use super::{account_key, AccountStore, StoreError};

/// Single-file persistent store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    accounts: Mutex<HashMap<String, Account>>,
}

impl JsonFileStore {
    /// Open the store, reading existing accounts if the file exists
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let accounts = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::SerializationError(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::StorageError(e.to_string())),
        };

        debug!(path = %path.display(), accounts = accounts.len(), "Opened account file");

        Ok(Self {
            path,
            accounts: Mutex::new(accounts),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, accounts: &HashMap<String, Account>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(accounts)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::StorageError(e.to_string()))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for JsonFileStore {
    async fn load(&self, address: &str) -> Result<Account, StoreError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts
            .get(&account_key(address))
            .cloned()
            .unwrap_or_else(Account::new))
    }

    async fn save(&self, address: &str, mut account: Account) -> Result<Account, StoreError> {
        let key = account_key(address);
        let mut accounts = self.accounts.lock().await;

        let found = accounts.get(&key).map(|a| a.version).unwrap_or(0);
        if found != account.version {
            return Err(StoreError::VersionConflict {
                address: key,
                expected: account.version,
                found,
            });
        }

        account.version += 1;
        let previous = accounts.insert(key.clone(), account.clone());

        if let Err(e) = self.persist(&accounts).await {
            // keep memory consistent with disk
            match previous {
                Some(previous) => accounts.insert(key, previous),
                None => accounts.remove(&key),
            };
            return Err(e);
        }

        Ok(account)
    }

    async fn addresses(&self) -> Vec<String> {
        self.accounts.lock().await.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("spend2earn-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_reload_recovers_accounts() {
        let path = temp_path();

        {
            let store = JsonFileStore::open(&path).await.unwrap();
            let mut account = store.load("0xfeed").await.unwrap();
            account.record_spend(dec!(120), dec!(3), dec!(3)).unwrap();
            store.save("0xfeed", account).await.unwrap();
        }

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let account = reopened.load("0xfeed").await.unwrap();
        assert_eq!(account.total_spending, dec!(120));
        assert_eq!(account.version, 1);
        assert_eq!(reopened.addresses().await, vec!["0xfeed".to_string()]);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_stale_write_conflicts() {
        let path = temp_path();
        let store = JsonFileStore::open(&path).await.unwrap();

        let stale = store.load("0xfeed").await.unwrap();
        store.save("0xfeed", stale.clone()).await.unwrap();

        assert!(matches!(
            store.save("0xfeed", stale).await,
            Err(StoreError::VersionConflict { .. })
        ));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let path = temp_path();
        tokio::fs::write(&path, b"not json").await.unwrap();

        assert!(matches!(
            JsonFileStore::open(&path).await,
            Err(StoreError::SerializationError(_))
        ));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
