//! Credit automation via wallet delegation
//!
//! A delegation grants the credit contract a daily USDC spending limit and
//! permission to call the auto-repay and yield-optimization methods.

use std::time::Duration;

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{simulate_latency, IntegrationError};

/// Daily spending cap granted to the delegate
pub const DAILY_SPENDING_LIMIT: Decimal = dec!(10000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelegationPermission {
    #[serde(rename_all = "camelCase")]
    SpendingLimit {
        token: String,
        amount: Decimal,
        time_frame: String,
    },
    #[serde(rename_all = "camelCase")]
    ContractInteraction {
        contract: String,
        methods: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
    pub delegation_id: String,
    pub delegator: String,
    pub status: String,
    pub permissions: Vec<DelegationPermission>,
}

#[async_trait]
pub trait CreditDelegationService: Send + Sync {
    async fn setup_credit_automation(&self, address: &str) -> Result<Delegation, IntegrationError>;
}

/// Simulated delegation toolkit
#[derive(Debug, Clone)]
pub struct SimulatedDelegationService {
    latency: Duration,
    contract: String,
}

impl SimulatedDelegationService {
    pub fn new(latency: Duration, contract: impl Into<String>) -> Self {
        Self {
            latency,
            contract: contract.into(),
        }
    }
}

#[async_trait]
impl CreditDelegationService for SimulatedDelegationService {
    async fn setup_credit_automation(&self, address: &str) -> Result<Delegation, IntegrationError> {
        if address.trim().is_empty() {
            return Err(IntegrationError::InvalidRequest(
                "address is required".to_string(),
            ));
        }

        simulate_latency(self.latency).await;

        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(13)
            .map(|c| char::from(c).to_ascii_lowercase())
            .collect();

        let delegation = Delegation {
            delegation_id: format!("delegation_{}", suffix),
            delegator: address.to_string(),
            status: "active".to_string(),
            permissions: vec![
                DelegationPermission::SpendingLimit {
                    token: "USDC".to_string(),
                    amount: DAILY_SPENDING_LIMIT,
                    time_frame: "24h".to_string(),
                },
                DelegationPermission::ContractInteraction {
                    contract: self.contract.clone(),
                    methods: vec!["autoRepayCredit".to_string(), "optimizeYield".to_string()],
                },
            ],
        };

        info!(address, delegation_id = %delegation.delegation_id, "Credit automation delegated");
        Ok(delegation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delegation_permissions() {
        let service = SimulatedDelegationService::new(Duration::ZERO, "0xContract");
        let delegation = service.setup_credit_automation("0xabc").await.unwrap();

        assert!(delegation.delegation_id.starts_with("delegation_"));
        assert_eq!(delegation.status, "active");
        assert_eq!(delegation.permissions.len(), 2);
        assert!(matches!(
            &delegation.permissions[1],
            DelegationPermission::ContractInteraction { contract, .. } if contract == "0xContract"
        ));
    }

    #[test]
    fn test_permission_wire_format() {
        let permission = DelegationPermission::SpendingLimit {
            token: "USDC".to_string(),
            amount: DAILY_SPENDING_LIMIT,
            time_frame: "24h".to_string(),
        };
        let json = serde_json::to_value(&permission).unwrap();
        assert_eq!(json["type"], "SPENDING_LIMIT");
        assert_eq!(json["timeFrame"], "24h");
    }
}
