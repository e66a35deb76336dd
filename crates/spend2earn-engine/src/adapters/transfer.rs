//! Stablecoin (USDC) fast transfer between chains

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{fake_tx_hash, simulate_latency, IntegrationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_chain: u64,
    pub to_chain: u64,
    pub amount: Decimal,
    pub recipient: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub tx_hash: String,
    pub status: TransferStatus,
    pub message: String,
}

#[async_trait]
pub trait StablecoinTransferService: Send + Sync {
    async fn fast_transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransferReceipt, IntegrationError>;
}

/// Simulated transfer that always completes
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransferService {
    latency: Duration,
}

impl SimulatedTransferService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl StablecoinTransferService for SimulatedTransferService {
    async fn fast_transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransferReceipt, IntegrationError> {
        if request.amount <= Decimal::ZERO {
            return Err(IntegrationError::InvalidRequest(
                "transfer amount must be positive".to_string(),
            ));
        }
        if request.recipient.trim().is_empty() {
            return Err(IntegrationError::InvalidRequest(
                "recipient is required".to_string(),
            ));
        }

        simulate_latency(self.latency).await;

        info!(
            from_chain = request.from_chain,
            to_chain = request.to_chain,
            amount = %request.amount,
            "Simulated USDC fast transfer"
        );

        Ok(TransferReceipt {
            tx_hash: fake_tx_hash(),
            status: TransferStatus::Completed,
            message: format!("Successfully transferred {} USDC.", request.amount),
        })
    }
}
