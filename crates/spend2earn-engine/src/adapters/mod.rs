//! External protocol adapters
//!
//! Cross-chain routing, stablecoin transfer and credit delegation are
//! reached through traits. Only simulated implementations exist: they wait
//! for a configurable latency and return fabricated results.

pub mod delegation;
pub mod router;
pub mod transfer;

use std::time::Duration;

pub use delegation::{
    CreditDelegationService, Delegation, DelegationPermission, SimulatedDelegationService,
};
pub use router::{CrossChainRouter, RouteQuote, SimulatedRouter, YieldTarget};
pub use transfer::{
    SimulatedTransferService, StablecoinTransferService, TransferReceipt, TransferRequest,
    TransferStatus,
};

use spend2earn_common::Spend2EarnError;

/// Errors from external protocol adapters
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum IntegrationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<IntegrationError> for Spend2EarnError {
    fn from(err: IntegrationError) -> Self {
        match err {
            IntegrationError::InvalidRequest(msg) => Spend2EarnError::InvalidRequest(msg),
            IntegrationError::Unavailable(msg) => Spend2EarnError::Integration(msg),
        }
    }
}

/// Simulated network round-trip
pub(crate) async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// Fabricated 32-byte transaction hash
pub fn fake_tx_hash() -> String {
    format!("0x{}", hex::encode(rand::random::<[u8; 32]>()))
}
