//! Shared handler state

use std::sync::Arc;
use std::time::Duration;

use spend2earn_engine::adapters::{
    CreditDelegationService, CrossChainRouter, SimulatedDelegationService, SimulatedRouter,
    SimulatedTransferService, StablecoinTransferService,
};
use spend2earn_engine::{AccountService, InMemoryStore, ServiceConfig};

use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AccountService>,
    pub router: Arc<dyn CrossChainRouter>,
    pub transfers: Arc<dyn StablecoinTransferService>,
    pub delegation: Arc<dyn CreditDelegationService>,
    simulate_latency: bool,
}

impl AppState {
    /// State with simulated adapters configured from `config`
    pub fn new(service: Arc<AccountService>, config: &GatewayConfig) -> Self {
        let latency = config.adapter_latency();
        Self {
            service,
            router: Arc::new(SimulatedRouter::new(latency)),
            transfers: Arc::new(SimulatedTransferService::new(latency)),
            delegation: Arc::new(SimulatedDelegationService::new(
                latency,
                config.delegation_contract.clone(),
            )),
            simulate_latency: config.simulate_latency,
        }
    }

    /// In-memory state with every delay disabled
    pub fn in_memory() -> Self {
        let config = GatewayConfig {
            simulate_latency: false,
            ..GatewayConfig::default()
        };
        let service = AccountService::new(Arc::new(InMemoryStore::new()), ServiceConfig::default());
        Self::new(Arc::new(service), &config)
    }

    /// Hold a mock response for its usual round-trip time
    pub async fn pause(&self, millis: u64) {
        if self.simulate_latency {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}
