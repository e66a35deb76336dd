//! Gateway configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spend2earn_common::{Result, Spend2EarnError};
use spend2earn_engine::{ServiceConfig, DEFAULT_CASHBACK_RATE, DEFAULT_VAULT_APY};

/// Where accounts are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
}

impl FromStr for StoreBackend {
    type Err = Spend2EarnError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            other => Err(Spend2EarnError::Config(format!(
                "unknown store backend '{other}' (expected memory or file)"
            ))),
        }
    }
}

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Delay mock endpoints the way the hosted API does
    pub simulate_latency: bool,
    /// Cashback rate applied to every spend
    pub cashback_rate: Decimal,
    /// Vault APY in percent
    pub vault_apy: Decimal,
    /// Yield accrual interval in seconds, 0 disables the ticker
    pub yield_tick_secs: u64,
    /// Account store backend
    pub store: StoreBackend,
    /// Account file for the file backend
    pub store_path: PathBuf,
    /// Credit contract granted delegated permissions
    pub delegation_contract: String,
    /// Simulated round-trip for external protocol adapters
    pub adapter_latency_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            simulate_latency: true,
            cashback_rate: DEFAULT_CASHBACK_RATE,
            vault_apy: DEFAULT_VAULT_APY,
            yield_tick_secs: 0,
            store: StoreBackend::Memory,
            store_path: PathBuf::from("data/accounts.json"),
            delegation_contract: "0x0000000000000000000000000000000000000000".to_string(),
            adapter_latency_ms: 500,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        // Platform PORT first, SPEND2EARN_PORT wins if both are set
        if let Some(port) = parse_var(&lookup, "PORT")? {
            cfg.port = port;
        }
        if let Some(host) = lookup("SPEND2EARN_HOST") {
            cfg.host = host;
        }
        if let Some(port) = parse_var(&lookup, "SPEND2EARN_PORT")? {
            cfg.port = port;
        }

        if let Some(flag) = parse_var(&lookup, "SPEND2EARN_SIMULATE_LATENCY")? {
            cfg.simulate_latency = flag;
        }
        if let Some(rate) = parse_var::<Decimal, _>(&lookup, "SPEND2EARN_CASHBACK_RATE")? {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(Spend2EarnError::Config(format!(
                    "SPEND2EARN_CASHBACK_RATE must be between 0 and 1, got {rate}"
                )));
            }
            cfg.cashback_rate = rate;
        }
        if let Some(apy) = parse_var::<Decimal, _>(&lookup, "SPEND2EARN_VAULT_APY")? {
            if apy < Decimal::ZERO {
                return Err(Spend2EarnError::Config(format!(
                    "SPEND2EARN_VAULT_APY must not be negative, got {apy}"
                )));
            }
            cfg.vault_apy = apy;
        }
        if let Some(secs) = parse_var(&lookup, "SPEND2EARN_YIELD_TICK_SECS")? {
            cfg.yield_tick_secs = secs;
        }

        if let Some(store) = parse_var(&lookup, "SPEND2EARN_STORE")? {
            cfg.store = store;
        }
        if let Some(path) = lookup("SPEND2EARN_STORE_PATH") {
            cfg.store_path = PathBuf::from(path);
        }

        if let Some(contract) = lookup("SPEND2EARN_DELEGATION_CONTRACT") {
            cfg.delegation_contract = contract;
        }
        if let Some(ms) = parse_var(&lookup, "SPEND2EARN_ADAPTER_LATENCY_MS")? {
            cfg.adapter_latency_ms = ms;
        }

        Ok(cfg)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Spend2EarnError::Config(format!("invalid listen address: {e}")))
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            cashback_rate: self.cashback_rate,
            vault_apy: self.vault_apy,
        }
    }

    pub fn adapter_latency(&self) -> Duration {
        if self.simulate_latency {
            Duration::from_millis(self.adapter_latency_ms)
        } else {
            Duration::ZERO
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Spend2EarnError::Config(format!("invalid {key} '{raw}': {e}"))),
    }
}
