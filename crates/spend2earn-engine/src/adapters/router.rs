//! Cross-chain yield routing
//!
//! A route's net APY is the target APY less the gas cost expressed as a
//! percentage of the routed amount; the best route has the highest net APY.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{simulate_latency, IntegrationError};

/// Candidate destination for routed funds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldTarget {
    pub chain: u64,
    pub protocol: String,
    pub apy: Decimal,
}

/// Priced route to a yield target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuote {
    pub from_chain: u64,
    pub to_chain: u64,
    pub from_token: String,
    pub to_token: String,
    pub from_amount: Decimal,
    pub protocol: String,
    pub gas_cost_usd: Decimal,
    pub expected_apy: Decimal,
    pub net_apy: Decimal,
}

#[async_trait]
pub trait CrossChainRouter: Send + Sync {
    /// Quote every target and return the one with the best net APY
    async fn find_optimal_route(
        &self,
        amount: Decimal,
        from_chain: u64,
        targets: &[YieldTarget],
    ) -> Result<Option<RouteQuote>, IntegrationError>;
}

/// Simulated router with random (or fixed) gas quotes
#[derive(Debug, Clone, Default)]
pub struct SimulatedRouter {
    latency: Duration,
    fixed_gas_usd: Option<Decimal>,
}

impl SimulatedRouter {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            fixed_gas_usd: None,
        }
    }

    /// Quote the same gas cost for every route
    pub fn with_fixed_gas(mut self, gas_usd: Decimal) -> Self {
        self.fixed_gas_usd = Some(gas_usd);
        self
    }

    fn gas_quote(&self) -> Decimal {
        match self.fixed_gas_usd {
            Some(gas) => gas,
            None => {
                let gas: f64 = rand::thread_rng().gen_range(0.0..5.0);
                Decimal::from_f64(gas).unwrap_or(Decimal::ZERO).round_dp(2)
            }
        }
    }
}

/// Target APY less gas as a percentage of the amount.
///
/// Gas that dwarfs a dust amount sinks the route to `Decimal::MIN`.
pub fn net_apy(apy: Decimal, gas_cost_usd: Decimal, amount: Decimal) -> Decimal {
    gas_cost_usd
        .checked_div(amount)
        .and_then(|share| share.checked_mul(dec!(100)))
        .and_then(|drag| apy.checked_sub(drag))
        .map_or(Decimal::MIN, |net| net.round_dp(2))
}

#[async_trait]
impl CrossChainRouter for SimulatedRouter {
    #[instrument(skip(self, targets), fields(targets = targets.len()))]
    async fn find_optimal_route(
        &self,
        amount: Decimal,
        from_chain: u64,
        targets: &[YieldTarget],
    ) -> Result<Option<RouteQuote>, IntegrationError> {
        if amount <= Decimal::ZERO {
            return Err(IntegrationError::InvalidRequest(
                "route amount must be positive".to_string(),
            ));
        }

        simulate_latency(self.latency).await;

        let best = targets
            .iter()
            .map(|target| {
                let gas_cost_usd = self.gas_quote();
                let net_apy = net_apy(target.apy, gas_cost_usd, amount);
                RouteQuote {
                    from_chain,
                    to_chain: target.chain,
                    from_token: "USDC".to_string(),
                    to_token: "USDC".to_string(),
                    from_amount: amount,
                    protocol: target.protocol.clone(),
                    gas_cost_usd,
                    expected_apy: target.apy,
                    net_apy,
                }
            })
            .max_by(|a, b| a.net_apy.cmp(&b.net_apy));

        if let Some(route) = &best {
            debug!(to_chain = route.to_chain, net_apy = %route.net_apy, "Selected route");
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Vec<YieldTarget> {
        vec![
            target(1, "Aave V3", dec!(4.5)),
            target(137, "Uniswap V3", dec!(12.1)),
            target(42161, "Curve Finance", dec!(7.2)),
        ]
    }

    fn target(chain: u64, protocol: &str, apy: Decimal) -> YieldTarget {
        YieldTarget {
            chain,
            protocol: protocol.to_string(),
            apy,
        }
    }

    #[tokio::test]
    async fn test_picks_best_net_apy() {
        let router = SimulatedRouter::default().with_fixed_gas(dec!(2));
        let route = router
            .find_optimal_route(dec!(1000), 1, &targets())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(route.to_chain, 137);
        // 12.1 - 2/1000*100
        assert_eq!(route.net_apy, dec!(11.9));
    }

    #[tokio::test]
    async fn test_no_targets_no_route() {
        let router = SimulatedRouter::default();
        let route = router.find_optimal_route(dec!(50), 1, &[]).await.unwrap();
        assert!(route.is_none());
    }

    #[test]
    fn test_net_apy_dust_amount_sinks() {
        assert_eq!(net_apy(dec!(12.1), dec!(2), dec!(1000)), dec!(11.9));
        assert_eq!(net_apy(dec!(12.1), dec!(2), Decimal::new(1, 28)), Decimal::MIN);
        assert_eq!(net_apy(dec!(12.1), dec!(0), Decimal::new(1, 28)), dec!(12.1));
    }

    #[tokio::test]
    async fn test_dust_amount_still_quotes() {
        let router = SimulatedRouter::default().with_fixed_gas(dec!(2));
        let route = router
            .find_optimal_route(Decimal::new(1, 28), 1, &targets())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(route.net_apy, Decimal::MIN);
    }

    #[tokio::test]
    async fn test_rejects_non_positive_amount() {
        let router = SimulatedRouter::default();
        let result = router.find_optimal_route(dec!(0), 1, &targets()).await;
        assert!(matches!(result, Err(IntegrationError::InvalidRequest(_))));
    }
}
