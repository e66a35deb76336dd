//! Risk-based yield allocation plans

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::round_to;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedAllocation {
    pub protocol: String,
    pub chain: String,
    pub percentage: u32,
    pub apy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    pub allocations: Vec<PlannedAllocation>,
    #[serde(rename = "totalAPY")]
    pub total_apy: f64,
    pub potential_savings: f64,
    pub recommendations: Vec<String>,
}

type PlanRow = (&'static str, &'static str, u32, f64);

const CONSERVATIVE: (&[PlanRow], f64) = (
    &[
        ("Aave V3", "Ethereum", 60, 4.5),
        ("Compound V3", "Ethereum", 40, 3.8),
    ],
    4.2,
);

const BALANCED: (&[PlanRow], f64) = (
    &[
        ("Aave V3", "Ethereum", 30, 4.5),
        ("Compound V3", "Ethereum", 20, 3.8),
        ("Uniswap V3", "Polygon", 30, 12.1),
        ("Curve Finance", "Arbitrum", 20, 7.2),
    ],
    7.8,
);

const AGGRESSIVE: (&[PlanRow], f64) = (
    &[
        ("Uniswap V3", "Polygon", 40, 12.1),
        ("GMX", "Arbitrum", 30, 18.0),
        ("Balancer", "Base", 20, 9.5),
        ("Aave V3", "Ethereum", 10, 4.5),
    ],
    13.5,
);

/// Allocation plan for `amount` at a 0-100 risk tolerance.
///
/// Below 30 is conservative, below 70 balanced, anything else aggressive.
/// The headline APY carries up to ±5% market noise.
pub fn optimal_allocation<R: Rng + ?Sized>(
    amount: f64,
    risk_tolerance: u32,
    rng: &mut R,
) -> AllocationPlan {
    let (rows, base_apy) = match risk_tolerance {
        0..=29 => CONSERVATIVE,
        30..=69 => BALANCED,
        _ => AGGRESSIVE,
    };

    let noise = 1.0 + (rng.gen::<f64>() - 0.5) * 0.1;
    let total_apy = round_to(base_apy * noise, 2);

    AllocationPlan {
        allocations: rows
            .iter()
            .map(|&(protocol, chain, percentage, apy)| PlannedAllocation {
                protocol: protocol.to_string(),
                chain: chain.to_string(),
                percentage,
                apy,
            })
            .collect(),
        total_apy,
        potential_savings: amount * (total_apy / 100.0) * 0.1,
        recommendations: vec![
            "Diversify across multiple chains to reduce risk".to_string(),
            "Monitor gas costs for optimal rebalancing timing".to_string(),
            "Consider auto-compounding for maximum returns".to_string(),
        ],
    }
}
