//! Portfolio allocation fixture, varied per address

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{address_suffix, round_to};

/// Seed used for missing or demo addresses
const DEMO_SEED: u64 = 12345;

/// (protocol, base share %, color, APY, base amount)
const BASE_SLICES: [(&str, f64, &str, f64, f64); 6] = [
    ("Aave V3", 25.0, "#B6509E", 4.5, 12500.0),
    ("Compound V3", 20.0, "#2EBAC6", 3.8, 10000.0),
    ("Uniswap V3", 25.0, "#FF007A", 12.1, 12500.0),
    ("Curve Finance", 15.0, "#40E0D0", 7.2, 7500.0),
    ("GMX", 10.0, "#4C82FB", 18.0, 5000.0),
    ("Balancer", 5.0, "#1E1E1E", 9.5, 2500.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub name: String,
    pub value: f64,
    pub color: String,
    pub apy: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    pub total_value: f64,
    #[serde(rename = "weightedAPY")]
    pub weighted_apy: f64,
    pub total_protocols: usize,
    pub risk_score: f64,
    pub last_rebalance: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAllocation {
    pub allocation: Vec<AllocationSlice>,
    pub summary: AllocationSummary,
}

fn allocation_seed(address: Option<&str>) -> u64 {
    match address.map(str::trim) {
        None | Some("") | Some("demo") => DEMO_SEED,
        Some(address) => address_suffix(address, 4),
    }
}

/// Allocation across six protocols with shares normalized to 100%
pub fn allocation(address: Option<&str>) -> PortfolioAllocation {
    let seed = allocation_seed(address);
    let amount_factor = 1.0 + ((seed % 20) as f64 - 10.0) / 100.0;

    let raw: Vec<(usize, f64, f64)> = BASE_SLICES
        .iter()
        .enumerate()
        .map(|(i, &(_, value, _, _, amount))| {
            let jitter = (seed % (10 + i as u64)) as f64 - 5.0;
            (i, (value + jitter).max(1.0), amount * amount_factor)
        })
        .collect();

    let total_share: f64 = raw.iter().map(|(_, value, _)| value).sum();

    let slices: Vec<AllocationSlice> = raw
        .into_iter()
        .map(|(i, value, amount)| {
            let (name, _, color, apy, _) = BASE_SLICES[i];
            AllocationSlice {
                name: name.to_string(),
                value: round_to(value / total_share * 100.0, 1),
                color: color.to_string(),
                apy,
                amount: amount.round(),
            }
        })
        .collect();

    let total_value: f64 = slices.iter().map(|s| s.amount).sum();
    let weighted_apy = if total_value > 0.0 {
        slices.iter().map(|s| s.apy * s.amount).sum::<f64>() / total_value
    } else {
        0.0
    };

    PortfolioAllocation {
        summary: AllocationSummary {
            total_value,
            weighted_apy: round_to(weighted_apy, 2),
            total_protocols: slices.len(),
            risk_score: 6.8,
            last_rebalance: Utc::now() - Duration::days(5),
        },
        allocation: slices,
    }
}
