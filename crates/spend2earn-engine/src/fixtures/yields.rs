//! Yield history and protocol listing fixtures

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::round_to;

/// Market average APY used as the benchmark line
pub const MARKET_AVERAGE_APY: f64 = 8.5;

/// Base APY the simulated vault oscillates around
pub const BASE_VAULT_APY: f64 = 18.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    /// Parse a range parameter, falling back to 30 days
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("7d") => TimeRange::Week,
            Some("90d") => TimeRange::Quarter,
            Some("1y") => TimeRange::Year,
            _ => TimeRange::Month,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPoint {
    pub date: String,
    pub apy: f64,
    pub benchmark: f64,
    pub volume: u64,
    pub protocols: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldSummary {
    #[serde(rename = "averageAPY")]
    pub average_apy: f64,
    #[serde(rename = "bestAPY")]
    pub best_apy: f64,
    #[serde(rename = "worstAPY")]
    pub worst_apy: f64,
    pub outperformance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldHistory {
    pub data: Vec<YieldPoint>,
    pub summary: YieldSummary,
}

/// Daily APY series ending at `today`, one point per day inclusive.
///
/// A sine wave plus noise around the base APY, with a correction dip at
/// 30-40% of the range and a rally at 70-80%.
pub fn yield_history<R: Rng + ?Sized>(
    range: TimeRange,
    today: DateTime<Utc>,
    rng: &mut R,
) -> YieldHistory {
    let num_days = range.days();
    let mut data = Vec::with_capacity(num_days as usize + 1);

    for i in 0..=num_days {
        let date = today - Duration::days(num_days - i);
        let step = i as f64;
        let span = num_days as f64;

        let volatility = (step / 7.0).sin() * 2.0 + rng.gen_range(0.0..3.0) - 1.5;
        let event_multiplier = if step > span * 0.7 && step < span * 0.8 {
            1.15
        } else if step > span * 0.3 && step < span * 0.4 {
            0.85
        } else {
            1.0
        };

        data.push(YieldPoint {
            date: date.format("%b %d").to_string(),
            apy: round_to((BASE_VAULT_APY + volatility) * event_multiplier, 2),
            benchmark: MARKET_AVERAGE_APY,
            volume: rng.gen_range(500_000..1_500_000),
            protocols: rng.gen_range(8..13),
        });
    }

    let average_apy = data.iter().map(|p| p.apy).sum::<f64>() / data.len() as f64;
    let best_apy = data.iter().map(|p| p.apy).fold(f64::MIN, f64::max);
    let worst_apy = data.iter().map(|p| p.apy).fold(f64::MAX, f64::min);
    let latest = data.last().map(|p| p.apy).unwrap_or(MARKET_AVERAGE_APY);

    YieldHistory {
        data,
        summary: YieldSummary {
            average_apy,
            best_apy,
            worst_apy,
            outperformance: latest - MARKET_AVERAGE_APY,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    pub name: String,
    pub chain: String,
    pub apy: f64,
    pub tvl: f64,
    pub risk: RiskLevel,
    pub category: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolListing {
    pub protocols: Vec<Protocol>,
    pub last_updated: DateTime<Utc>,
    pub total_protocols: usize,
}

/// (name, chain, base APY, APY spread, base TVL, TVL spread, risk, category)
const PROTOCOLS: [(&str, &str, f64, f64, f64, f64, RiskLevel, &str); 8] = [
    ("Aave V3", "Ethereum", 4.5, 2.0, 15.0e9, 5.0e9, RiskLevel::Low, "Lending"),
    ("Compound V3", "Ethereum", 3.8, 1.5, 8.0e9, 2.0e9, RiskLevel::Low, "Lending"),
    ("Uniswap V3", "Polygon", 12.1, 8.0, 3.0e9, 1.0e9, RiskLevel::Medium, "DEX"),
    ("Curve Finance", "Arbitrum", 7.2, 4.0, 5.0e9, 2.0e9, RiskLevel::Low, "Stableswap"),
    ("Balancer", "Base", 9.5, 6.0, 2.5e9, 1.0e9, RiskLevel::Medium, "DEX"),
    ("GMX", "Arbitrum", 18.0, 12.0, 1.2e9, 0.5e9, RiskLevel::High, "Perps"),
    ("Lido (stETH)", "Ethereum", 3.5, 1.0, 20.0e9, 5.0e9, RiskLevel::Low, "Staking"),
    ("Rocket Pool", "Ethereum", 3.3, 1.2, 5.0e9, 1.0e9, RiskLevel::Low, "Staking"),
];

/// Protocol listing with jittered APY/TVL, sorted by APY descending
pub fn protocols<R: Rng + ?Sized>(rng: &mut R) -> ProtocolListing {
    let mut protocols: Vec<Protocol> = PROTOCOLS
        .iter()
        .map(|&(name, chain, apy, apy_spread, tvl, tvl_spread, risk, category)| Protocol {
            name: name.to_string(),
            chain: chain.to_string(),
            apy: apy + rng.gen_range(0.0..apy_spread),
            tvl: tvl + rng.gen_range(0.0..tvl_spread),
            risk,
            category: category.to_string(),
            logo: "/placeholder.svg?height=32&width=32".to_string(),
        })
        .collect();

    protocols.sort_by(|a, b| b.apy.total_cmp(&a.apy));

    ProtocolListing {
        total_protocols: protocols.len(),
        protocols,
        last_updated: Utc::now(),
    }
}
