//! Credit limit, credit score and limit adjustment fixtures
//!
//! Limit and score are derived from the address suffix so the same address
//! always sees the same numbers.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use spend2earn_common::{Result, Spend2EarnError};

use super::{address_suffix, round_to};
use crate::adapters::fake_tx_hash;

/// Largest limit an adjustment request may ask for
pub const MAX_ADJUSTABLE_LIMIT: Decimal = dec!(50000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLimit {
    pub month: String,
    pub limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyUtilization {
    pub month: String,
    pub utilization: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditHistory {
    pub monthly_limits: Vec<MonthlyLimit>,
    pub utilization_history: Vec<MonthlyUtilization>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditLimitProfile {
    pub current_limit: f64,
    pub available_credit: f64,
    pub utilization_rate: f64,
    pub max_possible_limit: f64,
    pub credit_history: CreditHistory,
}

/// Credit limit profile: $5k-$20k limit at 10-70% utilization
pub fn credit_limit_profile(address: &str) -> CreditLimitProfile {
    let seed = address_suffix(address, 3);
    let current_limit = 5000.0 + (seed % 15000) as f64;
    let used = current_limit * (0.1 + (seed % 60) as f64 / 100.0);
    let utilization_rate = round_to(used / current_limit * 100.0, 2);

    let monthly_limits = [("Jan", 0.7), ("Feb", 0.8), ("Mar", 0.9), ("Apr", 1.0)]
        .into_iter()
        .map(|(month, factor)| MonthlyLimit {
            month: month.to_string(),
            limit: round_to(current_limit * factor, 2),
        })
        .collect();

    let utilization_history = [
        ("Jan", 45.0),
        ("Feb", 38.0),
        ("Mar", 52.0),
        ("Apr", utilization_rate),
    ]
    .into_iter()
    .map(|(month, utilization)| MonthlyUtilization {
        month: month.to_string(),
        utilization,
    })
    .collect();

    CreditLimitProfile {
        current_limit,
        available_credit: round_to(current_limit - used, 2),
        utilization_rate,
        max_possible_limit: round_to(current_limit * 1.8, 2),
        credit_history: CreditHistory {
            monthly_limits,
            utilization_history,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTrend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreImprovement {
    pub potential: u32,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditScoreReport {
    pub score: u32,
    pub trend: ScoreTrend,
    pub factors: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub improvement: ScoreImprovement,
}

/// Credit score between 550 and 849
pub fn credit_score(address: &str) -> CreditScoreReport {
    let score = 550 + (address_suffix(address, 4) % 300) as u32;
    let trend = if score > 650 { ScoreTrend::Up } else { ScoreTrend::Down };

    CreditScoreReport {
        score,
        trend,
        factors: [
            "On-chain transaction history",
            "DeFi protocol interactions",
            "Repayment consistency",
            "Portfolio diversification",
            "Yield generation activity",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        last_updated: Utc::now(),
        improvement: ScoreImprovement {
            potential: (score + 50).min(850),
            recommendations: [
                "Increase DeFi protocol diversity",
                "Maintain consistent repayment schedule",
                "Optimize yield generation strategies",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitAdjustment {
    pub success: bool,
    pub new_limit: Decimal,
    pub effective_date: DateTime<Utc>,
    pub message: String,
    pub transaction_hash: String,
}

/// Accept a limit adjustment, effective tomorrow
pub fn adjust_limit(address: &str, new_limit: Option<Decimal>) -> Result<LimitAdjustment> {
    let new_limit = match new_limit {
        Some(limit) if !address.trim().is_empty() && limit > Decimal::ZERO => limit,
        _ => {
            return Err(Spend2EarnError::InvalidRequest(
                "Address and newLimit are required".to_string(),
            ))
        }
    };

    if new_limit > MAX_ADJUSTABLE_LIMIT {
        return Err(Spend2EarnError::InvalidRequest(
            "Credit limit too high".to_string(),
        ));
    }

    Ok(LimitAdjustment {
        success: true,
        new_limit,
        effective_date: Utc::now() + Duration::days(1),
        message: format!("Credit limit adjusted to ${}", new_limit),
        transaction_hash: fake_tx_hash(),
    })
}
