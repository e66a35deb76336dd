//! Canned AI insight cards

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Opportunity,
    Warning,
    Suggestion,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub action: String,
    /// Card-specific extras (confidence, gas cost, ...)
    #[serde(flatten)]
    pub extra: Value,
}

fn catalog() -> Vec<Insight> {
    vec![
        Insight {
            id: 1,
            kind: InsightKind::Opportunity,
            title: "High APY Opportunity Detected".to_string(),
            description: "Curve Finance on Arbitrum is offering 18.5% APY for USDC-USDT LP. Consider reallocating 15% of your stable portfolio.".to_string(),
            action: "Optimize Allocation".to_string(),
            extra: json!({ "confidence": 0.87, "potentialGain": "$2,340 annually" }),
        },
        Insight {
            id: 2,
            kind: InsightKind::Warning,
            title: "Credit Utilization Alert".to_string(),
            description: "Your credit utilization is at 68%. Consider repaying $1,500 to improve your credit health score.".to_string(),
            action: "Auto-Repay Now".to_string(),
            extra: json!({ "urgency": "medium" }),
        },
        Insight {
            id: 3,
            kind: InsightKind::Suggestion,
            title: "Cross-Chain Arbitrage".to_string(),
            description: "USDC yield on Base (12.3%) vs Ethereum (4.2%). Bridge $5,000 to capture 8.1% difference.".to_string(),
            action: "Execute Bridge".to_string(),
            extra: json!({ "gasCost": "$12.50", "netBenefit": "$405 annually" }),
        },
        Insight {
            id: 4,
            kind: InsightKind::Info,
            title: "Portfolio Rebalancing Due".to_string(),
            description: "Your portfolio allocation has drifted from target. Last rebalance was 12 days ago.".to_string(),
            action: "Rebalance Portfolio".to_string(),
            extra: json!({ "lastRebalance": "12 days ago" }),
        },
    ]
}

/// Two or three insights in random order
pub fn insights<R: Rng + ?Sized>(rng: &mut R) -> Vec<Insight> {
    let mut cards = catalog();
    cards.shuffle(rng);
    cards.truncate(rng.gen_range(2..=3));
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_two_or_three_distinct_cards() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let cards = insights(&mut rng);
            assert!((2..=3).contains(&cards.len()));

            let mut ids: Vec<u32> = cards.iter().map(|c| c.id).collect();
            ids.dedup();
            assert_eq!(ids.len(), cards.len());
        }
    }

    #[test]
    fn test_extras_flatten_into_card() {
        let card = &catalog()[0];
        let json = serde_json::to_value(card).unwrap();
        assert_eq!(json["type"], "opportunity");
        assert_eq!(json["confidence"], 0.87);
        assert_eq!(json["potentialGain"], "$2,340 annually");
    }
}
