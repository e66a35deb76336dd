//! BadgeTier - Spend-based status ladder
//!
//! Badge tiers gate feature access and set the credit access rate:
//! - Unverified: below $100 lifetime spend, no credit
//! - Verified: $100+, 30% of vault balance
//! - Silver: $500+, 50% of vault balance
//! - Gold: $1000+, 70% of vault balance, micro-staking
//!
//! The tier is a pure function of cumulative spend, so it only moves forward
//! as spending accumulates.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TierError;

/// Spend threshold for the Verified badge
pub const VERIFIED_THRESHOLD: Decimal = dec!(100);

/// Spend threshold for the Silver badge
pub const SILVER_THRESHOLD: Decimal = dec!(500);

/// Spend threshold for the Gold badge
pub const GOLD_THRESHOLD: Decimal = dec!(1000);

/// Badge tier, ordered from lowest to highest
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BadgeTier {
    #[default]
    Unverified,
    Verified,
    Silver,
    Gold,
}

impl BadgeTier {
    /// All tiers in ladder order
    pub const ALL: [BadgeTier; 4] = [
        BadgeTier::Unverified,
        BadgeTier::Verified,
        BadgeTier::Silver,
        BadgeTier::Gold,
    ];

    /// Classify cumulative spending into a tier.
    ///
    /// Highest threshold not exceeding the input wins. Negative input is
    /// outside the documented domain and classifies as `Unverified`.
    pub fn classify(total_spending: Decimal) -> Self {
        if total_spending >= GOLD_THRESHOLD {
            BadgeTier::Gold
        } else if total_spending >= SILVER_THRESHOLD {
            BadgeTier::Silver
        } else if total_spending >= VERIFIED_THRESHOLD {
            BadgeTier::Verified
        } else {
            BadgeTier::Unverified
        }
    }

    /// Minimum cumulative spend that earns this tier
    pub fn threshold(&self) -> Decimal {
        match self {
            BadgeTier::Unverified => Decimal::ZERO,
            BadgeTier::Verified => VERIFIED_THRESHOLD,
            BadgeTier::Silver => SILVER_THRESHOLD,
            BadgeTier::Gold => GOLD_THRESHOLD,
        }
    }

    /// Fraction of vault balance that may be borrowed at this tier
    pub fn access_rate(&self) -> Decimal {
        match self {
            BadgeTier::Unverified => Decimal::ZERO,
            BadgeTier::Verified => dec!(0.3),
            BadgeTier::Silver => dec!(0.5),
            BadgeTier::Gold => dec!(0.7),
        }
    }

    /// The next tier up the ladder, if any
    pub fn next(&self) -> Option<BadgeTier> {
        match self {
            BadgeTier::Unverified => Some(BadgeTier::Verified),
            BadgeTier::Verified => Some(BadgeTier::Silver),
            BadgeTier::Silver => Some(BadgeTier::Gold),
            BadgeTier::Gold => None,
        }
    }

    /// Numeric encoding used by the badge contract ABI (0-3)
    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            BadgeTier::Unverified => "Unverified",
            BadgeTier::Verified => "Verified",
            BadgeTier::Silver => "Silver",
            BadgeTier::Gold => "Gold",
        }
    }

    /// Whether micro-staking (unit-dollar stake increments) is unlocked
    pub fn micro_stake_enabled(&self) -> bool {
        *self == BadgeTier::Gold
    }
}

/// Classify cumulative spending into a badge tier
#[inline]
pub fn classify_tier(total_spending: Decimal) -> BadgeTier {
    BadgeTier::classify(total_spending)
}

impl TryFrom<u8> for BadgeTier {
    type Error = TierError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        BadgeTier::ALL
            .get(code as usize)
            .copied()
            .ok_or(TierError::UnknownCode(code))
    }
}

impl std::str::FromStr for BadgeTier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BadgeTier::ALL
            .iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| TierError::UnknownName(s.to_string()))
    }
}

impl std::fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress toward the next badge tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeProgress {
    /// Current tier
    pub tier: BadgeTier,
    /// Next tier, `None` at Gold
    pub next_tier: Option<BadgeTier>,
    /// Spend required for the next tier
    pub next_threshold: Option<Decimal>,
    /// Spend still needed to reach the next tier
    pub remaining: Decimal,
    /// Progress through the current band (0-100)
    pub progress_pct: Decimal,
}

impl BadgeProgress {
    pub fn for_spending(total_spending: Decimal) -> Self {
        let tier = BadgeTier::classify(total_spending);
        let Some(next) = tier.next() else {
            return Self {
                tier,
                next_tier: None,
                next_threshold: None,
                remaining: Decimal::ZERO,
                progress_pct: dec!(100),
            };
        };

        let floor = tier.threshold();
        let ceiling = next.threshold();
        let spent_in_band = (total_spending - floor).max(Decimal::ZERO);
        let progress_pct = (spent_in_band / (ceiling - floor) * dec!(100)).min(dec!(100));

        Self {
            tier,
            next_tier: Some(next),
            next_threshold: Some(ceiling),
            remaining: (ceiling - total_spending).max(Decimal::ZERO),
            progress_pct,
        }
    }
}
