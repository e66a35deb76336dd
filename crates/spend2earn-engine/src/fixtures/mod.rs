//! Mock data generators for the dashboard
//!
//! Everything here is display fixture data: randomized or derived from the
//! address string, never authoritative. Generators take an explicit `Rng`
//! so tests can seed them.

pub mod credit;
pub mod insights;
pub mod optimizer;
pub mod portfolio;
pub mod yields;

pub use credit::{
    adjust_limit, credit_limit_profile, credit_score, CreditLimitProfile, CreditScoreReport,
    LimitAdjustment,
};
pub use insights::{insights, Insight, InsightKind};
pub use optimizer::{optimal_allocation, AllocationPlan, PlannedAllocation};
pub use portfolio::{allocation, AllocationSlice, PortfolioAllocation};
pub use yields::{protocols, yield_history, ProtocolListing, RiskLevel, TimeRange, YieldHistory};

/// Numeric value of the last `digits` hex characters of an address.
///
/// Unparseable suffixes count as zero.
pub(crate) fn address_suffix(address: &str, digits: usize) -> u64 {
    let address = address.trim();
    let start = address.len().saturating_sub(digits);
    address
        .get(start..)
        .and_then(|suffix| u64::from_str_radix(suffix, 16).ok())
        .unwrap_or(0)
}

/// Round to a fixed number of decimal places for display
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_suffix() {
        assert_eq!(address_suffix("0x1234abc", 3), 0xabc);
        assert_eq!(address_suffix("0x1234abcd", 4), 0xabcd);
        assert_eq!(address_suffix("demo", 4), 0);
        assert_eq!(address_suffix("ab", 4), 0xab);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(18.456, 2), 18.46);
        assert_eq!(round_to(33.33333, 1), 33.3);
    }
}
