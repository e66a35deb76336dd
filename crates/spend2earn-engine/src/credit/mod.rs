//! Tiered credit line backed by vault collateral

pub mod entitlement;
pub mod terms;

pub use entitlement::{
    access_rate, available_credit, borrow, check_collateral, credit_limit, repay,
    CreditEntitlement, RepayOutcome, MIN_COLLATERAL,
};
pub use terms::{borrow_apr, collateral_ratio, monthly_interest, LoanHealth, LoanTerms};
