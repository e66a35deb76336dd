//! Core data types for Spend2Earn

pub mod account;
pub mod activity;
pub mod badge_tier;
pub mod spend_event;
