//! SpendEvent - A single simulated card purchase
//!
//! Created once per purchase and never modified afterwards; fields are only
//! exposed through accessors.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CreditError;

/// Immutable record of a card purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendEvent {
    id: Uuid,
    amount: Decimal,
    merchant: String,
    category: Option<String>,
    timestamp: DateTime<Utc>,
}

impl SpendEvent {
    /// Create a spend event stamped with the current time
    pub fn new(amount: Decimal, merchant: impl Into<String>) -> Result<Self, CreditError> {
        Self::at(amount, merchant, Utc::now())
    }

    /// Create a spend event at an explicit time
    pub fn at(
        amount: Decimal,
        merchant: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, CreditError> {
        if amount <= Decimal::ZERO {
            return Err(CreditError::InvalidAmount);
        }

        let merchant = merchant.into();
        let merchant = match merchant.trim() {
            "" => "Card purchase".to_string(),
            trimmed => trimmed.to_string(),
        };

        Ok(Self {
            id: Uuid::now_v7(),
            amount,
            merchant,
            category: None,
            timestamp,
        })
    }

    /// Attach a merchant category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
