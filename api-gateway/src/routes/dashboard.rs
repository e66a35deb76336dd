//! Dashboard mock endpoints
//!
//! Display data for the dashboard widgets. None of it touches stored
//! accounts; responses are randomized or derived from the address string.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use spend2earn_engine::fixtures::{
    self, CreditLimitProfile, CreditScoreReport, LimitAdjustment, PortfolioAllocation,
    ProtocolListing, TimeRange, YieldHistory,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const INSIGHTS_DELAY_MS: u64 = 1500;
const CREDIT_LIMIT_DELAY_MS: u64 = 600;
const CREDIT_SCORE_DELAY_MS: u64 = 800;
const ADJUST_LIMIT_DELAY_MS: u64 = 2000;
const ALLOCATION_DELAY_MS: u64 = 1000;
const HISTORY_DELAY_MS: u64 = 1000;
const PROTOCOLS_DELAY_MS: u64 = 1200;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ai/insights", get(ai_insights))
        .route("/credit/limit", get(credit_limit))
        .route("/credit/score", get(credit_score))
        .route("/credit/adjust-limit", post(adjust_limit))
        .route("/portfolio/allocation", get(portfolio_allocation))
        .route("/yield/history", get(yield_history))
        .route("/yield/protocols", get(yield_protocols))
}

#[derive(Debug, Default, Deserialize)]
pub struct AddressQuery {
    pub address: Option<String>,
}

impl AddressQuery {
    fn required(self) -> ApiResult<String> {
        match self.address {
            Some(address) if !address.trim().is_empty() => Ok(address),
            _ => Err(ApiError::bad_request("Address is required")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub time_range: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustLimitRequest {
    pub address: Option<String>,
    pub new_limit: Option<Decimal>,
}

async fn ai_insights(State(state): State<AppState>) -> Json<Value> {
    state.pause(INSIGHTS_DELAY_MS).await;
    let insights = fixtures::insights(&mut rand::thread_rng());
    Json(json!({ "insights": insights }))
}

async fn credit_limit(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> ApiResult<Json<CreditLimitProfile>> {
    let address = query.required()?;
    state.pause(CREDIT_LIMIT_DELAY_MS).await;
    Ok(Json(fixtures::credit_limit_profile(&address)))
}

async fn credit_score(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> ApiResult<Json<CreditScoreReport>> {
    let address = query.required()?;
    state.pause(CREDIT_SCORE_DELAY_MS).await;
    Ok(Json(fixtures::credit_score(&address)))
}

async fn adjust_limit(
    State(state): State<AppState>,
    Json(request): Json<AdjustLimitRequest>,
) -> ApiResult<Json<LimitAdjustment>> {
    let address = request.address.unwrap_or_default();
    // Validate before the delay so bad requests fail fast
    let adjustment = fixtures::adjust_limit(&address, request.new_limit)?;
    state.pause(ADJUST_LIMIT_DELAY_MS).await;
    Ok(Json(adjustment))
}

async fn portfolio_allocation(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Json<PortfolioAllocation> {
    state.pause(ALLOCATION_DELAY_MS).await;
    Json(fixtures::allocation(query.address.as_deref()))
}

async fn yield_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<YieldHistory> {
    state.pause(HISTORY_DELAY_MS).await;
    let range = TimeRange::parse_or_default(query.time_range.as_deref());
    Json(fixtures::yield_history(range, Utc::now(), &mut rand::thread_rng()))
}

async fn yield_protocols(State(state): State<AppState>) -> Json<ProtocolListing> {
    state.pause(PROTOCOLS_DELAY_MS).await;
    Json(fixtures::protocols(&mut rand::thread_rng()))
}
