//! Yield optimizer, cross-chain routing and transfer endpoints

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use spend2earn_common::Spend2EarnError;
use spend2earn_engine::adapters::{TransferReceipt, TransferRequest, YieldTarget};
use spend2earn_engine::fixtures::{self, AllocationPlan};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const OPTIMIZER_DELAY_MS: u64 = 1500;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/yield/optimize", post(optimize))
        .route("/routing/quote", post(route_quote))
        .route("/transfers", post(transfer))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub amount: f64,
    #[serde(default = "default_risk_tolerance")]
    pub risk_tolerance: u32,
}

fn default_risk_tolerance() -> u32 {
    50
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuoteRequest {
    pub amount: Decimal,
    pub from_chain: u64,
    pub targets: Vec<YieldTarget>,
}

async fn optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> ApiResult<Json<AllocationPlan>> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(ApiError::bad_request("amount must be positive"));
    }
    if request.risk_tolerance > 100 {
        return Err(ApiError::bad_request("riskTolerance must be between 0 and 100"));
    }

    state.pause(OPTIMIZER_DELAY_MS).await;
    let plan = fixtures::optimal_allocation(
        request.amount,
        request.risk_tolerance,
        &mut rand::thread_rng(),
    );
    Ok(Json(plan))
}

async fn route_quote(
    State(state): State<AppState>,
    Json(request): Json<RouteQuoteRequest>,
) -> ApiResult<Json<Value>> {
    if request.targets.is_empty() {
        return Err(ApiError::bad_request("at least one target is required"));
    }

    let route = state
        .router
        .find_optimal_route(request.amount, request.from_chain, &request.targets)
        .await
        .map_err(Spend2EarnError::from)?;

    Ok(Json(json!({ "route": route })))
}

async fn transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> ApiResult<Json<TransferReceipt>> {
    let receipt = state
        .transfers
        .fast_transfer(request)
        .await
        .map_err(Spend2EarnError::from)?;
    Ok(Json(receipt))
}
