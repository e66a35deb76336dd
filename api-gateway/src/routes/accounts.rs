//! Account endpoints backed by the account service

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use spend2earn_common::{ActivityEntry, Spend2EarnError, SpendEvent};
use spend2earn_engine::adapters::Delegation;
use spend2earn_engine::{AccountSnapshot, RepayReceipt, SpendReceipt};
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/:address", get(get_account))
        .route("/accounts/:address/spend", post(spend))
        .route("/accounts/:address/deposit", post(deposit))
        .route("/accounts/:address/borrow", post(borrow))
        .route("/accounts/:address/repay", post(repay))
        .route("/accounts/:address/auto-repay", post(set_auto_repay))
        .route("/accounts/:address/activity", get(activity))
        .route("/accounts/:address/automation", post(setup_automation))
}

#[derive(Debug, Deserialize)]
pub struct SpendRequest {
    pub amount: Decimal,
    #[serde(default)]
    pub merchant: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct AutoRepayRequest {
    pub enabled: bool,
}

async fn get_account(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Json<AccountSnapshot>> {
    Ok(Json(state.service.snapshot(&address).await?))
}

async fn spend(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(request): Json<SpendRequest>,
) -> ApiResult<Json<SpendReceipt>> {
    let mut event = SpendEvent::new(request.amount, request.merchant)
        .map_err(Spend2EarnError::from)?;
    if let Some(category) = request.category {
        event = event.with_category(category);
    }

    let receipt = state.service.spend(&address, event).await?;
    Ok(Json(receipt))
}

async fn deposit(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(request): Json<AmountRequest>,
) -> ApiResult<Json<AccountSnapshot>> {
    Ok(Json(state.service.deposit(&address, request.amount).await?))
}

async fn borrow(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(request): Json<AmountRequest>,
) -> ApiResult<Json<AccountSnapshot>> {
    Ok(Json(state.service.borrow(&address, request.amount).await?))
}

async fn repay(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(request): Json<AmountRequest>,
) -> ApiResult<Json<RepayReceipt>> {
    Ok(Json(state.service.repay(&address, request.amount).await?))
}

async fn set_auto_repay(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(request): Json<AutoRepayRequest>,
) -> ApiResult<Json<AccountSnapshot>> {
    Ok(Json(state.service.set_auto_repay(&address, request.enabled).await?))
}

async fn activity(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Json<Vec<ActivityEntry>>> {
    Ok(Json(state.service.activity(&address)?))
}

async fn setup_automation(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Json<Delegation>> {
    let delegation = state
        .delegation
        .setup_credit_automation(&address)
        .await
        .map_err(Spend2EarnError::from)?;
    info!(address = %address, "Credit automation enabled");
    Ok(Json(delegation))
}
