//! HTTP route tests driven through the router without a listener

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use spend2earn_gateway::{app, AppState};
use tower::ServiceExt;

const ADDRESS: &str = "0x742d35cc6634c0532925a3b844bc454e4438f44e";

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    send(state, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(state: &AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(state, request).await
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().unwrap(),
        other => other.to_string().parse().unwrap(),
    }
}

#[tokio::test]
async fn test_health() {
    let state = AppState::in_memory();
    let (status, body) = get(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_credit_limit_requires_address() {
    let state = AppState::in_memory();
    let (status, body) = get(&state, "/credit/limit").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Address is required");
    assert_eq!(body["code"], "invalid_request");

    let (status, _) = get(&state, "/credit/score").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_credit_limit_and_score() {
    let state = AppState::in_memory();

    let (status, body) = get(&state, &format!("/credit/limit?address={ADDRESS}")).await;
    assert_eq!(status, StatusCode::OK);
    // 0x44e = 1102
    assert_eq!(body["currentLimit"], 6102.0);
    assert_eq!(body["creditHistory"]["monthlyLimits"].as_array().unwrap().len(), 4);

    let (status, body) = get(&state, &format!("/credit/score?address={ADDRESS}")).await;
    assert_eq!(status, StatusCode::OK);
    let score = body["score"].as_u64().unwrap();
    assert!((550..850).contains(&score));
}

#[tokio::test]
async fn test_adjust_limit() {
    let state = AppState::in_memory();

    let (status, body) = post(
        &state,
        "/credit/adjust-limit",
        json!({ "address": ADDRESS, "newLimit": 60000 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Credit limit too high");

    let (status, body) = post(&state, "/credit/adjust-limit", json!({ "address": ADDRESS })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Address and newLimit are required");

    let (status, body) = post(
        &state,
        "/credit/adjust-limit",
        json!({ "address": ADDRESS, "newLimit": 15000 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(decimal(&body["newLimit"]), dec!(15000));
}

#[tokio::test]
async fn test_dashboard_fixtures() {
    let state = AppState::in_memory();

    let (status, body) = get(&state, "/ai/insights").await;
    assert_eq!(status, StatusCode::OK);
    let count = body["insights"].as_array().unwrap().len();
    assert!((2..=3).contains(&count));

    let (status, body) = get(&state, "/portfolio/allocation?address=demo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allocation"].as_array().unwrap().len(), 6);
    assert_eq!(body["summary"]["riskScore"], 6.8);

    let (status, body) = get(&state, "/yield/history?timeRange=7d").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 8);
    assert!(body["summary"]["averageAPY"].is_number());

    let (_, body) = get(&state, "/yield/history?timeRange=bogus").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 31);

    let (status, body) = get(&state, "/yield/protocols").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalProtocols"], 8);
}

#[tokio::test]
async fn test_account_lifecycle() {
    let state = AppState::in_memory();
    let base = format!("/accounts/{ADDRESS}");

    let (status, body) = post(
        &state,
        &format!("{base}/spend"),
        json!({ "amount": 1000, "merchant": "Electronics", "category": "retail" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["cashback"]), dec!(25));
    assert_eq!(body["snapshot"]["tier"], "Gold");

    // 25 staked is below the collateral floor
    let (status, body) = post(&state, &format!("{base}/borrow"), json!({ "amount": 10 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "insufficient_collateral");

    let (status, _) = post(&state, &format!("{base}/deposit"), json!({ "amount": 975 })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&state, &format!("{base}/borrow"), json!({ "amount": 600 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["entitlement"]["available"]), dec!(100));

    let (status, body) = post(&state, &format!("{base}/borrow"), json!({ "amount": 150 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "insufficient_entitlement");

    let (status, body) = post(&state, &format!("{base}/repay"), json!({ "amount": 50 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["snapshot"]["account"]["loanBalance"]), dec!(550));
    assert_eq!(decimal(&body["snapshot"]["account"]["vaultBalance"]), dec!(950));

    let (status, body) = get(&state, &base).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["terms"]["health"], "healthy");

    let (status, body) = get(&state, &format!("{base}/activity")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries[0]["type"], "repay");
}

#[tokio::test]
async fn test_invalid_spend_amount() {
    let state = AppState::in_memory();
    let (status, body) = post(
        &state,
        &format!("/accounts/{ADDRESS}/spend"),
        json!({ "amount": 0, "merchant": "Nothing" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "invalid_amount");
}

#[tokio::test]
async fn test_integrations() {
    let state = AppState::in_memory();

    let (status, body) = post(
        &state,
        "/yield/optimize",
        json!({ "amount": 10000, "riskTolerance": 20 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allocations"].as_array().unwrap().len(), 2);

    let (status, _) = post(
        &state,
        "/routing/quote",
        json!({ "amount": 1000, "fromChain": 1, "targets": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(
        &state,
        "/routing/quote",
        json!({
            "amount": 1000,
            "fromChain": 1,
            "targets": [
                { "chain": 137, "protocol": "Uniswap V3", "apy": "12.1" },
                { "chain": 1, "protocol": "Aave V3", "apy": "4.5" }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["route"]["toChain"], 137);

    let (status, body) = post(
        &state,
        "/transfers",
        json!({ "fromChain": 1, "toChain": 8453, "amount": 250, "recipient": ADDRESS }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    let uri = format!("/accounts/{ADDRESS}/automation");
    let (status, body) = post(&state, &uri, Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permissions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_auto_repay_toggle() {
    let state = AppState::in_memory();
    let base = format!("/accounts/{ADDRESS}");

    post(&state, &format!("{base}/spend"), json!({ "amount": 1000, "merchant": "Rent" })).await;
    post(&state, &format!("{base}/deposit"), json!({ "amount": 36475 })).await;
    post(&state, &format!("{base}/borrow"), json!({ "amount": 100 })).await;

    let uri = format!("{base}/auto-repay");
    let (status, body) = post(&state, &uri, json!({ "enabled": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["autoRepay"]["enabled"], true);
    assert_eq!(decimal(&body["autoRepay"]["nextRepayment"]), dec!(8.5));
    assert_eq!(body["autoRepay"]["daysToFullRepay"], 12);

    let (_, body) = get(&state, &format!("{base}/activity")).await;
    assert_eq!(body[0]["type"], "settings");
}

#[tokio::test]
async fn test_overflowing_amounts_are_rejected() {
    let state = AppState::in_memory();
    let base = format!("/accounts/{ADDRESS}");
    let max = Decimal::MAX.to_string();

    let (status, _) = post(&state, &format!("{base}/deposit"), json!({ "amount": max })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&state, &format!("{base}/deposit"), json!({ "amount": 1 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "amount_overflow");

    let (status, _) = get(&state, &base).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dust_borrow_keeps_account_readable() {
    let state = AppState::in_memory();
    let base = format!("/accounts/{ADDRESS}");

    post(&state, &format!("{base}/spend"), json!({ "amount": 1000, "merchant": "Rent" })).await;
    post(&state, &format!("{base}/deposit"), json!({ "amount": 975 })).await;

    let dust = Decimal::new(1, 28).to_string();
    let (status, _) = post(&state, &format!("{base}/borrow"), json!({ "amount": dust })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&state, &base).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["terms"]["collateralRatio"], u64::MAX);
}
