//! HTTP routes

pub mod accounts;
pub mod dashboard;
pub mod integrations;
pub mod ws;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(ws::websocket_handler))
        .merge(accounts::routes())
        .merge(dashboard::routes())
        .merge(integrations::routes())
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "spend2earn-gateway",
        "version": spend2earn_common::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
